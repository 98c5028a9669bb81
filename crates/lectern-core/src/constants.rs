//! Application constants and configuration defaults
//!
//! Centralized location for magic numbers and default values

/// Lesson and quiz layout metrics, in terminal cells
pub mod layout {
    /// Horizontal padding between a surface edge and its content
    pub const PAD_X: u16 = 2;

    /// Rows of padding above and below surface content
    pub const PAD_Y: usize = 1;

    /// Gap between the text column and the image column
    pub const COLUMN_GAP: u16 = 2;

    /// Height of the spacer produced by a blank body line
    pub const SPACER_HEIGHT: usize = 1;

    /// Rows above and below each side image
    pub const IMAGE_SPACING: usize = 1;

    /// Maximum number of side images shown per lesson
    pub const MAX_IMAGES: usize = 2;

    /// Text never wraps wider than this unless configured otherwise
    pub const DEFAULT_MAX_WRAP_WIDTH: u16 = 90;

    /// Default width of an image placeholder
    pub const DEFAULT_IMAGE_WIDTH: u16 = 28;

    /// Default height of an image placeholder
    pub const DEFAULT_IMAGE_HEIGHT: usize = 8;

    /// Indentation of quiz option rows relative to their prompt
    pub const OPTION_INDENT: u16 = 2;

    /// Width of the radio marker in front of an option: "(•) "
    pub const OPTION_MARKER_WIDTH: u16 = 4;

    /// Horizontal gap between buttons sharing a row
    pub const BUTTON_GAP: u16 = 2;

    /// Extra cells a button adds around its label: "[ " and " ]"
    pub const BUTTON_CHROME: u16 = 4;
}

/// Scrolling defaults
pub mod scroll {
    /// Units scrolled per wheel notch
    pub const DEFAULT_WHEEL_STEP: usize = 1;

    /// Rows moved per scroll unit
    pub const DEFAULT_UNIT_ROWS: usize = 2;

    /// Units scrolled by PageUp/PageDown
    pub const DEFAULT_PAGE_UNITS: usize = 10;
}

/// UI configuration
pub mod ui {
    /// Directory name used under the platform config/data dirs
    pub const APP_DIR_NAME: &str = "lectern";

    /// Config file name inside the config dir
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Log file name inside the logs dir
    pub const LOG_FILE_NAME: &str = "lectern.log";

    /// Default theme name
    pub const DEFAULT_THEME: &str = "lectern";

    /// Height of the lesson screen header bar
    pub const HEADER_HEIGHT: u16 = 3;

    /// Columns reserved on the right of a viewport for its scrollbar
    pub const SCROLLBAR_WIDTH: u16 = 1;

    /// Rows taken by the home screen banner
    pub const HOME_BANNER_HEIGHT: u16 = 6;

    /// Rows between home screen lesson buttons (button row + gap)
    pub const HOME_BUTTON_PITCH: u16 = 2;

    /// Left margin of the home screen lesson buttons
    pub const HOME_MARGIN_X: u16 = 4;
}

/// User-facing labels
pub mod labels {
    pub const QUESTIONS_BUTTON: &str = "Questions";
    pub const BACK_TO_LESSON_BUTTON: &str = "Back to lesson";
    pub const CHECK_BUTTON: &str = "Check";
    pub const HOME_BUTTON: &str = "← Home";
    pub const QUIZ_HEADER: &str = "Mini quiz:";
    pub const QUIZ_TITLE_SUFFIX: &str = "Questions";
}
