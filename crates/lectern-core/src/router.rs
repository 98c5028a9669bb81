//! Wheel routing
//!
//! One router serves the whole process. Each physical wheel event is
//! normalized to a direction, then applied to the nearest registered and
//! bound surface on the containment chain under the pointer.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::constants::scroll::DEFAULT_WHEEL_STEP;
use crate::geometry::Position;
use crate::surface::Scrollable;
use crate::widget::{WidgetId, WidgetTree};

/// Discrete wheel indicator (button-style encodings)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelButton {
    Up,
    Down,
}

/// Raw wheel payload in either platform encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDelta {
    /// Signed magnitude, positive = away from the user
    Magnitude(i32),
    /// Button-style up/down indicator
    Discrete(WheelButton),
}

/// A wheel event at a screen position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    pub delta: WheelDelta,
    pub position: Position,
}

impl WheelEvent {
    pub fn new(delta: WheelDelta, position: Position) -> Self {
        Self { delta, position }
    }

    pub fn up(position: Position) -> Self {
        Self::new(WheelDelta::Discrete(WheelButton::Up), position)
    }

    pub fn down(position: Position) -> Self {
        Self::new(WheelDelta::Discrete(WheelButton::Down), position)
    }

    pub fn magnitude(delta: i32, position: Position) -> Self {
        Self::new(WheelDelta::Magnitude(delta), position)
    }
}

/// Normalized scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// `None` for a zero magnitude
    pub fn from_delta(delta: WheelDelta) -> Option<Self> {
        match delta {
            WheelDelta::Magnitude(d) if d > 0 => Some(Self::Up),
            WheelDelta::Magnitude(d) if d < 0 => Some(Self::Down),
            WheelDelta::Magnitude(_) => None,
            WheelDelta::Discrete(WheelButton::Up) => Some(Self::Up),
            WheelDelta::Discrete(WheelButton::Down) => Some(Self::Down),
        }
    }

    /// Signed unit delta for a surface: up moves towards offset 0
    pub fn signed_units(self, step: usize) -> isize {
        let step = isize::try_from(step).unwrap_or(isize::MAX);
        match self {
            Self::Up => -step,
            Self::Down => step,
        }
    }
}

struct Registration {
    surface: Box<dyn Scrollable>,
    bound: bool,
}

/// Registry of scroll surfaces keyed by their widget
pub struct WheelRouter {
    surfaces: HashMap<WidgetId, Registration>,
    installed: bool,
    wheel_step: usize,
}

impl Default for WheelRouter {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_STEP)
    }
}

impl WheelRouter {
    pub fn new(wheel_step: usize) -> Self {
        Self {
            surfaces: HashMap::new(),
            installed: false,
            wheel_step: wheel_step.max(1),
        }
    }

    /// Start routing. Returns true only on the first call.
    pub fn install(&mut self) -> bool {
        if self.installed {
            return false;
        }
        self.installed = true;
        debug!("Wheel router installed");
        true
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn wheel_step(&self) -> usize {
        self.wheel_step
    }

    /// Register a surface for `widget`. It starts unbound.
    pub fn register(&mut self, widget: WidgetId, surface: Box<dyn Scrollable>) {
        self.surfaces.insert(
            widget,
            Registration {
                surface,
                bound: false,
            },
        );
    }

    pub fn is_registered(&self, widget: WidgetId) -> bool {
        self.surfaces.contains_key(&widget)
    }

    /// Make a registered surface eligible as a wheel target
    pub fn bind(&mut self, widget: WidgetId) -> bool {
        match self.surfaces.get_mut(&widget) {
            Some(reg) => {
                reg.bound = true;
                true
            }
            None => false,
        }
    }

    pub fn unbind(&mut self, widget: WidgetId) {
        if let Some(reg) = self.surfaces.get_mut(&widget) {
            reg.bound = false;
        }
    }

    pub fn is_bound(&self, widget: WidgetId) -> bool {
        self.surfaces.get(&widget).is_some_and(|r| r.bound)
    }

    pub fn surface(&self, widget: WidgetId) -> Option<&dyn Scrollable> {
        self.surfaces.get(&widget).map(|r| r.surface.as_ref())
    }

    pub fn surface_mut(&mut self, widget: WidgetId) -> Option<&mut (dyn Scrollable + 'static)> {
        self.surfaces.get_mut(&widget).map(|r| r.surface.as_mut())
    }

    /// Nearest bound surface on the chain from the topmost widget at
    /// `position` to the root
    pub fn resolve_target(&self, tree: &WidgetTree, position: Position) -> Option<WidgetId> {
        let hit = tree.widget_at(position)?;
        tree.ancestors(hit).find(|id| self.is_bound(*id))
    }

    /// Route one wheel event. Returns the surface that received it.
    pub fn dispatch(&mut self, tree: &WidgetTree, event: &WheelEvent) -> Option<WidgetId> {
        if !self.installed {
            trace!("Wheel event before router install, dropped");
            return None;
        }
        let Some(direction) = ScrollDirection::from_delta(event.delta) else {
            trace!("Zero wheel delta, dropped");
            return None;
        };
        let Some(target) = self.resolve_target(tree, event.position) else {
            trace!(x = event.position.x, y = event.position.y, "No scroll target under pointer");
            return None;
        };
        let units = direction.signed_units(self.wheel_step);
        let reg = self.surfaces.get_mut(&target)?;
        reg.surface.scroll_by(units);
        trace!(surface = ?target, ?direction, offset = reg.surface.offset(), "Wheel routed");
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::surface::ScrollableSurface;
    use crate::widget::WidgetKind;

    fn tall_surface() -> Box<dyn Scrollable> {
        let mut surface = ScrollableSurface::new(1);
        surface.set_viewport_height(10);
        surface.set_content_height(100);
        Box::new(surface)
    }

    /// root -> a2 -> a1 -> w, all covering the same area
    fn chain() -> (WidgetTree, [WidgetId; 3]) {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let area = Some(Rect::new(0, 0, 40, 20));
        tree.set_bounds(root, area);
        let a2 = tree.insert(root, WidgetKind::Surface);
        let a1 = tree.insert(a2, WidgetKind::Container);
        let w = tree.insert(a1, WidgetKind::Label);
        for id in [a2, a1, w] {
            tree.set_bounds(id, area);
        }
        (tree, [w, a1, a2])
    }

    #[test]
    fn test_direction_normalization() {
        use ScrollDirection::*;
        assert_eq!(ScrollDirection::from_delta(WheelDelta::Magnitude(120)), Some(Up));
        assert_eq!(ScrollDirection::from_delta(WheelDelta::Magnitude(-3)), Some(Down));
        assert_eq!(ScrollDirection::from_delta(WheelDelta::Magnitude(0)), None);
        assert_eq!(
            ScrollDirection::from_delta(WheelDelta::Discrete(WheelButton::Up)),
            Some(Up)
        );
        assert_eq!(
            ScrollDirection::from_delta(WheelDelta::Discrete(WheelButton::Down)),
            Some(Down)
        );
        assert_eq!(Up.signed_units(2), -2);
        assert_eq!(Down.signed_units(2), 2);
    }

    #[test]
    fn test_routes_to_registered_ancestor() {
        let (tree, [w, a1, a2]) = chain();
        let mut router = WheelRouter::new(1);
        router.install();
        router.register(a2, tall_surface());
        router.bind(a2);

        let target = router.dispatch(&tree, &WheelEvent::down(Position::new(5, 5)));
        assert_eq!(target, Some(a2));
        assert_eq!(router.surface(a2).map(|s| s.offset()), Some(1));
        assert!(!router.is_registered(w));
        assert!(!router.is_registered(a1));
    }

    #[test]
    fn test_nearest_surface_wins() {
        let (tree, [_, a1, a2]) = chain();
        let mut router = WheelRouter::new(1);
        router.install();
        router.register(a1, tall_surface());
        router.register(a2, tall_surface());
        router.bind(a1);
        router.bind(a2);

        router.dispatch(&tree, &WheelEvent::down(Position::new(1, 1)));
        assert_eq!(router.surface(a1).map(|s| s.offset()), Some(1));
        assert_eq!(router.surface(a2).map(|s| s.offset()), Some(0));

        // Unbound surfaces are skipped
        router.unbind(a1);
        router.dispatch(&tree, &WheelEvent::down(Position::new(1, 1)));
        assert_eq!(router.surface(a1).map(|s| s.offset()), Some(1));
        assert_eq!(router.surface(a2).map(|s| s.offset()), Some(1));
    }

    #[test]
    fn test_no_routing_before_install() {
        let (tree, [_, _, a2]) = chain();
        let mut router = WheelRouter::new(1);
        router.register(a2, tall_surface());
        router.bind(a2);

        assert_eq!(router.dispatch(&tree, &WheelEvent::down(Position::new(1, 1))), None);
        assert_eq!(router.surface(a2).map(|s| s.offset()), Some(0));
    }

    #[test]
    fn test_install_is_idempotent() {
        let (tree, [_, _, a2]) = chain();
        let mut router = WheelRouter::new(1);
        assert!(router.install());
        assert!(!router.install());
        router.register(a2, tall_surface());
        router.bind(a2);

        router.dispatch(&tree, &WheelEvent::down(Position::new(1, 1)));
        assert_eq!(router.surface(a2).map(|s| s.offset()), Some(1));
    }

    #[test]
    fn test_discarded_events() {
        let (tree, [_, _, a2]) = chain();
        let mut router = WheelRouter::new(1);
        router.install();
        router.register(a2, tall_surface());
        router.bind(a2);

        assert_eq!(
            router.dispatch(&tree, &WheelEvent::magnitude(0, Position::new(1, 1))),
            None
        );
        // Outside every widget
        assert_eq!(router.dispatch(&tree, &WheelEvent::down(Position::new(60, 1))), None);
        assert_eq!(router.surface(a2).map(|s| s.offset()), Some(0));
    }

    #[test]
    fn test_magnitude_up_scrolls_back() {
        let (tree, [_, _, a2]) = chain();
        let mut router = WheelRouter::new(3);
        router.install();
        router.register(a2, tall_surface());
        router.bind(a2);

        router.dispatch(&tree, &WheelEvent::magnitude(-120, Position::new(1, 1)));
        assert_eq!(router.surface(a2).map(|s| s.offset()), Some(3));
        router.dispatch(&tree, &WheelEvent::magnitude(120, Position::new(1, 1)));
        assert_eq!(router.surface(a2).map(|s| s.offset()), Some(0));
    }
}
