//! Mobile sidebar drawer state.

/// Something that can open or close the drawer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawerEvent {
    /// A drawer trigger was activated.
    Toggle,
    /// Explicit open request.
    Open,
    /// Explicit close request (close buttons).
    Close,
    /// The backdrop behind the drawer was clicked.
    BackdropClick,
    /// Escape was pressed.
    Escape,
    /// A link inside the drawer was followed.
    LinkClick,
    /// The viewport was resized to the given width (px).
    Resize(f64),
}

/// Open/closed state of the drawer plus the last seen viewport width.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerState {
    open: bool,
    last_width: f64,
    breakpoint: f64,
}

impl DrawerState {
    /// A closed drawer for a viewport of `width` px.
    pub fn new(width: f64, breakpoint: f64) -> Self {
        Self {
            open: false,
            last_width: width,
            breakpoint,
        }
    }

    /// Whether the drawer is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Apply an event. Returns `true` if the open state changed.
    pub fn apply(&mut self, event: DrawerEvent) -> bool {
        let next = match event {
            DrawerEvent::Toggle => !self.open,
            DrawerEvent::Open => true,
            DrawerEvent::Close
            | DrawerEvent::BackdropClick
            | DrawerEvent::Escape
            | DrawerEvent::LinkClick => false,
            DrawerEvent::Resize(width) => {
                // Height-only resizes are ignored.
                if width == self.last_width {
                    return false;
                }
                self.last_width = width;
                if width >= self.breakpoint {
                    false
                } else {
                    self.open
                }
            }
        };
        let changed = next != self.open;
        self.open = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        assert!(!DrawerState::new(800.0, 1024.0).is_open());
    }

    #[test]
    fn test_toggle() {
        let mut drawer = DrawerState::new(800.0, 1024.0);
        assert!(drawer.apply(DrawerEvent::Toggle));
        assert!(drawer.is_open());
        assert!(drawer.apply(DrawerEvent::Toggle));
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_closers() {
        for closer in [
            DrawerEvent::Close,
            DrawerEvent::BackdropClick,
            DrawerEvent::Escape,
            DrawerEvent::LinkClick,
        ] {
            let mut drawer = DrawerState::new(800.0, 1024.0);
            drawer.apply(DrawerEvent::Open);
            assert!(drawer.apply(closer));
            assert!(!drawer.is_open());
            assert!(!drawer.apply(closer));
        }
    }

    #[test]
    fn test_resize_across_breakpoint_closes() {
        let mut drawer = DrawerState::new(900.0, 1024.0);
        drawer.apply(DrawerEvent::Toggle);
        assert!(drawer.apply(DrawerEvent::Resize(1200.0)));
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_resize_below_breakpoint_keeps_open() {
        let mut drawer = DrawerState::new(900.0, 1024.0);
        drawer.apply(DrawerEvent::Open);
        assert!(!drawer.apply(DrawerEvent::Resize(700.0)));
        assert!(drawer.is_open());
    }

    #[test]
    fn test_same_width_resize_ignored() {
        let mut drawer = DrawerState::new(1200.0, 1024.0);
        drawer.apply(DrawerEvent::Open);
        assert!(!drawer.apply(DrawerEvent::Resize(1200.0)));
        assert!(drawer.is_open());
    }
}
