//! Navigation, pagination and keyboard input
//!
//! The slider doesn't build markup for its controls. It describes them
//! ([`Controls`]) and accepts activations ([`ControlAction`]); the host draws
//! arrows and dots however it likes and forwards clicks and key presses.

/// Keys the slider responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Other,
}

impl Key {
    /// Map a DOM-style key code (37-40) to a key
    pub fn from_code(code: u32) -> Self {
        match code {
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            _ => Key::Other,
        }
    }

    /// Action bound to this key
    ///
    /// Left and Down go back, Right and Up go forward.
    pub fn action(self) -> Option<ControlAction> {
        match self {
            Key::ArrowLeft | Key::ArrowDown => Some(ControlAction::Previous),
            Key::ArrowRight | Key::ArrowUp => Some(ControlAction::Next),
            Key::Other => None,
        }
    }
}

/// An activated control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// The "previous" arrow
    Previous,
    /// The "next" arrow
    Next,
    /// The pagination indicator for a slide
    Indicator(usize),
}

/// One pagination indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

/// Description of the controls a host should render
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Controls {
    /// Whether previous/next arrows are shown
    pub navigation: bool,
    /// One indicator per slide when pagination is enabled, otherwise empty
    pub indicators: Vec<Indicator>,
}

impl Controls {
    /// Describe the controls for `len` slides with `active` showing
    pub fn describe(navigation: bool, pagination: bool, len: usize, active: usize) -> Self {
        let indicators = if pagination {
            (0..len)
                .map(|index| Indicator {
                    index,
                    active: index == active,
                })
                .collect()
        } else {
            Vec::new()
        };
        Self {
            navigation,
            indicators,
        }
    }

    pub fn has_pagination(&self) -> bool {
        !self.indicators.is_empty()
    }

    /// Whether nothing needs rendering
    pub fn is_empty(&self) -> bool {
        !self.navigation && self.indicators.is_empty()
    }

    /// Whether an action targets a control that exists
    pub fn accepts(&self, action: ControlAction) -> bool {
        match action {
            ControlAction::Previous | ControlAction::Next => self.navigation,
            ControlAction::Indicator(index) => index < self.indicators.len(),
        }
    }
}
