//! Blinc Slider
//!
//! A carousel engine that shows one slide at a time out of a fixed list,
//! using only three rendering slots no matter how many slides there are.
//!
//! # Features
//!
//! - **Three-Slot Buffer**: previous, current and next slides live in three
//!   physical slots whose roles rotate on every move
//! - **Serialized Transitions**: one transition at a time; requests made
//!   while animating are dropped, never queued
//! - **Wrap-Around Navigation**: next/prev wrap at both ends, jumps take the
//!   shorter way around
//! - **Autoplay**: recurring advance that pauses for manual moves and
//!   resumes once they complete
//! - **Sizing**: slot widths follow the host, the viewport follows the
//!   current slide's height
//! - **Stall Watchdog**: a transition whose completion signal never arrives
//!   is reported instead of locking silently
//! - **Headless**: rendering goes through [`RenderSurface`]; a
//!   [`RecordingSurface`] ships for tests and snapshot renderers
//!
//! # Example
//!
//! ```ignore
//! use blinc_slider::prelude::*;
//!
//! let surface = RecordingSurface::new(640.0);
//! let mut slider = Slider::new(surface, vec!["one", "two", "three"], SliderConfig::new())?;
//! slider.init();
//! slider.next();
//! ```

pub mod autoplay;
pub mod clock;
pub mod config;
pub mod controls;
pub mod error;
pub mod events;
pub mod index;
pub mod registry;
pub mod sizing;
pub mod slider;
pub mod slots;
pub mod surface;
pub mod transition;

pub use autoplay::{AutoplayState, AutoplayTimer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    SliderConfig, StartIndex, DEFAULT_MOVE_TIME_MS, DEFAULT_STALL_GRACE_MS, DEFAULT_STOP_TIME_MS,
};
pub use controls::{ControlAction, Controls, Indicator, Key};
pub use error::{Result, SliderError};
pub use events::{EventEmitter, SliderEvent, SubscriptionId};
pub use index::{clamp_index, direction_between, predecessor, successor, Direction};
pub use registry::{ElementHandle, SliderId, SliderRegistry};
pub use sizing::{Layout, Size, SizingCoordinator};
pub use slider::{Slider, SliderState};
pub use slots::{RoleIndices, SlotBuffer, SlotId, SlotRole};
pub use surface::{RecordingSurface, RenderSurface, SurfaceCommand};
pub use transition::{
    DropReason, MoveOutcome, MoveRequest, Origin, Stall, Transition, TransitionController,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::{SliderConfig, StartIndex};
    pub use crate::controls::{ControlAction, Key};
    pub use crate::error::{Result, SliderError};
    pub use crate::events::SliderEvent;
    pub use crate::index::Direction;
    pub use crate::registry::{ElementHandle, SliderRegistry};
    pub use crate::sizing::Size;
    pub use crate::slider::Slider;
    pub use crate::slots::{SlotId, SlotRole};
    pub use crate::surface::{RecordingSurface, RenderSurface};
    pub use crate::transition::MoveOutcome;
}
