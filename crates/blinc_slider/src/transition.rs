//! Transition state machine
//!
//! Two states: `Idle` and `Animating`. A move request is accepted only while
//! idle and only if it actually changes the active slide; anything else is
//! dropped without error or side effect. That rule is the animation lock: it
//! keeps overlapping transitions from interleaving their slot rotations.
//!
//! ```text
//!            accepted request (movetime > 0)
//!   ┌──────┐ ─────────────────────────────▶ ┌───────────┐
//!   │ Idle │                                │ Animating │
//!   └──────┘ ◀───────────────────────────── └───────────┘
//!      ▲ │     completion signal on the            │
//!      └─┘     watched slot (exactly once)         │ requests dropped
//!   accepted request                               ▼
//!   (movetime = 0, settles synchronously)
//! ```

use std::time::{Duration, Instant};

use crate::index::Direction;
use crate::slots::{SlotBuffer, SlotId};
use crate::surface::RenderSurface;

/// Who asked for a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A caller, navigation, pagination or keyboard
    Manual,
    /// The autoplay timer
    Autoplay,
}

/// A request to move to another slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    /// Slide to show; must already be in range
    pub target: usize,
    pub direction: Direction,
    pub origin: Origin,
}

impl MoveRequest {
    pub fn manual(target: usize, direction: Direction) -> Self {
        Self {
            target,
            direction,
            origin: Origin::Manual,
        }
    }

    /// Autoplay always moves forward
    pub fn autoplay(target: usize) -> Self {
        Self {
            target,
            direction: Direction::Forward,
            origin: Origin::Autoplay,
        }
    }
}

/// Why a request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The target is already the active slide
    SameIndex,
    /// Another transition is still running
    Busy,
    /// The slider hasn't been initialized or was destroyed
    NotLive,
    /// The control that asked is switched off
    Disabled,
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing happened
    Dropped(DropReason),
    /// The transition ran to completion within the call
    Completed { from: usize, to: usize },
    /// The transition is waiting for the completion signal on `watched`
    Pending {
        from: usize,
        to: usize,
        watched: SlotId,
    },
}

impl MoveOutcome {
    /// Whether the request started a transition
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Dropped(_))
    }
}

/// A transition that has been accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub origin: Origin,
    pub started_at: Instant,
}

/// Report from the stall watchdog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stall {
    pub target: usize,
    pub elapsed: Duration,
    /// True only for the first report of this transition
    pub first_report: bool,
}

#[derive(Debug, Clone, Copy)]
enum ControllerState {
    Idle,
    Animating {
        transition: Transition,
        watched: SlotId,
        stall_reported: bool,
    },
}

/// Owns the active index and the animation lock
#[derive(Debug, Clone)]
pub struct TransitionController {
    active: usize,
    animates: bool,
    state: ControllerState,
}

impl TransitionController {
    /// Create an idle controller showing `active`
    ///
    /// With `animates` false every accepted move settles synchronously.
    pub fn new(active: usize, animates: bool) -> Self {
        Self {
            active,
            animates,
            state: ControllerState::Idle,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ControllerState::Idle)
    }

    pub fn is_animating(&self) -> bool {
        !self.is_idle()
    }

    /// The transition waiting for its completion signal
    pub fn pending(&self) -> Option<&Transition> {
        match &self.state {
            ControllerState::Animating { transition, .. } => Some(transition),
            ControllerState::Idle => None,
        }
    }

    /// Slot whose completion signal the controller is waiting for
    pub fn watched_slot(&self) -> Option<SlotId> {
        match self.state {
            ControllerState::Animating { watched, .. } => Some(watched),
            ControllerState::Idle => None,
        }
    }

    /// Decide whether a request would be accepted right now
    pub fn admit(&self, request: &MoveRequest) -> Result<(), DropReason> {
        if self.is_animating() {
            return Err(DropReason::Busy);
        }
        if request.target == self.active {
            return Err(DropReason::SameIndex);
        }
        Ok(())
    }

    /// Run an admitted request: rotate roles, repaint, move the active index
    ///
    /// Motion without a direction rotates nothing, so nothing on the surface
    /// would ever signal completion; such moves settle immediately, as do all
    /// moves when animation is disabled.
    pub fn begin<S>(
        &mut self,
        request: MoveRequest,
        slots: &mut SlotBuffer<S::Content>,
        surface: &mut S,
        now: Instant,
    ) -> MoveOutcome
    where
        S: RenderSurface,
    {
        debug_assert!(self.admit(&request).is_ok(), "begin() without admit()");

        let from = self.active;
        let to = request.target;
        let outgoing = slots.rotate(request.direction, surface);
        slots.paint(to, surface);
        self.active = to;

        if self.animates && request.direction != Direction::Unspecified {
            surface.watch_animation(outgoing);
            self.state = ControllerState::Animating {
                transition: Transition {
                    from,
                    to,
                    direction: request.direction,
                    origin: request.origin,
                    started_at: now,
                },
                watched: outgoing,
                stall_reported: false,
            };
            tracing::debug!(from, to, ?outgoing, "transition started, awaiting completion");
            MoveOutcome::Pending {
                from,
                to,
                watched: outgoing,
            }
        } else {
            slots.reveal(surface);
            tracing::debug!(from, to, "transition settled synchronously");
            MoveOutcome::Completed { from, to }
        }
    }

    /// Handle a completion signal from `slot`
    ///
    /// Only the signal from the watched slot of the running transition counts;
    /// stray or repeated signals are ignored. Returns the finished transition.
    pub fn complete<S>(
        &mut self,
        slot: SlotId,
        slots: &mut SlotBuffer<S::Content>,
        surface: &mut S,
    ) -> Option<Transition>
    where
        S: RenderSurface,
    {
        let ControllerState::Animating {
            transition,
            watched,
            ..
        } = self.state
        else {
            tracing::trace!(?slot, "completion signal while idle, ignored");
            return None;
        };
        if watched != slot {
            tracing::trace!(?slot, ?watched, "completion signal from unwatched slot, ignored");
            return None;
        }

        slots.reveal(surface);
        self.state = ControllerState::Idle;
        tracing::debug!(index = transition.to, "transition completed");
        Some(transition)
    }

    /// Check whether the running transition has waited longer than `timeout`
    pub fn check_stall(&mut self, now: Instant, timeout: Duration) -> Option<Stall> {
        let ControllerState::Animating {
            transition,
            stall_reported,
            ..
        } = &mut self.state
        else {
            return None;
        };

        let elapsed = now.saturating_duration_since(transition.started_at);
        if elapsed < timeout {
            return None;
        }

        let first_report = !*stall_reported;
        *stall_reported = true;
        Some(Stall {
            target: transition.to,
            elapsed,
            first_report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SlotRole;
    use crate::surface::RecordingSurface;

    fn setup(
        len: usize,
        active: usize,
        animates: bool,
    ) -> (
        TransitionController,
        SlotBuffer<usize>,
        RecordingSurface<usize>,
    ) {
        let slots = SlotBuffer::new((0..len).collect()).unwrap();
        let mut surface = RecordingSurface::new(100.0);
        slots.apply_roles(&mut surface);
        slots.paint(active, &mut surface);
        (TransitionController::new(active, animates), slots, surface)
    }

    #[test]
    fn test_same_index_dropped() {
        let (controller, _, _) = setup(3, 1, true);
        assert_eq!(
            controller.admit(&MoveRequest::manual(1, Direction::Forward)),
            Err(DropReason::SameIndex)
        );
    }

    #[test]
    fn test_synchronous_when_not_animating() {
        let (mut controller, mut slots, mut surface) = setup(5, 2, false);
        let request = MoveRequest::manual(3, Direction::Forward);

        controller.admit(&request).unwrap();
        let outcome = controller.begin(request, &mut slots, &mut surface, Instant::now());

        assert_eq!(outcome, MoveOutcome::Completed { from: 2, to: 3 });
        assert!(controller.is_idle());
        assert_eq!(controller.active_index(), 3);
        assert_eq!(surface.content_for_role(SlotRole::Current), Some(&3));
        assert!(SlotId::ALL.iter().all(|&s| !surface.is_hidden(s)));
        assert_eq!(surface.watched(), None);
    }

    #[test]
    fn test_busy_until_watched_slot_completes() {
        let (mut controller, mut slots, mut surface) = setup(5, 0, true);
        let outgoing = slots.slot_for(SlotRole::Current);
        let request = MoveRequest::manual(1, Direction::Forward);

        controller.admit(&request).unwrap();
        let outcome = controller.begin(request, &mut slots, &mut surface, Instant::now());
        assert_eq!(
            outcome,
            MoveOutcome::Pending {
                from: 0,
                to: 1,
                watched: outgoing
            }
        );
        assert_eq!(surface.watched(), Some(outgoing));

        assert_eq!(
            controller.admit(&MoveRequest::manual(2, Direction::Forward)),
            Err(DropReason::Busy)
        );

        // A signal from some other slot doesn't unlock
        let other = slots.slot_for(SlotRole::Next);
        assert!(controller.complete(other, &mut slots, &mut surface).is_none());
        assert!(controller.is_animating());

        let done = controller.complete(outgoing, &mut slots, &mut surface).unwrap();
        assert_eq!(done.to, 1);
        assert!(controller.is_idle());
        assert!(SlotId::ALL.iter().all(|&s| !slots.is_hidden(s)));

        // Fires exactly once
        assert!(controller.complete(outgoing, &mut slots, &mut surface).is_none());
    }

    #[test]
    fn test_unspecified_direction_settles() {
        let (mut controller, mut slots, mut surface) = setup(4, 0, true);
        let request = MoveRequest::manual(2, Direction::Unspecified);

        let outcome = controller.begin(request, &mut slots, &mut surface, Instant::now());

        assert_eq!(outcome, MoveOutcome::Completed { from: 0, to: 2 });
        assert!(controller.is_idle());
        assert_eq!(surface.content_for_role(SlotRole::Current), Some(&2));
    }

    #[test]
    fn test_stall_reported_once() {
        let (mut controller, mut slots, mut surface) = setup(3, 0, true);
        let t0 = Instant::now();
        controller.begin(
            MoveRequest::manual(2, Direction::Backward),
            &mut slots,
            &mut surface,
            t0,
        );

        let timeout = Duration::from_millis(1500);
        assert!(controller
            .check_stall(t0 + Duration::from_millis(1000), timeout)
            .is_none());

        let first = controller.check_stall(t0 + timeout, timeout).unwrap();
        assert!(first.first_report);
        assert_eq!(first.target, 2);

        let second = controller
            .check_stall(t0 + timeout * 2, timeout)
            .unwrap();
        assert!(!second.first_report);
    }
}
