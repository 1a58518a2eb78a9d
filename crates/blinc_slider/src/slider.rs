//! The slider widget
//!
//! [`Slider`] ties the pieces together: the slot buffer it paints, the
//! transition controller that owns the active index and the animation lock,
//! the autoplay timer, the sizing coordinator and the event emitter.
//!
//! Everything runs on the host's event loop. The host forwards calls and
//! input, reports animation completion with
//! [`animation_finished`](Slider::animation_finished), reports resizes with
//! [`on_resize`](Slider::on_resize), and calls [`tick`](Slider::tick)
//! regularly so autoplay and the stall watchdog can run.
//!
//! ```ignore
//! let mut slider = Slider::new(surface, slides, SliderConfig::new().start("last"))?;
//! slider.subscribe(|event| tracing::info!(?event));
//! slider.init();
//!
//! slider.next();
//! // ...later, when the surface finishes the motion:
//! slider.animation_finished(slot);
//! ```

use std::time::Instant;

use crate::autoplay::AutoplayTimer;
use crate::clock::{Clock, SystemClock};
use crate::config::{SliderConfig, StartIndex};
use crate::controls::{ControlAction, Controls, Key};
use crate::error::{Result, SliderError};
use crate::events::{EventEmitter, SliderEvent, SubscriptionId};
use crate::index::{clamp_index, direction_between, predecessor, successor, Direction};
use crate::sizing::{Layout, SizingCoordinator};
use crate::slots::{SlotBuffer, SlotId};
use crate::surface::RenderSurface;
use crate::transition::{DropReason, MoveOutcome, MoveRequest, Origin, TransitionController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Live,
    Destroyed,
}

/// Snapshot of a slider's mutable state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    pub active_index: usize,
    /// A transition is waiting for its completion signal
    pub is_transitioning: bool,
    /// Autoplay was cleared for a manual transition and will resume after it
    pub autoplay_suspended: bool,
    pub autoplay_running: bool,
}

/// A carousel over a fixed list of slides
pub struct Slider<S: RenderSurface, C: Clock = SystemClock> {
    surface: S,
    slots: SlotBuffer<S::Content>,
    config: SliderConfig,
    controller: TransitionController,
    autoplay: AutoplayTimer,
    sizing: SizingCoordinator,
    events: EventEmitter,
    clock: C,
    phase: Phase,
}

impl<S: RenderSurface> Slider<S> {
    /// Create a slider on the system clock
    ///
    /// Nothing is rendered until [`init`](Slider::init).
    pub fn new(surface: S, slides: Vec<S::Content>, config: SliderConfig) -> Result<Self> {
        Self::with_clock(surface, slides, config, SystemClock)
    }
}

impl<S: RenderSurface, C: Clock> Slider<S, C> {
    /// Create a slider driven by `clock`
    ///
    /// Fails only if `slides` is empty. The start index is resolved here.
    pub fn with_clock(
        surface: S,
        slides: Vec<S::Content>,
        config: SliderConfig,
        clock: C,
    ) -> Result<Self> {
        let config = config.validated();
        let slots = SlotBuffer::new(slides)?;
        let start = config.start.resolve(slots.len());
        if let StartIndex::Index(requested) = config.start {
            if i64::try_from(start).ok() != Some(requested) {
                tracing::debug!(requested, start, "start index clamped");
            }
        }

        Ok(Self {
            controller: TransitionController::new(start, config.animates()),
            autoplay: AutoplayTimer::new(config.stop_time()),
            sizing: SizingCoordinator::new(),
            events: EventEmitter::new(),
            surface,
            slots,
            config,
            clock,
            phase: Phase::Created,
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Render the initial slots, start autoplay if enabled, show the widget
    /// and emit [`SliderEvent::Ready`]
    ///
    /// Only the first call has any effect.
    pub fn init(&mut self) {
        if self.phase != Phase::Created {
            tracing::trace!("slider already initialized");
            return;
        }

        let active = self.controller.active_index();
        if self.config.animates() {
            self.surface
                .set_transition_duration(self.config.move_time());
        }
        self.slots.apply_roles(&mut self.surface);
        self.slots.paint(active, &mut self.surface);
        self.sizing.recompute(&self.slots, &mut self.surface);

        self.phase = Phase::Live;
        if self.config.autoplay {
            self.autoplay.start(self.clock.now());
        }

        self.surface.set_visible(true);
        tracing::debug!(
            active,
            slides = self.slots.len(),
            autoplay = self.config.autoplay,
            "slider ready"
        );
        self.events.emit(SliderEvent::Ready { index: active });
    }

    /// Stop autoplay and reject every later move
    pub fn destroy(&mut self) {
        if self.phase == Phase::Destroyed {
            return;
        }
        self.autoplay.stop();
        self.phase = Phase::Destroyed;
        tracing::debug!("slider destroyed");
    }

    pub fn is_live(&self) -> bool {
        self.phase == Phase::Live
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == Phase::Destroyed
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Move to the next slide, wrapping after the last
    pub fn next(&mut self) -> MoveOutcome {
        let target = successor(self.active_index(), self.slide_count());
        self.request(MoveRequest::manual(target, Direction::Forward))
    }

    /// Move to the previous slide, wrapping before the first
    pub fn prev(&mut self) -> MoveOutcome {
        let target = predecessor(self.active_index(), self.slide_count());
        self.request(MoveRequest::manual(target, Direction::Backward))
    }

    /// Jump to a slide, taking the shorter way around
    ///
    /// Out-of-range indices are clamped to the first or last slide.
    pub fn go_to(&mut self, index: i64) -> MoveOutcome {
        let target = clamp_index(index, self.slide_count());
        if i64::try_from(target).ok() != Some(index) {
            tracing::trace!(index, target, "go_to index clamped");
        }
        let direction = direction_between(self.active_index(), target, self.slide_count());
        self.request(MoveRequest::manual(target, direction))
    }

    /// Process a move request
    ///
    /// Requests made while a transition is running, or that wouldn't change
    /// the active slide, are dropped without side effects.
    pub fn request(&mut self, request: MoveRequest) -> MoveOutcome {
        if self.phase != Phase::Live {
            return MoveOutcome::Dropped(DropReason::NotLive);
        }

        let request = MoveRequest {
            target: request.target.min(self.slide_count() - 1),
            ..request
        };
        if let Err(reason) = self.controller.admit(&request) {
            tracing::trace!(?reason, target = request.target, "move dropped");
            return MoveOutcome::Dropped(reason);
        }

        let from = self.active_index();
        let to = request.target;
        match request.direction {
            Direction::Forward => self.events.emit(SliderEvent::NextStarted { from, to }),
            Direction::Backward => self.events.emit(SliderEvent::PrevStarted { from, to }),
            Direction::Unspecified => {}
        }

        let now = self.clock.now();
        let outcome = self
            .controller
            .begin(request, &mut self.slots, &mut self.surface, now);
        self.sizing.recompute(&self.slots, &mut self.surface);

        if request.origin == Origin::Manual && self.autoplay.suspend() {
            tracing::debug!("autoplay suspended for manual transition");
        }

        if let MoveOutcome::Completed { to, .. } = outcome {
            self.finish(to, now);
        }
        outcome
    }

    /// Report that the animation on `slot` finished
    ///
    /// Returns true if this completed the running transition. Signals from
    /// other slots, repeated signals and signals while idle are ignored.
    pub fn animation_finished(&mut self, slot: SlotId) -> bool {
        if self.phase != Phase::Live {
            return false;
        }
        match self
            .controller
            .complete(slot, &mut self.slots, &mut self.surface)
        {
            Some(transition) => {
                let now = self.clock.now();
                self.finish(transition.to, now);
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, index: usize, now: Instant) {
        if self.autoplay.resume(now) {
            tracing::debug!("autoplay resumed");
        }
        self.events.emit(SliderEvent::TransitionEnd { index });
    }

    // =========================================================================
    // Autoplay and time
    // =========================================================================

    /// (Re)start the autoplay timer; the first tick is one period away
    pub fn autoplay(&mut self) {
        if self.phase != Phase::Live {
            return;
        }
        self.autoplay.start(self.clock.now());
        tracing::debug!(period = ?self.autoplay.period(), "autoplay started");
    }

    /// Stop the autoplay timer, cancelling any pending resume
    pub fn stop_autoplay(&mut self) {
        self.autoplay.stop();
    }

    /// When the next autoplay tick falls due, for hosts scheduling wakeups
    pub fn next_autoplay_due(&self) -> Option<Instant> {
        self.autoplay.next_due()
    }

    /// Run time-driven work: the stall watchdog, then autoplay
    ///
    /// Once a transition has stalled this returns
    /// [`SliderError::TransitionStalled`] on every call; the slider stays
    /// locked. [`SliderEvent::Stalled`] is emitted once.
    pub fn tick(&mut self) -> Result<()> {
        if self.phase != Phase::Live {
            return Ok(());
        }
        let now = self.clock.now();

        if let Some(timeout) = self.config.stall_timeout() {
            if let Some(stall) = self.controller.check_stall(now, timeout) {
                if stall.first_report {
                    tracing::warn!(
                        target_index = stall.target,
                        elapsed = ?stall.elapsed,
                        "transition never completed, slider is locked"
                    );
                    self.events.emit(SliderEvent::Stalled {
                        target: stall.target,
                        elapsed: stall.elapsed,
                    });
                }
                return Err(SliderError::TransitionStalled {
                    target: stall.target,
                    elapsed: stall.elapsed,
                });
            }
        }

        if self.autoplay.poll(now) {
            let target = successor(self.active_index(), self.slide_count());
            let outcome = self.request(MoveRequest::autoplay(target));
            tracing::trace!(?outcome, "autoplay tick");
        }
        Ok(())
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Recompute dimensions after the host element changed size
    pub fn on_resize(&mut self) -> Option<Layout> {
        if self.phase != Phase::Live {
            return None;
        }
        Some(self.sizing.recompute(&self.slots, &mut self.surface))
    }

    /// Handle a key press
    ///
    /// Returns true if the key is bound (the host should then suppress its
    /// default handling), whether or not the move was accepted.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.phase != Phase::Live || !self.config.keyboard {
            return false;
        }
        match key.action() {
            Some(ControlAction::Previous) => {
                self.prev();
                true
            }
            Some(ControlAction::Next) => {
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Controls the host should render
    pub fn controls(&self) -> Controls {
        Controls::describe(
            self.config.navigation,
            self.config.pagination,
            self.slide_count(),
            self.active_index(),
        )
    }

    /// Activate a navigation arrow or pagination indicator
    ///
    /// Actions on controls that are switched off are dropped.
    pub fn activate(&mut self, action: ControlAction) -> MoveOutcome {
        if !self.controls().accepts(action) {
            return MoveOutcome::Dropped(DropReason::Disabled);
        }
        match action {
            ControlAction::Previous => self.prev(),
            ControlAction::Next => self.next(),
            ControlAction::Indicator(index) => {
                self.go_to(i64::try_from(index).unwrap_or(i64::MAX))
            }
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Subscribe to slider events
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SliderEvent) + Send + 'static,
    {
        self.events.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn active_index(&self) -> usize {
        self.controller.active_index()
    }

    pub fn slide_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slides(&self) -> &[S::Content] {
        self.slots.slides()
    }

    /// The slide currently showing
    pub fn current_slide(&self) -> Option<&S::Content> {
        self.slots.slide(self.active_index())
    }

    pub fn state(&self) -> SliderState {
        SliderState {
            active_index: self.active_index(),
            is_transitioning: self.controller.is_animating(),
            autoplay_suspended: self.autoplay.is_suspended(),
            autoplay_running: self.autoplay.is_running(),
        }
    }

    /// Slot whose completion signal is awaited, if a transition is running
    pub fn pending_slot(&self) -> Option<SlotId> {
        self.controller.watched_slot()
    }

    /// Dimensions applied by the last sizing pass
    pub fn layout(&self) -> Option<Layout> {
        self.sizing.layout()
    }

    pub fn slots(&self) -> &SlotBuffer<S::Content> {
        &self.slots
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<S: RenderSurface, C: Clock> std::fmt::Debug for Slider<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("state", &self.state())
            .field("slides", &self.slide_count())
            .field("phase", &self.phase)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
