//! Slider notifications
//!
//! Observers subscribe with a callback and get a [`SubscriptionId`] back for
//! unsubscribing. Callbacks run synchronously, at the moment the slider
//! changes state.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`EventEmitter::subscribe`]
    pub struct SubscriptionId;
}

/// Something observable happened to a slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderEvent {
    /// Initialization finished and the widget is visible
    Ready { index: usize },
    /// A transition toward a later slide started
    NextStarted { from: usize, to: usize },
    /// A transition toward an earlier slide started
    PrevStarted { from: usize, to: usize },
    /// The running transition finished; `index` is now active
    TransitionEnd { index: usize },
    /// A transition's completion signal never arrived
    Stalled { target: usize, elapsed: Duration },
}

type Listener = Box<dyn FnMut(&SliderEvent) + Send>;

/// Dispatches [`SliderEvent`]s to subscribers
#[derive(Default)]
pub struct EventEmitter {
    listeners: SlotMap<SubscriptionId, Listener>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every event
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SliderEvent) + Send + 'static,
    {
        self.listeners.insert(Box::new(callback))
    }

    /// Remove a callback; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver an event to every subscriber
    pub fn emit(&mut self, event: SliderEvent) {
        tracing::trace!(?event, "slider event");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_subscribers_receive_events() {
        let mut emitter = EventEmitter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        emitter.subscribe(move |event| seen_clone.lock().unwrap().push(*event));
        emitter.emit(SliderEvent::Ready { index: 0 });
        emitter.emit(SliderEvent::TransitionEnd { index: 1 });

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                SliderEvent::Ready { index: 0 },
                SliderEvent::TransitionEnd { index: 1 }
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut emitter = EventEmitter::new();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();

        let id = emitter.subscribe(move |_| *count_clone.lock().unwrap() += 1);
        emitter.emit(SliderEvent::Ready { index: 0 });

        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        emitter.emit(SliderEvent::Ready { index: 0 });

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(emitter.listener_count(), 0);
    }
}
