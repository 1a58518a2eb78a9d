//! Slider registry
//!
//! Maps host elements to the slider mounted on them. An element carries at
//! most one slider; mounting again on the same element returns the existing
//! slider's id and never builds a second one.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, SliderError};
use crate::slider::Slider;
use crate::surface::RenderSurface;

new_key_type! {
    /// Identifies a mounted slider
    pub struct SliderId;
}

/// Opaque host-side identity of an element (a DOM node, a layout node id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u64);

struct Entry<S: RenderSurface, C: Clock> {
    element: ElementHandle,
    slider: Slider<S, C>,
}

/// All sliders mounted by a host
pub struct SliderRegistry<S: RenderSurface, C: Clock = SystemClock> {
    sliders: SlotMap<SliderId, Entry<S, C>>,
    by_element: FxHashMap<ElementHandle, SliderId>,
}

impl<S: RenderSurface, C: Clock> Default for SliderRegistry<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RenderSurface, C: Clock> SliderRegistry<S, C> {
    pub fn new() -> Self {
        Self {
            sliders: SlotMap::with_key(),
            by_element: FxHashMap::default(),
        }
    }

    /// Mount a slider on `element`
    ///
    /// `build` runs only if the element has no slider yet; the new slider is
    /// initialized before this returns. Errors from `build` are passed on
    /// and leave the registry unchanged.
    pub fn mount<F>(&mut self, element: ElementHandle, build: F) -> Result<SliderId>
    where
        F: FnOnce() -> Result<Slider<S, C>>,
    {
        if let Some(&id) = self.by_element.get(&element) {
            tracing::debug!(?element, "element already has a slider");
            return Ok(id);
        }

        let mut slider = build()?;
        slider.init();
        let id = self.sliders.insert(Entry { element, slider });
        self.by_element.insert(element, id);
        tracing::debug!(?element, ?id, "slider mounted");
        Ok(id)
    }

    /// Destroy and remove the slider on `element`
    pub fn unmount(&mut self, element: ElementHandle) -> Option<Slider<S, C>> {
        let id = self.by_element.remove(&element)?;
        let mut entry = self.sliders.remove(id)?;
        entry.slider.destroy();
        tracing::debug!(?element, "slider unmounted");
        Some(entry.slider)
    }

    /// Slider mounted on `element`
    pub fn find(&self, element: ElementHandle) -> Option<SliderId> {
        self.by_element.get(&element).copied()
    }

    pub fn get(&self, id: SliderId) -> Option<&Slider<S, C>> {
        self.sliders.get(id).map(|entry| &entry.slider)
    }

    pub fn get_mut(&mut self, id: SliderId) -> Option<&mut Slider<S, C>> {
        self.sliders.get_mut(id).map(|entry| &mut entry.slider)
    }

    pub fn contains(&self, element: ElementHandle) -> bool {
        self.by_element.contains_key(&element)
    }

    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }

    /// Iterate over mounted sliders and their elements
    pub fn iter(&self) -> impl Iterator<Item = (ElementHandle, &Slider<S, C>)> {
        self.sliders
            .values()
            .map(|entry| (entry.element, &entry.slider))
    }

    /// Tick every slider, collecting the failures
    pub fn tick_all(&mut self) -> SmallVec<[(ElementHandle, SliderError); 2]> {
        let mut failures = SmallVec::new();
        for entry in self.sliders.values_mut() {
            if let Err(err) = entry.slider.tick() {
                failures.push((entry.element, err));
            }
        }
        failures
    }
}

impl<S: RenderSurface, C: Clock> std::fmt::Debug for SliderRegistry<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderRegistry")
            .field("sliders", &self.sliders.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderConfig;
    use crate::surface::RecordingSurface;

    type Registry = SliderRegistry<RecordingSurface<&'static str>>;

    fn build() -> Result<Slider<RecordingSurface<&'static str>>> {
        Slider::new(
            RecordingSurface::new(320.0),
            vec!["a", "b", "c"],
            SliderConfig::new().autoplay(false),
        )
    }

    #[test]
    fn test_mount_initializes() {
        let mut registry = Registry::new();
        let id = registry.mount(ElementHandle(1), build).unwrap();

        let slider = registry.get(id).unwrap();
        assert!(slider.is_live());
        assert!(slider.surface().is_visible());
        assert_eq!(registry.find(ElementHandle(1)), Some(id));
    }

    #[test]
    fn test_double_mount_keeps_first_slider() {
        let mut registry = Registry::new();
        let first = registry.mount(ElementHandle(7), build).unwrap();

        let mut built = false;
        let second = registry
            .mount(ElementHandle(7), || {
                built = true;
                build()
            })
            .unwrap();

        assert_eq!(first, second);
        assert!(!built);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_failed_build_leaves_registry_unchanged() {
        let mut registry = Registry::new();
        let result = registry.mount(ElementHandle(3), || {
            Slider::new(RecordingSurface::new(100.0), Vec::new(), SliderConfig::new())
        });

        assert!(matches!(result, Err(SliderError::EmptySlides)));
        assert!(registry.is_empty());
        assert!(!registry.contains(ElementHandle(3)));
    }

    #[test]
    fn test_unmount_destroys() {
        let mut registry = Registry::new();
        let id = registry.mount(ElementHandle(2), build).unwrap();

        let slider = registry.unmount(ElementHandle(2)).unwrap();
        assert!(slider.is_destroyed());
        assert!(registry.get(id).is_none());
        assert!(registry.unmount(ElementHandle(2)).is_none());

        // The element can take a fresh slider afterwards
        let again = registry.mount(ElementHandle(2), build).unwrap();
        assert_ne!(again, id);
    }
}
