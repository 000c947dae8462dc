//! Contrast range controls
//!
//! The layer never owns the contrast window. It reads it from a
//! [`ContrastSource`] every time a tile is drawn, so whatever widget the host
//! uses only has to expose the current `[min, max]` pair.

use std::sync::{Arc, RwLock};

use crate::rendering::contrast::ContrastRange;

/// Read-at-draw-time access to the current contrast window.
pub trait ContrastSource: Send + Sync {
    fn range(&self) -> ContrastRange;
}

/// A fixed window
impl ContrastSource for ContrastRange {
    fn range(&self) -> ContrastRange {
        *self
    }
}

impl<T: ContrastSource + ?Sized> ContrastSource for Arc<T> {
    fn range(&self) -> ContrastRange {
        (**self).range()
    }
}

/// Shared two-handle range value, the model behind a range slider.
///
/// Clones share the same value. Handles are kept inside `bounds` and can not
/// cross, so `min <= max` always holds.
#[derive(Debug, Clone)]
pub struct ContrastHandle {
    value: Arc<RwLock<ContrastRange>>,
    bounds: ContrastRange,
}

impl ContrastHandle {
    /// Handle over the 12-bit sample range
    pub fn new(initial: ContrastRange) -> Self {
        Self::with_bounds(initial, ContrastRange::full())
    }

    /// Handle limited to `bounds`. Inverted bounds are swapped; bounds that
    /// are not finite fall back to the 12-bit sample range.
    pub fn with_bounds(initial: ContrastRange, bounds: ContrastRange) -> Self {
        let bounds = if !(bounds.min.is_finite() && bounds.max.is_finite()) {
            log::warn!(
                "contrast bounds [{}, {}] are not finite, using the full sample range",
                bounds.min,
                bounds.max
            );
            ContrastRange::full()
        } else if bounds.min <= bounds.max {
            bounds
        } else {
            ContrastRange::new(bounds.max, bounds.min)
        };
        let handle = Self {
            value: Arc::new(RwLock::new(bounds)),
            bounds,
        };
        handle.set(initial.min, initial.max);
        handle
    }

    pub fn bounds(&self) -> ContrastRange {
        self.bounds
    }

    pub fn get(&self) -> ContrastRange {
        match self.value.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Move both handles. Returns `true` when the stored window changed, which
    /// is the host's cue to redraw.
    pub fn set(&self, min: f64, max: f64) -> bool {
        let min = self.clamp(min);
        let max = self.clamp(max).max(min);
        let next = ContrastRange::new(min, max);

        let mut guard = match self.value.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *guard == next {
            return false;
        }
        log::debug!("contrast window set to [{}, {}]", next.min, next.max);
        *guard = next;
        true
    }

    fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.bounds.min
        } else {
            value.clamp(self.bounds.min, self.bounds.max)
        }
    }
}

impl Default for ContrastHandle {
    fn default() -> Self {
        Self::new(ContrastRange::full())
    }
}

impl ContrastSource for ContrastHandle {
    fn range(&self) -> ContrastRange {
        self.get()
    }
}
