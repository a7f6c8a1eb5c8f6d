//! Scroll offset stream and collapse progress.
//!
//! Two pieces live here:
//! - [`ScrollSource`] - the host scroll container's offset stream. Listeners
//!   are called synchronously from [`ScrollSource::emit`].
//! - [`ScrollOffsetTracker`] - turns raw vertical offsets into a normalized
//!   [`CollapseProgress`] over a collapse distance `D`.
//!
//! ```
//! use spark_header::ScrollOffsetTracker;
//!
//! let mut tracker = ScrollOffsetTracker::new(100.0).unwrap();
//! assert_eq!(tracker.update(50.0).value(), 0.5);
//! assert_eq!(tracker.update(250.0).value(), 1.0);
//! assert_eq!(tracker.update(-30.0).value(), 0.0);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::error::ConfigError;

/// Distance over which a platform-default large title collapses
/// (96pt expanded bar minus 44pt compact bar).
pub const DEFAULT_COLLAPSE_DISTANCE: f32 = 52.0;

// =============================================================================
// CollapseProgress
// =============================================================================

/// Normalized collapse progress in `[0, 1]`.
///
/// 0 = large title fully visible, 1 = compact title fully visible.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct CollapseProgress(f32);

impl CollapseProgress {
    pub const EXPANDED: Self = Self(0.0);
    pub const COLLAPSED: Self = Self(1.0);

    /// Clamp a raw value into `[0, 1]`. NaN maps to 0.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::EXPANDED;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// `clamp(offset / distance, 0, 1)`.
    ///
    /// `distance` must already be validated as positive.
    #[inline]
    pub fn from_offset(offset_y: f32, distance: f32) -> Self {
        if offset_y.is_nan() {
            return Self::EXPANDED;
        }
        Self::new(offset_y / distance)
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    pub fn phase(self) -> CollapsePhase {
        if self.0 <= 0.0 {
            CollapsePhase::Expanded
        } else if self.0 >= 1.0 {
            CollapsePhase::Collapsed
        } else {
            CollapsePhase::Collapsing
        }
    }
}

/// Conceptual states of the continuous collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollapsePhase {
    Expanded,
    Collapsing,
    Collapsed,
}

// =============================================================================
// ScrollSource
// =============================================================================

type OffsetListener = Rc<RefCell<dyn FnMut(f32)>>;

#[derive(Default)]
struct SourceInner {
    next_id: u64,
    listeners: Vec<(u64, OffsetListener)>,
}

impl SourceInner {
    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(i, _)| *i == id)
    }
}

/// Live handle to a scroll container's vertical offset stream.
///
/// Cloning yields another handle to the same stream.
#[derive(Clone, Default)]
pub struct ScrollSource {
    inner: Rc<RefCell<SourceInner>>,
}

impl ScrollSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the returned
    /// subscription is cancelled or dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl FnMut(f32) + 'static) -> ScrollSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(RefCell::new(listener))));

        ScrollSubscription {
            id,
            source: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver one scroll event to every listener, in subscription order.
    ///
    /// A listener cancelled by an earlier listener in the same dispatch is
    /// skipped. A listener already running (re-entrant emit) is skipped.
    pub fn emit(&self, offset_y: f32) {
        let snapshot: Vec<(u64, OffsetListener)> = self.inner.borrow().listeners.clone();

        for (id, listener) in snapshot {
            if !self.inner.borrow().contains(id) {
                continue;
            }
            if let Ok(mut listener) = listener.try_borrow_mut() {
                (&mut *listener)(offset_y);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Registration on a [`ScrollSource`]. Dropping it unsubscribes.
pub struct ScrollSubscription {
    id: u64,
    source: Weak<RefCell<SourceInner>>,
}

impl ScrollSubscription {
    /// Remove the listener now.
    pub fn cancel(self) {
        // Drop does the work.
    }

    /// False once the source itself is gone.
    pub fn is_active(&self) -> bool {
        self.source
            .upgrade()
            .is_some_and(|inner| inner.borrow().contains(self.id))
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.source.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

// =============================================================================
// ScrollOffsetTracker
// =============================================================================

/// Identifies a progress listener on a [`ScrollOffsetTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Converts raw scroll offsets into collapse progress.
pub struct ScrollOffsetTracker {
    distance: f32,
    last_offset: f32,
    progress: CollapseProgress,
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn FnMut(CollapseProgress)>)>,
}

impl ScrollOffsetTracker {
    /// Create a tracker collapsing over `distance` points.
    ///
    /// Fails with [`ConfigError::NonPositiveCollapseDistance`] unless the
    /// distance is finite and greater than zero.
    pub fn new(distance: f32) -> Result<Self, ConfigError> {
        validate_distance(distance)?;
        Ok(Self {
            distance,
            last_offset: 0.0,
            progress: CollapseProgress::EXPANDED,
            next_id: 0,
            listeners: Vec::new(),
        })
    }

    /// Handle one scroll event.
    ///
    /// Listeners receive the new progress before this returns.
    pub fn update(&mut self, raw_offset_y: f32) -> CollapseProgress {
        self.last_offset = raw_offset_y;
        self.progress = CollapseProgress::from_offset(raw_offset_y, self.distance);
        trace!(offset = raw_offset_y, progress = self.progress.value(), "scroll tick");

        for (_, listener) in &mut self.listeners {
            listener(self.progress);
        }
        self.progress
    }

    /// Change `D`, re-deriving progress from the last seen offset.
    ///
    /// Listeners are not notified; the caller recomputes.
    pub fn set_collapse_distance(
        &mut self,
        distance: f32,
    ) -> Result<CollapseProgress, ConfigError> {
        validate_distance(distance)?;
        self.distance = distance;
        self.progress = CollapseProgress::from_offset(self.last_offset, distance);
        Ok(self.progress)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(CollapseProgress) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(i, _)| *i != id);
        self.listeners.len() != before
    }

    pub fn progress(&self) -> CollapseProgress {
        self.progress
    }

    pub fn collapse_distance(&self) -> f32 {
        self.distance
    }

    pub fn last_offset(&self) -> f32 {
        self.last_offset
    }
}

fn validate_distance(distance: f32) -> Result<(), ConfigError> {
    if distance.is_finite() && distance > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveCollapseDistance { distance })
    }
}
