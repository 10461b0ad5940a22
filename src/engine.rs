//! Animation scheduling engine.
//!
//! Owns a queue of [`Animation`]s and advances them against a borrowed
//! [`TimeSource`]. Each [`update`](AnimationEngine::update) call is one
//! scheduling tick: every non-pending animation is advanced in queue order,
//! each touched strip is flushed exactly once, and finished animations are
//! evicted after their final advance at progress 1, so the terminal color
//! is rendered exactly once.

use heapless::Vec;

use crate::animation::Animation;
use crate::strip::{LedStrip, SharedStrip, same_strip};
use crate::time::{TimeInstant, TimeSource};

/// Errors that can occur during engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// The animation queue is at capacity.
    QueueFull,
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::QueueFull => write!(f, "animation queue is full"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Drives up to `N` concurrently running animations.
///
/// The host program calls [`update`](Self::update) from a single repeating
/// loop and re-seeds the queue once [`is_empty`](Self::is_empty) reports
/// true. Animations are independent; no ordering is guaranteed beyond "all
/// due animations advance once per tick, in queue order, before any strip
/// is flushed".
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `'a` - Lifetime of the strips targeted by queued animations
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `N` - Maximum number of queued animations
pub struct AnimationEngine<'t, 'a, I: TimeInstant, T: TimeSource<I>, const N: usize> {
    time_source: &'t T,
    queue: Vec<Animation<'a, I>, N>,
}

impl<'t, 'a, I: TimeInstant, T: TimeSource<I>, const N: usize>
    AnimationEngine<'t, 'a, I, T, N>
{
    /// Creates an engine with an empty queue.
    pub fn new(time_source: &'t T) -> Self {
        Self {
            time_source,
            queue: Vec::new(),
        }
    }

    /// Enqueues an animation, taking ownership of it.
    pub fn add(&mut self, animation: Animation<'a, I>) -> Result<(), EngineError> {
        self.queue.push(animation).map_err(|_| EngineError::QueueFull)
    }

    /// True when no animations are queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued animations.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Discards every queued animation without running its terminal update.
    ///
    /// Pixels may be left mid-fade; callers wanting the end states rendered
    /// must let the queue drain instead.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Runs one scheduling tick.
    ///
    /// Reads the time once, advances every non-pending animation in queue
    /// order, flushes each strip touched this tick exactly once (however
    /// many animations targeted it), then evicts animations whose end time
    /// has passed.
    pub fn update(&mut self) {
        let now = self.time_source.now();

        let mut touched: Vec<SharedStrip<'a>, N> = Vec::new();

        for animation in self.queue.iter_mut() {
            if animation.is_pending(now) {
                continue;
            }

            animation.advance(now);

            let target = animation.target();
            if !touched.iter().any(|&strip| same_strip(strip, target)) {
                touched.push(target).ok();
            }
        }

        for strip in &touched {
            strip.borrow_mut().update_leds();
        }

        self.queue.retain(|animation| !animation.is_finished(now));
    }
}
