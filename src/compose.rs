//! Composition adapters: strips built from other strips.
//!
//! Each adapter is itself a readable strip and holds non-owning
//! [`SharedStrip`] handles to its backing strips. Composition is purely
//! structural: no adapter caches pixel state, so a write through one
//! adapter is immediately visible through any other handle to the same
//! backing strip. The one deliberate exception is
//! [`PowerLimitedStrip`](crate::power::PowerLimitedStrip), which buffers
//! desired state on purpose.

use heapless::Vec;

use crate::color::Rgbw;
use crate::strip::{LedStrip, ReadableLedStrip, SharedStrip};

/// Identity adapter forwarding every operation to its backing strip.
pub struct PassthroughStrip<'a> {
    base: SharedStrip<'a>,
}

impl<'a> PassthroughStrip<'a> {
    pub fn new(base: SharedStrip<'a>) -> Self {
        Self { base }
    }
}

impl LedStrip for PassthroughStrip<'_> {
    fn led_count(&self) -> usize {
        self.base.borrow().led_count()
    }

    fn set_led(&mut self, index: usize, color: Rgbw, flush: bool) {
        self.base.borrow_mut().set_led(index, color, flush);
    }

    fn update_leds(&mut self) {
        self.base.borrow_mut().update_leds();
    }
}

impl ReadableLedStrip for PassthroughStrip<'_> {
    fn led(&self, index: usize) -> Rgbw {
        self.base.borrow().led(index)
    }
}

/// Addresses an arbitrary, possibly reordered subset of a backing strip.
///
/// Holds an explicit ordered list of backing indices; index `i` of this
/// strip operates on backing index `list[i]`.
pub struct MappedStrip<'a, const N: usize> {
    base: SharedStrip<'a>,
    indices: Vec<usize, N>,
}

impl<'a, const N: usize> MappedStrip<'a, N> {
    /// Creates a mapped strip over the given backing indices.
    ///
    /// # Panics
    /// Panics if `indices` has more than `N` entries.
    pub fn new(base: SharedStrip<'a>, indices: &[usize]) -> Self {
        let Ok(indices) = Vec::from_slice(indices) else {
            panic!("index list exceeds mapped strip capacity");
        };

        Self { base, indices }
    }
}

impl<const N: usize> LedStrip for MappedStrip<'_, N> {
    fn led_count(&self) -> usize {
        self.indices.len()
    }

    fn set_led(&mut self, index: usize, color: Rgbw, flush: bool) {
        self.base.borrow_mut().set_led(self.indices[index], color, flush);
    }

    fn update_leds(&mut self) {
        self.base.borrow_mut().update_leds();
    }
}

impl<const N: usize> ReadableLedStrip for MappedStrip<'_, N> {
    fn led(&self, index: usize) -> Rgbw {
        self.base.borrow().led(self.indices[index])
    }
}

/// Reverses the index space of its backing strip: index `i` maps to
/// `backing_count - 1 - i`.
pub struct InvertedStrip<'a> {
    base: SharedStrip<'a>,
}

impl<'a> InvertedStrip<'a> {
    pub fn new(base: SharedStrip<'a>) -> Self {
        Self { base }
    }

    fn backing_index(&self, index: usize) -> usize {
        let count = self.base.borrow().led_count();
        assert!(index < count, "led index out of range");
        count - 1 - index
    }
}

impl LedStrip for InvertedStrip<'_> {
    fn led_count(&self) -> usize {
        self.base.borrow().led_count()
    }

    fn set_led(&mut self, index: usize, color: Rgbw, flush: bool) {
        let backing = self.backing_index(index);
        self.base.borrow_mut().set_led(backing, color, flush);
    }

    fn update_leds(&mut self) {
        self.base.borrow_mut().update_leds();
    }
}

impl ReadableLedStrip for InvertedStrip<'_> {
    fn led(&self, index: usize) -> Rgbw {
        let backing = self.backing_index(index);
        self.base.borrow().led(backing)
    }
}

/// Concatenates up to `MAX_SEGMENTS` strips into one contiguous index space.
///
/// Index `i` is located by walking the segments in push order, subtracting
/// each segment's count until `i` falls within one; read and write use the
/// same walk. Flushing forwards to every segment unconditionally; per-tick
/// flush batching across a composite is the scheduling engine's job, not
/// this adapter's.
pub struct MultiStrip<'a, const MAX_SEGMENTS: usize> {
    segments: Vec<SharedStrip<'a>, MAX_SEGMENTS>,
}

impl<'a, const MAX_SEGMENTS: usize> MultiStrip<'a, MAX_SEGMENTS> {
    /// Creates a concatenation of the given strips, in order.
    ///
    /// # Panics
    /// Panics if more than `MAX_SEGMENTS` strips are given.
    pub fn new(segments: &[SharedStrip<'a>]) -> Self {
        let Ok(segments) = Vec::from_slice(segments) else {
            panic!("segment list exceeds multi strip capacity");
        };

        Self { segments }
    }

    /// Resolves a composite index to `(segment, local index)`.
    ///
    /// # Panics
    /// Panics if `index` is beyond the combined count.
    pub fn locate(&self, mut index: usize) -> (SharedStrip<'a>, usize) {
        for &segment in &self.segments {
            let count = segment.borrow().led_count();
            if index < count {
                return (segment, index);
            }
            index -= count;
        }

        panic!("led index out of range");
    }
}

impl<const MAX_SEGMENTS: usize> LedStrip for MultiStrip<'_, MAX_SEGMENTS> {
    fn led_count(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| segment.borrow().led_count())
            .sum()
    }

    fn set_led(&mut self, index: usize, color: Rgbw, flush: bool) {
        let (segment, local) = self.locate(index);
        segment.borrow_mut().set_led(local, color, flush);
    }

    fn update_leds(&mut self) {
        for segment in &self.segments {
            segment.borrow_mut().update_leds();
        }
    }
}

impl<const MAX_SEGMENTS: usize> ReadableLedStrip for MultiStrip<'_, MAX_SEGMENTS> {
    fn led(&self, index: usize) -> Rgbw {
        let (segment, local) = self.locate(index);
        segment.borrow().led(local)
    }
}
