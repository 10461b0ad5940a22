//! LED surface abstraction.
//!
//! Two capability traits split write access from readback: [`LedStrip`] is
//! the write-and-flush contract every transport can offer, while
//! [`ReadableLedStrip`] adds per-pixel readback for transports and buffers
//! that can report their state. Composition adapters and animations hold
//! non-owning [`SharedStrip`] handles; the host owns the concrete strips
//! inside `RefCell`s, so writes through one handle are immediately visible
//! through every other handle to the same strip.
//!
//! Index arguments must be within `[0, led_count())`. Out-of-range indices
//! are caller errors and panic; this is a microcontroller-class system and
//! bounds are part of the caller contract, not a recoverable condition.

use core::cell::RefCell;

use crate::color::Rgbw;

/// Shared handle to a strip, as held by composition adapters and animations.
///
/// The referenced `RefCell` is owned by the host configuration and must
/// outlive every handle. Borrows are taken only for the duration of a single
/// operation, so distinct strips may be freely layered.
pub type SharedStrip<'a> = &'a RefCell<dyn ReadableLedStrip + 'a>;

/// Write-and-flush capability of an addressable LED surface.
pub trait LedStrip {
    /// Number of addressable LEDs. Fixed for the lifetime of the strip.
    fn led_count(&self) -> usize;

    /// Sets one LED in the buffered state, pushing to the device immediately
    /// when `flush` is set.
    fn set_led(&mut self, index: usize, color: Rgbw, flush: bool);

    /// Commits buffered pixel state to the backing representation
    /// (another strip, or physical hardware).
    fn update_leds(&mut self);

    /// Sets `count` LEDs starting at `start` to `color`, flushing once at
    /// the end when requested.
    fn set_range(&mut self, start: usize, count: usize, color: Rgbw, flush: bool) {
        for i in 0..count {
            self.set_led(start + i, color, false);
        }

        if flush {
            self.update_leds();
        }
    }

    /// Sets every LED to `color`.
    fn set_all(&mut self, color: Rgbw, flush: bool) {
        self.set_range(0, self.led_count(), color, flush);
    }

    /// Turns every LED off.
    fn clear(&mut self, flush: bool) {
        self.set_all(Rgbw::OFF, flush);
    }
}

/// Readback capability on top of [`LedStrip`].
pub trait ReadableLedStrip: LedStrip {
    /// Returns the buffered color of one LED.
    fn led(&self, index: usize) -> Rgbw;

    /// True if any LED differs from the all-zero color.
    fn is_any_active(&self) -> bool {
        (0..self.led_count()).any(|i| self.led(i) != Rgbw::OFF)
    }

    /// Copies `min(self.led_count(), target.led_count())` pixels into
    /// `target` starting at index 0, flushing the target once at the end
    /// when requested.
    fn copy_to(&self, target: &mut dyn LedStrip, flush: bool) {
        let count = self.led_count().min(target.led_count());

        for i in 0..count {
            target.set_led(i, self.led(i), false);
        }

        if flush {
            target.update_leds();
        }
    }
}

/// Returns true when both handles refer to the same strip object.
pub(crate) fn same_strip(a: SharedStrip<'_>, b: SharedStrip<'_>) -> bool {
    // Compare object addresses only; fat-pointer equality would also compare
    // vtable pointers, which are not unique per type.
    core::ptr::addr_eq(a as *const _, b as *const _)
}

/// In-memory pixel store.
///
/// Implements both strip capabilities with a no-op flush. Serves as the
/// desired-state buffer inside [`PowerLimitedStrip`](crate::power::PowerLimitedStrip)
/// and as a plain backing strip in host configurations and tests.
#[derive(Debug, Clone)]
pub struct LedBuffer<const N: usize> {
    pixels: [Rgbw; N],
}

impl<const N: usize> LedBuffer<N> {
    /// Creates a buffer with every pixel off.
    pub const fn new() -> Self {
        Self {
            pixels: [Rgbw::OFF; N],
        }
    }
}

impl<const N: usize> Default for LedBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LedStrip for LedBuffer<N> {
    fn led_count(&self) -> usize {
        N
    }

    fn set_led(&mut self, index: usize, color: Rgbw, _flush: bool) {
        self.pixels[index] = color;
    }

    fn update_leds(&mut self) {
        // Only a storage, nothing to push.
    }
}

impl<const N: usize> ReadableLedStrip for LedBuffer<N> {
    fn led(&self, index: usize) -> Rgbw {
        self.pixels[index]
    }
}
