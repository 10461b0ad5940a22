//! Cross-fade between two whole strip states.
//!
//! A [`CrossFadeHandler`] owns two in-memory pixel layers and blends them
//! into a target strip by a single factor: factor `0.0` renders the first
//! layer, `1.0` the second, anything between a per-pixel interpolation of
//! both. Typical use is scene transitions, where the host composes the next
//! scene in the hidden layer and then sweeps the factor across.

use crate::color::Rgbw;
use crate::strip::{LedBuffer, LedStrip, ReadableLedStrip, SharedStrip};

/// Blends two buffered strip states into a target strip.
///
/// The layers are plain [`LedBuffer`]s; the host writes them through the
/// mutable accessors and renders via [`update_leds`](Self::update_leds) or
/// by changing the factor with flush. Nothing reaches the target until a
/// render is requested.
pub struct CrossFadeHandler<'a, const N: usize> {
    target: SharedStrip<'a>,
    factor: f32,
    from: LedBuffer<N>,
    to: LedBuffer<N>,
}

impl<'a, const N: usize> CrossFadeHandler<'a, N> {
    /// Creates a handler with both layers dark.
    ///
    /// `initial_factor` is clamped to `[0, 1]`. The target is not rendered
    /// until the first [`update_leds`](Self::update_leds).
    ///
    /// # Panics
    /// Panics if the target strip has more than `N` LEDs.
    pub fn new(target: SharedStrip<'a>, initial_factor: f32) -> Self {
        assert!(
            target.borrow().led_count() <= N,
            "target strip exceeds layer buffer capacity"
        );

        Self {
            target,
            factor: initial_factor.clamp(0.0, 1.0),
            from: LedBuffer::new(),
            to: LedBuffer::new(),
        }
    }

    /// The layer shown at factor `0.0`.
    pub fn from_layer(&self) -> &LedBuffer<N> {
        &self.from
    }

    /// Mutable access to the layer shown at factor `0.0`.
    pub fn from_layer_mut(&mut self) -> &mut LedBuffer<N> {
        &mut self.from
    }

    /// The layer shown at factor `1.0`.
    pub fn to_layer(&self) -> &LedBuffer<N> {
        &self.to
    }

    /// Mutable access to the layer shown at factor `1.0`.
    pub fn to_layer_mut(&mut self) -> &mut LedBuffer<N> {
        &mut self.to
    }

    /// The current blend factor.
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Changes the blend factor, clamped to `[0, 1]`, re-rendering the
    /// target immediately when `flush` is set.
    pub fn set_factor(&mut self, factor: f32, flush: bool) {
        self.factor = factor.clamp(0.0, 1.0);

        if flush {
            self.update_leds();
        }
    }

    /// Renders the blended state into the target strip and flushes it once.
    pub fn update_leds(&mut self) {
        let mut target = self.target.borrow_mut();

        for i in 0..target.led_count() {
            let mixed = self.from.led(i).interpolate_to(self.to.led(i), self.factor);
            target.set_led(i, mixed, false);
        }

        target.update_leds();
    }
}
