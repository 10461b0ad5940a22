//! Power-limited strip: keeps the rendered power draw of a backing strip
//! under a configurable milliamp ceiling.

use crate::color::Rgbw;
use crate::strip::{LedBuffer, LedStrip, ReadableLedStrip, SharedStrip};

/// Brightness step removed from each reducible pixel per reduction pass.
const REDUCE_STEP: u16 = 10;

/// Linear per-LED power model.
///
/// Estimated draw is a fixed base per LED, plus each color channel's share
/// of `color_channel_max_ma` and the white channel's share of
/// `white_channel_max_ma`, scaled linearly by channel value / 255.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerModel {
    /// Draw of an LED with all channels off, in mA.
    pub base_ma: f32,
    /// Draw of one color channel at full value, in mA.
    pub color_channel_max_ma: f32,
    /// Draw of the white channel at full value, in mA.
    pub white_channel_max_ma: f32,
}

impl PowerModel {
    pub const fn new(base_ma: f32, color_channel_max_ma: f32, white_channel_max_ma: f32) -> Self {
        Self {
            base_ma,
            color_channel_max_ma,
            white_channel_max_ma,
        }
    }

    fn color_channel_ma(&self, value: u8) -> f32 {
        f32::from(value) / 255.0 * self.color_channel_max_ma
    }

    fn white_channel_ma(&self, value: u8) -> f32 {
        f32::from(value) / 255.0 * self.white_channel_max_ma
    }

    /// Estimated draw of a single LED showing `color`, in mA.
    pub fn led_ma(&self, color: Rgbw) -> f32 {
        self.base_ma
            + self.color_channel_ma(color.r)
            + self.color_channel_ma(color.g)
            + self.color_channel_ma(color.b)
            + self.white_channel_ma(color.w)
    }
}

/// Estimated draw of every LED currently in `strip`'s buffer, in mA.
fn strip_ma(strip: &dyn ReadableLedStrip, model: &PowerModel) -> f32 {
    (0..strip.led_count()).map(|i| model.led_ma(strip.led(i))).sum()
}

/// A readable strip that throttles rendered brightness to a power budget.
///
/// Writes land in an internal desired-state buffer and never touch the
/// backing strip directly; readback reports the desired (un-throttled)
/// colors. On flush the desired state is copied into the backing strip and
/// iteratively dimmed until the ceiling is satisfied, then the backing
/// strip is flushed once.
///
/// Reduction is best-effort: when every pixel has dropped below the 10-unit
/// brightness floor the ceiling may remain exceeded and no signal is
/// raised; poll [`current_power_draw`](Self::current_power_draw)
/// if it matters. The loop is O(pixels × passes) and may take several
/// milliseconds on large strips far over budget, so keep headroom between
/// desired brightness and the ceiling when timing is tight.
pub struct PowerLimitedStrip<'a, const N: usize> {
    desired: LedBuffer<N>,
    base: SharedStrip<'a>,
    model: PowerModel,
    limit_ma: f32,
}

impl<'a, const N: usize> PowerLimitedStrip<'a, N> {
    /// Creates a power-limited view over `base`.
    ///
    /// # Panics
    /// Panics if the backing strip has more than `N` LEDs.
    pub fn new(base: SharedStrip<'a>, model: PowerModel, limit_ma: f32) -> Self {
        assert!(
            base.borrow().led_count() <= N,
            "backing strip exceeds desired-state buffer capacity"
        );

        Self {
            desired: LedBuffer::new(),
            base,
            model,
            limit_ma,
        }
    }

    /// Changes the ceiling and immediately re-flushes so the backing strip
    /// reflects the new budget.
    pub fn set_power_limit(&mut self, limit_ma: f32) {
        self.limit_ma = limit_ma;
        self.update_leds();
    }

    /// The configured ceiling, in mA.
    pub fn power_limit(&self) -> f32 {
        self.limit_ma
    }

    /// Estimated draw of the backing strip's rendered state, in mA.
    pub fn current_power_draw(&self) -> f32 {
        strip_ma(&*self.base.borrow(), &self.model)
    }

    /// The power model in use.
    pub fn power_model(&self) -> PowerModel {
        self.model
    }
}

impl<const N: usize> LedStrip for PowerLimitedStrip<'_, N> {
    fn led_count(&self) -> usize {
        self.base.borrow().led_count()
    }

    fn set_led(&mut self, index: usize, color: Rgbw, flush: bool) {
        self.desired.set_led(index, color, false);

        if flush {
            self.update_leds();
        }
    }

    fn update_leds(&mut self) {
        let mut base = self.base.borrow_mut();
        let count = base.led_count();

        // Apply the desired state to the backing buffer without pushing.
        for i in 0..count {
            base.set_led(i, self.desired.led(i), false);
        }

        // Dim in full passes until the budget is met or nothing is left to
        // reduce below the per-pixel brightness floor.
        while strip_ma(&*base, &self.model) > self.limit_ma {
            let mut reduced = false;

            for i in 0..count {
                let current = base.led(i);
                let brightness = current.total_brightness();

                if brightness >= REDUCE_STEP {
                    base.set_led(i, current.with_total_brightness(brightness - REDUCE_STEP), false);
                    reduced = true;
                }
            }

            if !reduced {
                break;
            }
        }

        base.update_leds();
    }
}

impl<const N: usize> ReadableLedStrip for PowerLimitedStrip<'_, N> {
    /// Reports the desired (un-throttled) color.
    fn led(&self, index: usize) -> Rgbw {
        self.desired.led(index)
    }
}
