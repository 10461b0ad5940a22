//! Time-bounded animation instances.
//!
//! An [`Animation`] pairs a start instant and duration with a target strip,
//! an LED index, and one of a closed set of kinds. It is inert before its
//! start time (progress 0) and clamps at progress 1 once the window has
//! passed; the scheduling engine drives it by calling
//! [`advance`](Animation::advance) and evicts it after its final update.

use crate::color::Rgbw;
use crate::strip::{LedStrip, ReadableLedStrip, SharedStrip};
use crate::time::{TimeDuration, TimeInstant};

/// Length of one blink cycle in milliseconds.
pub const BLINK_PERIOD_MS: u64 = 400;

/// Lit portion at the start of each blink cycle, in milliseconds.
pub const BLINK_ON_MS: u64 = 100;

/// The kind-specific behavior and state of an animation.
#[derive(Debug, Clone, Copy)]
enum AnimationKind {
    /// Interpolates one LED between two fixed colors.
    Fade { from: Rgbw, to: Rgbw },

    /// Like `Fade`, but the start color is captured from the target LED on
    /// the first advance, so the fade begins from whatever is showing.
    FadeFromCurrent { to: Rgbw, from: Option<Rgbw> },

    /// Toggles one LED between `color` and whatever was showing before the
    /// blink began, for a fixed number of cycles.
    Blink {
        color: Rgbw,
        previous: Option<Rgbw>,
        remaining: u16,
        lit: bool,
    },
}

/// A single scheduled animation targeting one LED of one strip.
pub struct Animation<'a, I: TimeInstant> {
    start: I,
    duration: I::Duration,
    target: SharedStrip<'a>,
    led_index: usize,
    kind: AnimationKind,
}

impl<'a, I: TimeInstant> Animation<'a, I> {
    /// Fades `led_index` from `from` to `to` over `duration`.
    pub fn fade(
        start: I,
        duration: I::Duration,
        target: SharedStrip<'a>,
        led_index: usize,
        from: Rgbw,
        to: Rgbw,
    ) -> Self {
        Self {
            start,
            duration,
            target,
            led_index,
            kind: AnimationKind::Fade { from, to },
        }
    }

    /// Fades `led_index` to `to`, starting from whatever color the LED
    /// shows when the animation first advances.
    pub fn fade_from_current(
        start: I,
        duration: I::Duration,
        target: SharedStrip<'a>,
        led_index: usize,
        to: Rgbw,
    ) -> Self {
        Self {
            start,
            duration,
            target,
            led_index,
            kind: AnimationKind::FadeFromCurrent { to, from: None },
        }
    }

    /// Blinks `led_index` with `color` for `blinks` cycles.
    ///
    /// Each cycle is [`BLINK_PERIOD_MS`] long with the first
    /// [`BLINK_ON_MS`] lit; the duration is derived as
    /// `blinks * BLINK_PERIOD_MS`. Between lit windows the LED shows the
    /// color it had before the blink began.
    pub fn blink(
        start: I,
        blinks: u16,
        target: SharedStrip<'a>,
        led_index: usize,
        color: Rgbw,
    ) -> Self {
        Self {
            start,
            duration: I::Duration::from_millis(u64::from(blinks) * BLINK_PERIOD_MS),
            target,
            led_index,
            kind: AnimationKind::Blink {
                color,
                previous: None,
                remaining: blinks,
                lit: false,
            },
        }
    }

    /// The strip this animation writes to.
    pub fn target(&self) -> SharedStrip<'a> {
        self.target
    }

    /// The instant this animation becomes active.
    pub fn start_time(&self) -> I {
        self.start
    }

    /// The animation's duration.
    pub fn duration(&self) -> I::Duration {
        self.duration
    }

    /// The instant this animation ends, or `None` on instant overflow.
    pub fn end_time(&self) -> Option<I> {
        self.start.checked_add(self.duration)
    }

    /// True while `now` is before the start time; a pending animation must
    /// not be advanced.
    pub fn is_pending(&self, now: I) -> bool {
        now.checked_duration_since(self.start).is_none()
    }

    /// True once `now` is strictly past the end time. The engine gives a
    /// finished animation one final advance (at progress 1) before
    /// evicting it.
    pub fn is_finished(&self, now: I) -> bool {
        now.checked_duration_since(self.start)
            .is_some_and(|elapsed| elapsed.as_millis() > self.duration.as_millis())
    }

    /// Completion fraction at `now`, clamped to `[0, 1]`.
    ///
    /// Pending animations report 0; a zero-length window reports 1.
    pub fn progress(&self, now: I) -> f32 {
        let Some(elapsed) = now.checked_duration_since(self.start) else {
            return 0.0;
        };

        let total = self.duration.as_millis();
        let elapsed = elapsed.as_millis();

        if elapsed >= total {
            return 1.0;
        }

        elapsed as f32 / total as f32
    }

    /// Applies this animation's effect for the current time to the target
    /// strip's buffered state. Does not flush.
    ///
    /// The engine only calls this for non-pending animations.
    pub fn advance(&mut self, now: I) {
        let progress = self.progress(now);
        let target = self.target;
        let index = self.led_index;

        match &mut self.kind {
            AnimationKind::Fade { from, to } => {
                let color = from.interpolate_to(*to, progress);
                target.borrow_mut().set_led(index, color, false);
            }

            AnimationKind::FadeFromCurrent { to, from } => {
                let from = *from.get_or_insert_with(|| target.borrow().led(index));
                let color = from.interpolate_to(*to, progress);
                target.borrow_mut().set_led(index, color, false);
            }

            AnimationKind::Blink {
                color,
                previous,
                remaining,
                lit,
            } => {
                let previous = *previous.get_or_insert_with(|| target.borrow().led(index));

                let elapsed = now
                    .checked_duration_since(self.start)
                    .map_or(0, |d| d.as_millis());
                let phase = elapsed % BLINK_PERIOD_MS;

                if phase < BLINK_ON_MS {
                    if !*lit && *remaining > 0 {
                        target.borrow_mut().set_led(index, *color, false);
                        *remaining -= 1;
                        *lit = true;
                    }
                } else if *lit {
                    target.borrow_mut().set_led(index, previous, false);
                    *lit = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::LedBuffer;
    use core::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Ms(u64);

    impl TimeDuration for Ms {
        const ZERO: Self = Ms(0);

        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            Ms(millis)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct At(u64);

    impl TimeInstant for At {
        type Duration = Ms;

        fn duration_since(&self, earlier: Self) -> Ms {
            Ms(self.0 - earlier.0)
        }

        fn checked_duration_since(&self, earlier: Self) -> Option<Ms> {
            self.0.checked_sub(earlier.0).map(Ms)
        }

        fn checked_add(self, duration: Ms) -> Option<Self> {
            self.0.checked_add(duration.0).map(At)
        }
    }

    fn strip_cell() -> RefCell<LedBuffer<4>> {
        RefCell::new(LedBuffer::new())
    }

    #[test]
    fn progress_is_zero_before_start() {
        let cell = strip_cell();
        let strip: SharedStrip = &cell;
        let anim = Animation::fade(At(100), Ms(50), strip, 0, Rgbw::OFF, Rgbw::RED);

        assert!(anim.is_pending(At(99)));
        assert_eq!(anim.progress(At(0)), 0.0);
        assert!(!anim.is_pending(At(100)));
        assert_eq!(anim.progress(At(100)), 0.0);
    }

    #[test]
    fn progress_clamps_at_one() {
        let cell = strip_cell();
        let strip: SharedStrip = &cell;
        let anim = Animation::fade(At(0), Ms(100), strip, 0, Rgbw::OFF, Rgbw::RED);

        assert_eq!(anim.progress(At(50)), 0.5);
        assert_eq!(anim.progress(At(100)), 1.0);
        assert_eq!(anim.progress(At(5000)), 1.0);
        assert!(!anim.is_finished(At(100)));
        assert!(anim.is_finished(At(101)));
    }

    #[test]
    fn zero_duration_reports_complete_progress() {
        let cell = strip_cell();
        let strip: SharedStrip = &cell;
        let anim = Animation::fade(At(10), Ms(0), strip, 0, Rgbw::OFF, Rgbw::RED);

        assert_eq!(anim.progress(At(10)), 1.0);
        assert!(!anim.is_finished(At(10)));
        assert!(anim.is_finished(At(11)));
    }

    #[test]
    fn end_time_adds_duration() {
        let cell = strip_cell();
        let strip: SharedStrip = &cell;
        let anim = Animation::blink(At(100), 3, strip, 0, Rgbw::RED);

        assert_eq!(anim.duration(), Ms(1200));
        assert_eq!(anim.end_time(), Some(At(1300)));
        assert_eq!(anim.start_time(), At(100));
    }

    #[test]
    fn fade_writes_interpolated_color() {
        let cell = strip_cell();
        let strip: SharedStrip = &cell;
        let mut anim = Animation::fade(At(0), Ms(1000), strip, 1, Rgbw::RED, Rgbw::BLUE);

        anim.advance(At(0));
        assert_eq!(cell.borrow().led(1), Rgbw::RED);

        anim.advance(At(500));
        assert_eq!(cell.borrow().led(1), Rgbw::new(127, 0, 127, 0));

        anim.advance(At(1000));
        assert_eq!(cell.borrow().led(1), Rgbw::BLUE);
    }

    #[test]
    fn fade_from_current_captures_start_color_once() {
        let cell = strip_cell();
        cell.borrow_mut().set_led(0, Rgbw::GREEN, false);
        let strip: SharedStrip = &cell;

        let mut anim = Animation::fade_from_current(At(0), Ms(100), strip, 0, Rgbw::OFF);

        // First advance captures GREEN, then interpolates from it even
        // though the pixel itself changes underneath.
        anim.advance(At(0));
        assert_eq!(cell.borrow().led(0), Rgbw::GREEN);

        anim.advance(At(50));
        assert_eq!(cell.borrow().led(0), Rgbw::new(0, 127, 0, 0));

        anim.advance(At(100));
        assert_eq!(cell.borrow().led(0), Rgbw::OFF);
    }

    #[test]
    fn blink_toggles_and_counts_cycles() {
        let cell = strip_cell();
        cell.borrow_mut().set_led(2, Rgbw::YELLOW, false);
        let strip: SharedStrip = &cell;

        let mut anim = Animation::blink(At(0), 2, strip, 2, Rgbw::RED);

        // First cycle: lit window, then restore.
        anim.advance(At(0));
        assert_eq!(cell.borrow().led(2), Rgbw::RED);
        anim.advance(At(99));
        assert_eq!(cell.borrow().led(2), Rgbw::RED);
        anim.advance(At(100));
        assert_eq!(cell.borrow().led(2), Rgbw::YELLOW);
        anim.advance(At(399));
        assert_eq!(cell.borrow().led(2), Rgbw::YELLOW);

        // Second cycle.
        anim.advance(At(400));
        assert_eq!(cell.borrow().led(2), Rgbw::RED);
        anim.advance(At(150 + 400));
        assert_eq!(cell.borrow().led(2), Rgbw::YELLOW);

        // No third cycle: the count is exhausted.
        anim.advance(At(800));
        assert_eq!(cell.borrow().led(2), Rgbw::YELLOW);
    }

    #[test]
    fn blink_decrements_once_per_lit_window() {
        let cell = strip_cell();
        let strip: SharedStrip = &cell;

        let mut anim = Animation::blink(At(0), 1, strip, 0, Rgbw::RED);

        // Multiple advances inside one lit window must not burn extra cycles.
        anim.advance(At(0));
        anim.advance(At(10));
        anim.advance(At(50));
        assert_eq!(cell.borrow().led(0), Rgbw::RED);

        anim.advance(At(200));
        assert_eq!(cell.borrow().led(0), Rgbw::OFF);

        // A second period would start here, but the single cycle is spent.
        anim.advance(At(400));
        assert_eq!(cell.borrow().led(0), Rgbw::OFF);
    }
}
