//! The 4-channel RGBW color value type.
//!
//! All arithmetic saturates each channel independently to `[0, 255]` rather
//! than wrapping. Scalar multiplication truncates toward zero; interpolation
//! is `a * (1 - f) + b * f` computed channel-wise with truncating multiplies
//! and a saturating add, so factor 0 and factor 1 reproduce the endpoints
//! exactly.

use core::ops::{Add, Mul};

/// An RGBW color with one dedicated white channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    /// All channels off.
    pub const OFF: Self = Self::rgb(0, 0, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const TURQUOISE: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    /// White channel only.
    pub const WARM_WHITE: Self = Self::new(0, 0, 0, 255);
    /// Color channels only.
    pub const COOL_WHITE: Self = Self::rgb(255, 255, 255);
    /// Color and white channels at maximum.
    pub const NATURAL_WHITE: Self = Self::new(255, 255, 255, 255);
    /// All four channels at maximum.
    pub const FULL: Self = Self::NATURAL_WHITE;

    /// Maximum possible total brightness (4 × 255).
    pub const MAX_TOTAL_BRIGHTNESS: u16 = 255 * 4;

    /// Creates a color from four explicit channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Creates a color from the three color channels, white off.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, w: 0 }
    }

    /// Unpacks a color from a 32-bit value in WRGB byte order
    /// (bits 31–24 = white, 23–16 = red, 15–8 = green, 7–0 = blue).
    #[inline]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
            w: ((packed >> 24) & 0xFF) as u8,
        }
    }

    /// Packs the color into a 32-bit value in WRGB byte order.
    /// Exact inverse of [`Rgbw::from_packed`].
    #[inline]
    pub const fn packed(self) -> u32 {
        (self.w as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Sum of all four channels, in `0..=1020`.
    #[inline]
    pub const fn total_brightness(self) -> u16 {
        self.r as u16 + self.g as u16 + self.b as u16 + self.w as u16
    }

    /// Linear interpolation toward `other`.
    ///
    /// Factor 0 returns `self` exactly, factor 1 returns `other` exactly.
    pub fn interpolate_to(self, other: Self, factor: f32) -> Self {
        self * (1.0 - factor) + other * factor
    }

    /// Returns a color whose total brightness is at most `target`, keeping
    /// channel ratios as closely as integer truncation allows.
    ///
    /// `target` is clamped to 1020. An all-zero source yields a gray with
    /// every channel `min(target / 4, 255)`; a zero target yields the
    /// all-zero color. After scaling, any excess left by truncation is
    /// removed one unit at a time from the non-zero channels in r, g, b, w
    /// order until the total is at or below `target`.
    pub fn with_total_brightness(self, target: u16) -> Self {
        let target = target.min(Self::MAX_TOTAL_BRIGHTNESS);

        if self == Self::OFF {
            let channel = (target / 4).min(255) as u8;
            return Self::new(channel, channel, channel, channel);
        }

        if target == 0 {
            return Self::OFF;
        }

        let factor = f32::from(target) / f32::from(self.total_brightness());
        let mut scaled = self * factor;

        let mut total = scaled.total_brightness();
        while total > target {
            for channel in [&mut scaled.r, &mut scaled.g, &mut scaled.b, &mut scaled.w] {
                if total <= target {
                    break;
                }
                if *channel > 0 {
                    *channel -= 1;
                    total -= 1;
                }
            }
        }

        scaled
    }

    /// Channel-wise minimum of two colors.
    pub fn component_min(a: Self, b: Self) -> Self {
        Self::new(
            a.r.min(b.r),
            a.g.min(b.g),
            a.b.min(b.b),
            a.w.min(b.w),
        )
    }

    /// Channel-wise maximum of two colors.
    pub fn component_max(a: Self, b: Self) -> Self {
        Self::new(
            a.r.max(b.r),
            a.g.max(b.g),
            a.b.max(b.b),
            a.w.max(b.w),
        )
    }
}

impl Mul<f32> for Rgbw {
    type Output = Self;

    /// Scales each channel, truncating toward zero and saturating to
    /// `[0, 255]`.
    fn mul(self, factor: f32) -> Self {
        // `as u8` on f32 saturates at the type bounds and maps NaN to 0.
        Self {
            r: (f32::from(self.r) * factor) as u8,
            g: (f32::from(self.g) * factor) as u8,
            b: (f32::from(self.b) * factor) as u8,
            w: (f32::from(self.w) * factor) as u8,
        }
    }
}

impl Add for Rgbw {
    type Output = Self;

    /// Per-channel saturating add.
    fn add(self, other: Self) -> Self {
        Self {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
            w: self.w.saturating_add(other.w),
        }
    }
}
