//! Shared test infrastructure for rgbw-animator integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use rgbw_animator::{LedStrip, ReadableLedStrip, Rgbw, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_duration_since(&self, earlier: Self) -> Option<Self::Duration> {
        self.0.checked_sub(earlier.0).map(TestDuration)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, millis: u64) {
        self.current_time.set(TestInstant(millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Flush-counting Strip
// ============================================================================

/// In-memory strip that counts `update_leds` calls, standing in for a
/// hardware transport so tests can observe flush batching.
pub struct CountingStrip<const N: usize> {
    pixels: [Rgbw; N],
    flushes: usize,
}

impl<const N: usize> CountingStrip<N> {
    pub fn new() -> Self {
        Self {
            pixels: [Rgbw::OFF; N],
            flushes: 0,
        }
    }

    /// Number of flushes observed so far
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl<const N: usize> LedStrip for CountingStrip<N> {
    fn led_count(&self) -> usize {
        N
    }

    fn set_led(&mut self, index: usize, color: Rgbw, flush: bool) {
        self.pixels[index] = color;
        if flush {
            self.update_leds();
        }
    }

    fn update_leds(&mut self) {
        self.flushes += 1;
    }
}

impl<const N: usize> ReadableLedStrip for CountingStrip<N> {
    fn led(&self, index: usize) -> Rgbw {
        self.pixels[index]
    }
}
