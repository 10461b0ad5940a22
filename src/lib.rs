#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Rgbw`**: 4-channel color value with saturating arithmetic and interpolation
//! - **`LedStrip`** / **`ReadableLedStrip`**: capability traits for addressable pixel surfaces
//! - **`SharedStrip`**: non-owning handle through which adapters and animations share a strip
//! - **`LedBuffer`**: in-memory pixel store (backing buffer, test double)
//! - **`MultiStrip`** / **`MappedStrip`** / **`InvertedStrip`** / **`PassthroughStrip`**:
//!   composition adapters remapping or concatenating index spaces
//! - **`CrossFadeHandler`**: blends two buffered strip states into a target by one factor
//! - **`PowerLimitedStrip`**: strip that dims its rendered output to a milliamp budget
//! - **`Animation`**: a time-bounded fade or blink targeting one LED
//! - **`AnimationEngine`**: owns queued animations, advances them each tick,
//!   flushes touched strips once, and evicts finished animations
//! - **`TimeSource`**: trait to implement for your timing system
//!
//! Hardware transports implement [`LedStrip`] (and [`ReadableLedStrip`] where the
//! device state can be read back); everything else in the crate is written
//! against those traits and a [`TimeSource`], so the core runs unchanged on any
//! platform and in host-side tests.

pub mod animation;
pub mod color;
pub mod compose;
pub mod crossfade;
pub mod engine;
pub mod names;
pub mod power;
pub mod strip;
pub mod time;

pub use animation::{Animation, BLINK_ON_MS, BLINK_PERIOD_MS};
pub use color::Rgbw;
pub use compose::{InvertedStrip, MappedStrip, MultiStrip, PassthroughStrip};
pub use crossfade::CrossFadeHandler;
pub use engine::{AnimationEngine, EngineError};
pub use names::{NAMED_COLORS, named_color, parse_color, scaled_named_color};
pub use power::{PowerLimitedStrip, PowerModel};
pub use strip::{LedBuffer, LedStrip, ReadableLedStrip, SharedStrip};
pub use time::{TimeDuration, TimeInstant, TimeSource};
