//! Typewriter player module
//!
//! Drives a queue of styled fragments through typing, optional
//! backspacing and looping, on any [`RenderSurface`](crate::surface::RenderSurface).
//!
//! # Architecture
//!
//! - `state`: `PlayerState`, `Phase`, `PlaybackOptions` and `Timing`
//! - `typewriter`: the scheduling core, which places every action of a
//!   fragment on a timeline at an absolute offset and fires them on `pump`
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use typewrite::player::{PlaybackOptions, Typewriter};
//! use typewrite::scheduler::ManualClock;
//! use typewrite::surface::RecordingSurface;
//!
//! let clock = ManualClock::new();
//! let mut writer = Typewriter::new(RecordingSurface::new(clock.clone()), clock.clone());
//! writer.add_text("Hi", None).unwrap();
//! writer.play(PlaybackOptions::default()).unwrap();
//!
//! clock.advance(Duration::from_secs(1));
//! writer.pump();
//! assert_eq!(writer.surface().appends(), 2);
//! ```

pub mod state;
mod typewriter;

pub use state::{Phase, PlaybackOptions, PlayerState, StepStart, Timing};
pub use typewriter::Typewriter;
