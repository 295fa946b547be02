//! typewrite - typewriter text animations
//!
//! A queue of styled text fragments is typed onto a render surface one
//! character at a time, optionally erased again, and optionally looped.
//! Every action is placed on an explicit timeline driven by a [`Clock`],
//! so playback is deterministic under a [`ManualClock`] and real-time under
//! a [`SystemClock`].

pub mod caret;
pub mod cli;
pub mod config;
pub mod error;
pub mod player;
pub mod queue;
pub mod runner;
pub mod scheduler;
pub mod script;
pub mod style;
pub mod surface;

pub use config::Config;
pub use error::{Result, TypewriterError};
pub use player::{Phase, PlaybackOptions, PlayerState, Timing, Typewriter};
pub use queue::{ExpressionQueue, Fragment};
pub use scheduler::{Clock, ManualClock, SystemClock};
pub use style::{Color, EffectiveStyle, FontSize, StyleRecord};
pub use surface::{
    Align, Justify, LayoutMode, LineHandle, RecordingSurface, RenderSurface, TerminalSurface,
};
