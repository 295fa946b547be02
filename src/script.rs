//! TOML scripts describing a typewriter animation.
//!
//! ```toml
//! [defaults]
//! font_size = "64px"
//!
//! [position]
//! align = "center"
//! justify = "right"
//!
//! [options]
//! backspace = false
//!
//! [[fragment]]
//! text = "Nate"
//! bold = true
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::player::state::millis;
use crate::player::{PlaybackOptions, Timing, Typewriter};
use crate::scheduler::{Clock, ManualClock};
use crate::style::StyleRecord;
use crate::surface::{Align, Justify, RecordingSurface, RenderSurface};

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Script {
    /// Merged into the global style before any fragment is added.
    pub defaults: DefaultsSection,
    pub position: Option<PositionSection>,
    pub options: PlaybackOptions,
    pub timing: TimingSection,
    #[serde(rename = "fragment")]
    pub fragments: Vec<FragmentSpec>,
}

/// The `[defaults]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsSection {
    #[serde(flatten)]
    pub style: StyleRecord,
    /// Keys that are not style fields; rejected on load.
    #[serde(flatten, skip_serializing_if = "toml::Table::is_empty")]
    pub unknown: toml::Table,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PositionSection {
    pub align: Align,
    pub justify: Justify,
}

/// Per-script speeds; unset fields fall back to the user config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typing_speed_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backspace_speed_ms: Option<u64>,
}

/// One `[[fragment]]` table: its text plus style fields inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentSpec {
    pub text: String,
    #[serde(flatten)]
    pub style: StyleRecord,
    /// Keys that are neither `text` nor a style field; rejected on load.
    #[serde(flatten, skip_serializing_if = "toml::Table::is_empty")]
    pub unknown: toml::Table,
}

/// What `check` reports about a script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptSummary {
    pub fragments: usize,
    pub characters: usize,
    pub cycle_ms: u64,
    pub typing_speed_ms: u64,
    pub backspace_speed_ms: u64,
    pub options: PlaybackOptions,
}

impl Script {
    /// Load and validate a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid script: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let script: Script = toml::from_str(content).context("Failed to parse TOML")?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        reject_unknown(&self.defaults.unknown, "[defaults]")?;
        self.defaults
            .style
            .validate()
            .context("Invalid [defaults] style")?;
        for (index, fragment) in self.fragments.iter().enumerate() {
            reject_unknown(&fragment.unknown, &format!("fragment {}", index))?;
            fragment
                .style
                .validate()
                .with_context(|| format!("Invalid style on fragment {}", index))?;
        }
        Ok(())
    }

    /// Speeds for this script: script values over `base`.
    pub fn timing(&self, base: &Timing) -> Timing {
        Timing::new(
            self.timing
                .typing_speed_ms
                .map_or(base.typing_speed(), Duration::from_millis),
            self.timing
                .backspace_speed_ms
                .map_or(base.backspace_speed(), Duration::from_millis),
        )
    }

    /// Wire a typewriter for `surface` with the script's style, position and
    /// fragments. Nothing is played yet.
    pub fn build<S: RenderSurface, C: Clock>(
        &self,
        surface: S,
        clock: C,
        config: &Config,
    ) -> Result<Typewriter<S, C>> {
        let timing = self.timing(&config.timing.to_timing());
        let mut writer = Typewriter::with_timing(surface, clock, timing);
        writer.set_blink_period(config.caret.blink_period());
        writer
            .set_font(self.defaults.style.clone())
            .context("Invalid [defaults] style")?;
        if let Some(position) = self.position {
            writer.position(position.align, position.justify);
        }
        for (index, fragment) in self.fragments.iter().enumerate() {
            let style = (!fragment.style.is_empty()).then(|| fragment.style.clone());
            writer
                .add_text(fragment.text.clone(), style)
                .with_context(|| format!("Invalid style on fragment {}", index))?;
        }
        tracing::debug!(fragments = self.fragments.len(), "script loaded into typewriter");
        Ok(writer)
    }

    pub fn summary(&self, config: &Config) -> ScriptSummary {
        let timing = self.timing(&config.timing.to_timing());
        let characters = self
            .fragments
            .iter()
            .map(|fragment| fragment.text.chars().count())
            .sum();
        let cycle: Duration = self
            .fragments
            .iter()
            .map(|fragment| {
                timing.fragment_duration(fragment.text.chars().count(), self.options.backspace)
            })
            .fold(Duration::ZERO, Duration::saturating_add);

        ScriptSummary {
            fragments: self.fragments.len(),
            characters,
            cycle_ms: millis(cycle),
            typing_speed_ms: millis(timing.typing_speed()),
            backspace_speed_ms: millis(timing.backspace_speed()),
            options: self.options,
        }
    }

    /// Play one pass over the fragments on a virtual clock and return the
    /// surface trace.
    pub fn trace(&self, config: &Config) -> Result<String> {
        let clock = ManualClock::new();
        let surface = RecordingSurface::new(clock.clone());
        let mut writer = self.build(surface, clock.clone(), config)?;
        writer.play(self.options)?;

        // A looping session re-enters its first step at the end of the
        // cycle, so nothing at or after that instant belongs to this pass.
        let end = writer.cycle_duration(&self.options);
        loop {
            writer.pump();
            if writer.is_finished() {
                break;
            }
            match writer.next_deadline() {
                Some(deadline) if deadline < end || !self.options.continuous => {
                    clock.set(deadline)
                }
                _ => break,
            }
        }
        writer.stop();
        Ok(writer.surface().trace())
    }
}

/// Fail on keys a style table does not know, naming them.
fn reject_unknown(unknown: &toml::Table, table: &str) -> Result<()> {
    if unknown.is_empty() {
        return Ok(());
    }
    let keys: Vec<&str> = unknown.keys().map(String::as_str).collect();
    bail!(
        "Unknown key(s) in {}: {} (expected font_size, color, font_family, bold, italic, underline, strikethrough)",
        table,
        keys.join(", ")
    )
}
