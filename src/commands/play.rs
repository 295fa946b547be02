//! Play command handler

use std::time::Duration;

use anyhow::Result;

use typewrite::cli::PlayArgs;
use typewrite::player::PlaybackOptions;
use typewrite::runner::{run_in_terminal, RunOutcome};
use typewrite::script::Script;
use typewrite::scheduler::SystemClock;
use typewrite::surface::TerminalSurface;
use typewrite::Config;

/// Play a script on the terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs) -> Result<()> {
    let config = Config::load()?;
    let script = Script::load(&args.script)?;
    let mut writer = script.build(TerminalSurface::for_stdout(), SystemClock::new(), &config)?;

    if let Some(ms) = args.typing_speed {
        writer.set_typing_speed(Duration::from_millis(ms));
    }
    if let Some(ms) = args.backspace_speed {
        writer.set_backspace_speed(Duration::from_millis(ms));
    }

    let options = apply_flags(script.options, args);
    match run_in_terminal(&mut writer, options)? {
        RunOutcome::Finished => tracing::info!("script finished"),
        RunOutcome::Interrupted => tracing::info!("script interrupted"),
    }
    Ok(())
}

/// Command-line flags only ever switch options on.
fn apply_flags(mut options: PlaybackOptions, args: &PlayArgs) -> PlaybackOptions {
    options.continuous |= args.continuous;
    options.backspace |= args.backspace;
    if args.inline {
        options.new_line = false;
    }
    options
}
