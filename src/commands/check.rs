//! Check command handler

use anyhow::Result;

use typewrite::cli::CheckArgs;
use typewrite::script::{Script, ScriptSummary};
use typewrite::Config;

/// Validate a script and report one pass over it.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &CheckArgs) -> Result<()> {
    let config = Config::load()?;
    let script = Script::load(&args.script)?;

    if args.trace {
        print!("{}", script.trace(&config)?);
        return Ok(());
    }

    let summary = script.summary(&config);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

fn format_summary(summary: &ScriptSummary) -> String {
    let mut modes = Vec::new();
    if summary.options.continuous {
        modes.push("continuous");
    }
    if summary.options.backspace {
        modes.push("backspace");
    }
    modes.push(if summary.options.new_line {
        "stacked"
    } else {
        "inline"
    });

    format!(
        "fragments:  {}\ncharacters: {}\ncycle:      {}ms\nspeeds:     {}ms typing, {}ms backspace\nmode:       {}\n",
        summary.fragments,
        summary.characters,
        summary.cycle_ms,
        summary.typing_speed_ms,
        summary.backspace_speed_ms,
        modes.join(", ")
    )
}
