//! Config subcommands handler

use anyhow::Result;

use typewrite::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print where the configuration file is read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    let path = Config::config_path()?;
    let note = if path.exists() { "" } else { " (not created)" };
    println!("{}{}", path.display(), note);
    Ok(())
}
