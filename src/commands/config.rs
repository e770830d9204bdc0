use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::config::RsvpConfig;

use super::Context;

pub fn show(ctx: &Context) -> Result<()> {
    let config_path = RsvpConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", ctx.store().path().display());

    println!("\n{}", "Settings".bold());
    for line in ctx.config.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}

/// Write one option to the config file. Environment overrides are not
/// saved along with it.
pub fn set(key: &str, value: &str) -> Result<()> {
    let config_path = RsvpConfig::config_path()?;

    let mut config = RsvpConfig::read_file(&config_path)?;
    config.set(key, value)?;
    config.save_to(&config_path)?;

    println!(
        "{}",
        format!("  Set {} = {} in {}", key, value, config_path.display()).green()
    );
    Ok(())
}
