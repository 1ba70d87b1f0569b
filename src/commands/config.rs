use anyhow::Result;
use confsched_core::config::ScheduleConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let path = ScheduleConfig::config_path()?;
    let config = ScheduleConfig::load()?;

    println!("{}", format!("# {}", path.display()).dimmed());
    print!("{}", config.to_toml()?);
    Ok(())
}
