use anyhow::Result;
use confsched_core::config::ScheduleConfig;
use owo_colors::OwoColorize;

pub fn run(edit: bool) -> Result<()> {
    let config = ScheduleConfig::load()?;
    let url = page_url(&config, edit);

    println!("Opening {}", url.cyan());

    if open::that(&url).is_err() {
        println!(
            "{}",
            "(Could not open browser automatically, please copy the URL above)".dimmed()
        );
    }

    Ok(())
}

fn page_url(config: &ScheduleConfig, edit: bool) -> String {
    let path = if edit { "/edit" } else { "/" };
    format!("http://{}:{}{}", config.server.host, config.server.port, path)
}
