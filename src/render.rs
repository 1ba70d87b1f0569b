//! Terminal rendering for schedule types.

use confsched_core::{Colour, Event, Notice, TextColour};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        format!(
            "{:>4}  {}  {} {}",
            self.id.as_str().dimmed(),
            self.start.format("%a %d %b %H:%M"),
            self.title.bold(),
            format!("(until {}, {})", self.end.format("%H:%M"), self.colour).dimmed()
        )
    }
}

impl Render for Notice {
    fn render(&self) -> String {
        let symbol = match self {
            Notice::Added(_) => "+".green().to_string(),
            Notice::Updated(_) => "~".yellow().to_string(),
            Notice::Deleted(_) => "-".red().to_string(),
        };
        format!("{} {}", symbol, self)
    }
}

impl Render for Colour {
    fn render(&self) -> String {
        let text = self.contrast_text();
        let sample = format!(" {} ", self);
        let sample = match (self.rgb(), text) {
            (Some((r, g, b)), TextColour::Dark) => sample.black().on_truecolor(r, g, b).to_string(),
            (Some((r, g, b)), TextColour::Light) => sample.white().on_truecolor(r, g, b).to_string(),
            (None, _) => sample,
        };
        format!("{} {} text", sample, text.css())
    }
}
