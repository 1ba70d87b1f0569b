use anyhow::Result;
use confsched_core::Colour;

use crate::render::Render;

pub fn run(colour: &str) -> Result<()> {
    let colour = Colour::new(colour);

    if colour.rgb().is_none() {
        eprintln!("'{}' is not a hex colour; using the default colour's contrast", colour);
    }

    println!("{}", colour.render());
    Ok(())
}
