use anyhow::Context;
use clap::Parser;
use neofont::NeoFont;
use std::{fs, path::PathBuf};

/// Re-encoded applets always land here.
const OUTPUT_PATH: &str = "test-output";

#[derive(Parser)]
#[command(about = "Shows a Neo font applet as ASCII art and re-encodes it.")]
struct Cli {
    #[arg(help = "Applet file to show.", required = true)]
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let data = fs::read(&args.path).with_context(|| format!("could not read {}", args.path.display()))?;
    let font = NeoFont::from_applet_bytes(&data).with_context(|| format!("could not decode {}", args.path.display()))?;

    println!("font:    {}", font.font_name());
    println!("applet:  {}", font.applet_name());
    println!("info:    {}", font.applet_info());
    println!("version: {}", font.version());
    println!("ident:   {:#06x}", font.ident());
    println!("height:  {}", font.height());

    for (i, glyph) in font.glyphs().iter().enumerate() {
        let ch = char::from(i as u8);
        println!();
        if ch.is_ascii_graphic() {
            println!("character {i} {ch}");
        } else {
            println!("character {i}");
        }
        for y in 0..glyph.height() as usize {
            let row: String = (0..glyph.width() as usize).map(|x| if glyph.get_pixel(x, y) { '*' } else { ' ' }).collect();
            println!("{row}");
        }
    }

    let encoded = font.to_applet_bytes();
    fs::write(OUTPUT_PATH, &encoded).with_context(|| format!("could not write {OUTPUT_PATH}"))?;
    Ok(())
}
