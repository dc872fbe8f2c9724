use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::content::loader;

/// Validate a deck file and print what it contains.
pub fn run(file: &Path) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    let deck = loader::load(file)?;
    let default_language = deck
        .meta
        .default_language
        .clone()
        .unwrap_or_else(|| deck.languages[0].clone());

    println!("{} {}", "Deck:".bold(), deck.meta.title);
    if let Some(footer) = &deck.meta.footer {
        println!("{} {footer}", "Footer:".bold());
    }
    println!(
        "{} {} (default: {})",
        "Languages:".bold(),
        deck.languages.join(", "),
        default_language
    );

    println!("{}", format!("Sections ({}):", deck.section_count()).bold());
    for (index, id) in deck.sections.iter().enumerate() {
        let label = deck.section_label(&default_language, index);
        println!("  {index}. {} {}", id.cyan(), format!("({label})").dimmed());
    }

    println!("{}", format!("Slides ({}):", deck.slide_count()).bold());
    for (index, slide) in deck.slides.iter().enumerate() {
        println!(
            "  {}. {} {}",
            index + 1,
            slide.section.cyan(),
            format!("[{:?}]", slide.layout).to_lowercase().dimmed()
        );
    }

    println!("{}", "OK".green().bold());
    Ok(())
}
