use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;

use super::Deck;

/// Load and validate a deck file.
pub fn load(path: &Path) -> Result<Deck> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    parse(&contents)
}

/// Parse and validate deck YAML.
pub fn parse(contents: &str) -> Result<Deck> {
    let deck: Deck = serde_yaml::from_str(contents)?;
    validate(&deck)?;
    Ok(deck)
}

fn validate(deck: &Deck) -> Result<()> {
    if deck.languages.is_empty() {
        anyhow::bail!("Deck must declare at least one language");
    }
    if deck.sections.is_empty() {
        anyhow::bail!("Deck must declare at least one section");
    }
    if deck.slides.is_empty() {
        anyhow::bail!("Deck must declare at least one slide");
    }

    let mut seen = BTreeSet::new();
    for id in &deck.sections {
        if !seen.insert(id.as_str()) {
            anyhow::bail!("Duplicate section id: {id}");
        }
    }

    if let Some(default) = deck.meta.default_language.as_deref() {
        if !deck.languages.iter().any(|l| l == default) {
            anyhow::bail!(
                "Default language '{default}' is not in the configured language list"
            );
        }
    }

    if let Some(theme) = deck.meta.theme.as_deref() {
        if theme != "light" && theme != "dark" {
            anyhow::bail!("Invalid theme: {theme}. Must be 'light' or 'dark'.");
        }
    }

    for language in &deck.languages {
        let Some(locale) = deck.locales.get(language) else {
            anyhow::bail!("Missing locale content for language '{language}'");
        };
        for id in &deck.sections {
            if !locale.sections.contains_key(id) {
                anyhow::bail!("Locale '{language}' has no content for section '{id}'");
            }
        }
    }

    for slide in &deck.slides {
        if !deck.sections.iter().any(|s| s == &slide.section) {
            anyhow::bail!(
                "Slide references unknown section '{}'",
                slide.section
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Block, SlideLayout};

    const SAMPLE: &str = include_str!("../../../../sample-decks/peak-review.yaml");

    #[test]
    fn test_sample_deck_parses() {
        let deck = parse(SAMPLE).expect("sample deck should be valid");
        assert_eq!(deck.meta.title, "Peak Season 2025 Learnings");
        assert_eq!(deck.languages, vec!["en", "es"]);
        assert!(
            deck.sections.len() >= 5,
            "Expected at least 5 sections, got {}",
            deck.sections.len()
        );
        assert!(
            deck.slide_count() >= 6,
            "Expected at least 6 slides, got {}",
            deck.slide_count()
        );
        assert!(matches!(deck.slides[0].layout, SlideLayout::Title));
    }

    #[test]
    fn test_sample_deck_locales_cover_all_sections() {
        let deck = parse(SAMPLE).unwrap();
        for language in &deck.languages {
            let locale = deck.locales.get(language).unwrap();
            for id in &deck.sections {
                assert!(
                    locale.sections.contains_key(id),
                    "Locale '{language}' is missing section '{id}'"
                );
            }
        }
    }

    #[test]
    fn test_section_lookup() {
        let deck = parse(SAMPLE).unwrap();
        assert_eq!(deck.section_index("hero"), Some(0));
        assert_eq!(deck.section_index("no-such-section"), None);
        assert_eq!(deck.section_id(0), Some("hero"));
    }

    #[test]
    fn test_localized_labels_differ() {
        let deck = parse(SAMPLE).unwrap();
        let idx = deck.section_index("next-steps").unwrap();
        assert_ne!(
            deck.section_label("en", idx),
            deck.section_label("es", idx),
            "en and es labels should be translated"
        );
    }

    #[test]
    fn test_missing_locale_rejected() {
        let yaml = "\
meta: { title: T }
languages: [en, es]
sections: [intro]
locales:
  en:
    sections:
      intro: { label: Intro }
slides:
  - { section: intro, layout: title }
";
        let err = parse(yaml).unwrap_err();
        assert!(err.to_string().contains("es"), "unexpected error: {err}");
    }

    #[test]
    fn test_locale_missing_section_rejected() {
        let yaml = "\
meta: { title: T }
languages: [en]
sections: [intro, detail]
locales:
  en:
    sections:
      intro: { label: Intro }
slides:
  - { section: intro, layout: title }
";
        let err = parse(yaml).unwrap_err();
        assert!(err.to_string().contains("detail"), "unexpected error: {err}");
    }

    #[test]
    fn test_slide_with_unknown_section_rejected() {
        let yaml = "\
meta: { title: T }
languages: [en]
sections: [intro]
locales:
  en:
    sections:
      intro: { label: Intro }
slides:
  - { section: summary, layout: title }
";
        let err = parse(yaml).unwrap_err();
        assert!(err.to_string().contains("summary"), "unexpected error: {err}");
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let yaml = "\
meta: { title: T }
languages: [en]
sections: [intro, intro]
locales:
  en:
    sections:
      intro: { label: Intro }
slides:
  - { section: intro, layout: title }
";
        assert!(parse(yaml).is_err());
    }

    #[test]
    fn test_invalid_theme_rejected() {
        let yaml = "\
meta: { title: T, theme: sepia }
languages: [en]
sections: [intro]
locales:
  en:
    sections:
      intro: { label: Intro }
slides:
  - { section: intro, layout: title }
";
        assert!(parse(yaml).is_err());
    }

    #[test]
    fn test_block_kinds_parse() {
        let yaml = "\
meta: { title: T }
languages: [en]
sections: [intro]
locales:
  en:
    sections:
      intro:
        label: Intro
        blocks:
          - { kind: heading, text: Hello, level: 1 }
          - { kind: paragraph, text: 'Some **bold** text' }
          - { kind: list, items: [one, two] }
          - kind: stats
            items:
              - { label: Speed, value: '0.26', detail: minutes }
          - { kind: quote, text: Wise words, attribution: Someone }
          - kind: table
            headers: [Metric, Value]
            rows:
              - [Uptime, '99.9%']
slides:
  - { section: intro, layout: title }
";
        let deck = parse(yaml).unwrap();
        let blocks = &deck.locales["en"].sections["intro"].blocks;
        assert_eq!(blocks.len(), 6);
        assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
        assert!(matches!(blocks[3], Block::Stats { .. }));
        assert!(matches!(blocks[5], Block::Table { .. }));
    }
}
