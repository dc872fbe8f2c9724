pub mod loader;

use std::collections::BTreeMap;

use serde::Deserialize;

/// A parsed deck: metadata, the configured section sequence, one content
/// tree per language, and the curated slide list for presentation mode.
#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    pub meta: DeckMeta,
    pub languages: Vec<String>,
    pub sections: Vec<String>,
    pub locales: BTreeMap<String, Locale>,
    pub slides: Vec<SlideDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckMeta {
    pub title: String,

    #[serde(default)]
    pub footer: Option<String>,

    #[serde(default)]
    pub theme: Option<String>,

    #[serde(default)]
    pub default_language: Option<String>,
}

/// Content tree for one language. Read-only at runtime; the active language
/// selects which tree is live.
#[derive(Debug, Clone, Deserialize)]
pub struct Locale {
    #[serde(default)]
    pub nav_title: Option<String>,

    pub sections: BTreeMap<String, SectionContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionContent {
    pub label: String,

    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Block {
    Heading {
        text: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    Paragraph {
        text: String,
    },
    List {
        items: Vec<String>,
    },
    Stats {
        items: Vec<Stat>,
    },
    Quote {
        text: String,
        #[serde(default)]
        attribution: Option<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

fn default_heading_level() -> u8 {
    2
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,

    #[serde(default)]
    pub detail: Option<String>,
}

/// One entry in the hand-curated slide sequence. Slides reference sections
/// for their content but are otherwise independent of the scroll page.
#[derive(Debug, Clone, Deserialize)]
pub struct SlideDef {
    pub section: String,
    pub layout: SlideLayout,

    /// Optional heading override for this slide.
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideLayout {
    Title,
    Statement,
    Bullets,
    Stats,
    Closing,
}

impl Deck {
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Position of a section id in the configured sequence.
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s == id)
    }

    pub fn section_id(&self, index: usize) -> Option<&str> {
        self.sections.get(index).map(String::as_str)
    }

    /// Index of the configured default language, falling back to the first.
    pub fn default_language_index(&self) -> usize {
        self.meta
            .default_language
            .as_deref()
            .and_then(|code| self.languages.iter().position(|l| l == code))
            .unwrap_or(0)
    }

    pub fn language_index(&self, code: &str) -> Option<usize> {
        self.languages.iter().position(|l| l == code)
    }

    pub fn locale(&self, language: &str) -> &Locale {
        self.locales
            .get(language)
            .or_else(|| {
                self.languages
                    .first()
                    .and_then(|first| self.locales.get(first))
            })
            .expect("validated deck has a locale for every language")
    }

    pub fn section_label<'a>(&'a self, language: &str, index: usize) -> &'a str {
        let Some(id) = self.sections.get(index) else {
            return "";
        };
        self.locale(language)
            .sections
            .get(id)
            .map(|s| s.label.as_str())
            .unwrap_or(id)
    }

    pub fn section_content<'a>(&'a self, language: &str, index: usize) -> Option<&'a SectionContent> {
        let id = self.sections.get(index)?;
        self.locale(language).sections.get(id)
    }

    pub fn slide_content<'a>(&'a self, language: &str, slide: &SlideDef) -> Option<&'a SectionContent> {
        self.locale(language).sections.get(&slide.section)
    }
}
