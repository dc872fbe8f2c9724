use crate::content::Deck;
use crate::nav::keys::{Key, KeyPress};

/// What executing a palette command means to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    GoToSection(usize),
    ToggleLanguage,
    ToggleTheme,
    StartSlideshow,
}

#[derive(Debug, Clone)]
pub struct Command {
    pub action: CommandAction,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteOutcome {
    Stay,
    Close,
    Execute(CommandAction),
}

/// The command palette while open: free query text, a clamped selection into
/// the filtered list, and the catalog built for the current language.
///
/// The catalog is rebuilt on every open and on every language change so
/// labels never go stale.
#[derive(Debug, Clone)]
pub struct CommandPalette {
    query: String,
    selected: usize,
    commands: Vec<Command>,
}

impl CommandPalette {
    pub fn open(deck: &Deck, language: &str) -> Self {
        Self {
            query: String::new(),
            selected: 0,
            commands: build_catalog(deck, language),
        }
    }

    /// Rebuild the catalog after a language change, keeping the query. The
    /// filtered list changes, so the selection resets.
    pub fn relocalize(&mut self, deck: &Deck, language: &str) {
        self.commands = build_catalog(deck, language);
        self.selected = 0;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Indices into the catalog whose labels contain the query,
    /// case-insensitively. An empty query matches everything.
    pub fn filtered(&self) -> Vec<usize> {
        let needle = self.query.to_lowercase();
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, cmd)| cmd.label.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn command(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn append(&mut self, text: &str) {
        self.query.push_str(text);
        self.selected = 0;
    }

    pub fn backspace(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    /// Pointer hover keeps the keyboard cursor in sync.
    pub fn hover(&mut self, filtered_index: usize) {
        let len = self.filtered().len();
        if filtered_index < len {
            self.selected = filtered_index;
        }
    }

    /// Pointer click on a visible row: same as Enter on that row.
    pub fn click(&mut self, filtered_index: usize) -> PaletteOutcome {
        let filtered = self.filtered();
        match filtered.get(filtered_index) {
            Some(&catalog_index) => PaletteOutcome::Execute(self.commands[catalog_index].action),
            None => PaletteOutcome::Stay,
        }
    }

    pub fn handle_key(&mut self, press: KeyPress) -> PaletteOutcome {
        let filtered = self.filtered();
        match press.key {
            Key::ArrowDown => {
                if !filtered.is_empty() && self.selected + 1 < filtered.len() {
                    self.selected += 1;
                }
                PaletteOutcome::Stay
            }
            Key::ArrowUp => {
                self.selected = self.selected.saturating_sub(1);
                PaletteOutcome::Stay
            }
            Key::Enter => match filtered.get(self.selected) {
                Some(&catalog_index) => {
                    PaletteOutcome::Execute(self.commands[catalog_index].action)
                }
                None => PaletteOutcome::Stay,
            },
            Key::Escape => PaletteOutcome::Close,
            Key::Backspace => {
                self.backspace();
                PaletteOutcome::Stay
            }
            _ => PaletteOutcome::Stay,
        }
    }
}

fn build_catalog(deck: &Deck, language: &str) -> Vec<Command> {
    let mut commands: Vec<Command> = deck
        .sections
        .iter()
        .enumerate()
        .map(|(index, _)| Command {
            action: CommandAction::GoToSection(index),
            label: go_to_label(language, deck.section_label(language, index)),
        })
        .collect();

    if deck.languages.len() > 1 {
        let current = deck
            .language_index(language)
            .unwrap_or(deck.default_language_index());
        let next = &deck.languages[(current + 1) % deck.languages.len()];
        commands.push(Command {
            action: CommandAction::ToggleLanguage,
            label: switch_language_label(language, next),
        });
    }

    commands.push(Command {
        action: CommandAction::ToggleTheme,
        label: localized(language, "Toggle theme", "Cambiar tema"),
    });
    commands.push(Command {
        action: CommandAction::StartSlideshow,
        label: localized(language, "Presentation mode", "Modo presentaci\u{f3}n"),
    });

    commands
}

fn go_to_label(language: &str, section_label: &str) -> String {
    match language {
        "es" => format!("Ir a {section_label}"),
        _ => format!("Go to {section_label}"),
    }
}

/// The toggle-language label is phrased in the current language and names
/// the language the toggle switches to.
fn switch_language_label(current: &str, next: &str) -> String {
    match (current, next) {
        ("en", "es") => "Switch to Spanish".to_string(),
        ("es", "en") => "Cambiar a Ingl\u{e9}s".to_string(),
        ("es", other) => format!("Cambiar a {}", language_name(other)),
        (_, other) => format!("Switch to {}", language_name(other)),
    }
}

pub fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "es" => "Espa\u{f1}ol",
        other => other,
    }
}

fn localized(language: &str, en: &str, es: &str) -> String {
    if language == "es" { es.to_string() } else { en.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader;

    const SAMPLE: &str = include_str!("../../../sample-decks/peak-review.yaml");

    fn sample_palette() -> (crate::content::Deck, CommandPalette) {
        let deck = loader::parse(SAMPLE).unwrap();
        let palette = CommandPalette::open(&deck, "en");
        (deck, palette)
    }

    #[test]
    fn test_catalog_has_navigation_and_actions() {
        let (deck, palette) = sample_palette();
        let filtered = palette.filtered();
        // One command per section plus language, theme, slideshow actions.
        assert_eq!(filtered.len(), deck.section_count() + 3);
    }

    #[test]
    fn test_empty_query_returns_full_catalog() {
        let (_, palette) = sample_palette();
        assert_eq!(palette.filtered().len(), palette.commands.len());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let (_, mut palette) = sample_palette();
        palette.append("LEAR");
        let filtered = palette.filtered();
        assert!(!filtered.is_empty());
        for index in filtered {
            assert!(
                palette.command(index).unwrap().label.to_lowercase().contains("lear"),
                "label should contain the query"
            );
        }
    }

    #[test]
    fn test_selection_resets_on_every_filter_change() {
        let (_, mut palette) = sample_palette();
        palette.handle_key(KeyPress::plain(Key::ArrowDown));
        palette.handle_key(KeyPress::plain(Key::ArrowDown));
        assert_eq!(palette.selected(), 2);
        palette.append("g");
        assert_eq!(palette.selected(), 0);
        palette.handle_key(KeyPress::plain(Key::ArrowDown));
        palette.backspace();
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn test_selection_clamps_without_wraparound() {
        let (_, mut palette) = sample_palette();
        let last = palette.filtered().len() - 1;
        for _ in 0..palette.filtered().len() + 5 {
            palette.handle_key(KeyPress::plain(Key::ArrowDown));
        }
        assert_eq!(palette.selected(), last);
        for _ in 0..palette.filtered().len() + 5 {
            palette.handle_key(KeyPress::plain(Key::ArrowUp));
        }
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn test_enter_executes_selected_command() {
        let (_, mut palette) = sample_palette();
        let outcome = palette.handle_key(KeyPress::plain(Key::Enter));
        assert_eq!(outcome, PaletteOutcome::Execute(CommandAction::GoToSection(0)));
    }

    #[test]
    fn test_escape_closes_without_executing() {
        let (_, mut palette) = sample_palette();
        assert_eq!(
            palette.handle_key(KeyPress::plain(Key::Escape)),
            PaletteOutcome::Close
        );
    }

    #[test]
    fn test_no_results_disables_enter_and_arrows() {
        let (_, mut palette) = sample_palette();
        palette.append("zzzzzz no such command");
        assert!(palette.filtered().is_empty());
        assert_eq!(
            palette.handle_key(KeyPress::plain(Key::Enter)),
            PaletteOutcome::Stay
        );
        palette.handle_key(KeyPress::plain(Key::ArrowDown));
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn test_click_executes_visible_row() {
        let (deck, mut palette) = sample_palette();
        let target = deck.section_label("en", 1).to_string();
        palette.append(&target);
        let outcome = palette.click(0);
        assert_eq!(outcome, PaletteOutcome::Execute(CommandAction::GoToSection(1)));
        assert_eq!(palette.click(99), PaletteOutcome::Stay);
    }

    #[test]
    fn test_hover_moves_selection() {
        let (_, mut palette) = sample_palette();
        palette.hover(3);
        assert_eq!(palette.selected(), 3);
        palette.hover(9999);
        assert_eq!(palette.selected(), 3);
    }

    #[test]
    fn test_labels_localize_with_language() {
        let (deck, _) = sample_palette();
        let en = CommandPalette::open(&deck, "en");
        let es = CommandPalette::open(&deck, "es");
        assert!(en.commands.iter().any(|c| c.label == "Switch to Spanish"));
        assert!(es.commands.iter().any(|c| c.label == "Cambiar a Ingl\u{e9}s"));
        assert!(es.commands.iter().any(|c| c.label.starts_with("Ir a ")));
    }
}
