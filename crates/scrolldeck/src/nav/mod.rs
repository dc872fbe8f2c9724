pub mod deep_link;
pub mod keys;
pub mod scroll_spy;

#[cfg(test)]
mod tests;

use log::debug;

use crate::content::Deck;
use crate::palette::{self, CommandAction, CommandPalette, PaletteOutcome};
use crate::slideshow::{Slideshow, SlideshowOutcome};
use keys::{KeyPress, RouterAction};

/// The one overlay that may own global keyboard input. A tagged variant
/// instead of independent booleans: the palette and the slideshow cannot
/// both be open.
#[derive(Debug, Clone)]
pub enum Overlay {
    None,
    Palette(CommandPalette),
    Slideshow(Slideshow),
}

impl Overlay {
    pub fn is_none(&self) -> bool {
        matches!(self, Overlay::None)
    }
}

/// Side effects the controller requests from the shell. Collected during
/// event handling and drained once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Smooth-scroll the document so the section's top is in view.
    ScrollToSection(usize),
    /// Replace the location fragment; `None` clears it (home section).
    SetFragment(Option<String>),
    Toast(String),
    ToggleTheme,
    ToggleHints,
    Quit,
}

/// Single source of truth for section navigation: reconciles scroll
/// position, explicit navigation, keyboard input, and deep links.
pub struct Controller {
    deck: Deck,
    active_section: usize,
    scroll_progress: f32,
    language: usize,
    drawer_open: bool,
    overlay: Overlay,
    last_fragment: Option<String>,
    effects: Vec<Effect>,
}

impl Controller {
    pub fn new(deck: Deck) -> Self {
        let language = deck.default_language_index();
        Self {
            deck,
            active_section: 0,
            scroll_progress: 0.0,
            language,
            drawer_open: false,
            overlay: Overlay::None,
            last_fragment: None,
            effects: Vec::new(),
        }
    }

    /// Apply startup overrides: an optional deep-link fragment and an
    /// optional language code. Returns the deep-linked section index so the
    /// shell can scroll to it once layout has settled; unrecognized values
    /// are ignored.
    pub fn bootstrap(&mut self, fragment: Option<&str>, language: Option<&str>) -> Option<usize> {
        if let Some(code) = language {
            if let Some(index) = self.deck.language_index(code) {
                self.language = index;
            }
        }

        let target = fragment
            .and_then(deep_link::parse)
            .and_then(|id| self.deck.section_index(id));
        if let Some(index) = target {
            debug!("deep link: starting at section {index}");
            self.active_section = index;
            self.sync_fragment();
        }
        target
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn language(&self) -> &str {
        &self.deck.languages[self.language]
    }

    pub fn active_section(&self) -> usize {
        self.active_section
    }

    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Explicit navigation (sidebar, drawer, palette). Unknown ids are
    /// silent no-ops.
    pub fn navigate_to(&mut self, section_id: &str) {
        if let Some(index) = self.deck.section_index(section_id) {
            self.navigate_to_index(index);
        }
    }

    /// The active section updates optimistically; the scroll spy reconciles
    /// once the smooth scroll settles.
    pub fn navigate_to_index(&mut self, index: usize) {
        if index >= self.deck.section_count() {
            return;
        }
        debug!("navigate to section {index}");
        self.active_section = index;
        self.drawer_open = false;
        self.effects.push(Effect::ScrollToSection(index));
        self.sync_fragment();
    }

    pub fn next_section(&mut self) {
        let last = self.deck.section_count().saturating_sub(1);
        if self.active_section < last {
            self.navigate_to_index(self.active_section + 1);
        }
    }

    pub fn prev_section(&mut self) {
        if self.active_section > 0 {
            self.navigate_to_index(self.active_section - 1);
        }
    }

    /// Scroll spy is authoritative: it unconditionally overwrites the active
    /// section and progress, even right after an optimistic `navigate_to`.
    pub fn on_scroll_spy_update(&mut self, active: usize, progress: f32) {
        let active = active.min(self.deck.section_count().saturating_sub(1));
        if active != self.active_section {
            debug!("scroll spy: active section {} -> {active}", self.active_section);
        }
        self.active_section = active;
        self.scroll_progress = progress;
        self.sync_fragment();
    }

    /// Advance to the next language in the configured cycle. Content swaps
    /// reactively; an open palette is relocalized so labels never go stale.
    pub fn toggle_language(&mut self) {
        if self.deck.languages.len() < 2 {
            return;
        }
        self.language = (self.language + 1) % self.deck.languages.len();
        let code = self.deck.languages[self.language].clone();
        debug!("language -> {code}");
        if let Overlay::Palette(p) = &mut self.overlay {
            p.relocalize(&self.deck, &code);
        }
        let name = palette::language_name(&code);
        let toast = if code == "es" {
            format!("Idioma: {name}")
        } else {
            format!("Language: {name}")
        };
        self.effects.push(Effect::Toast(toast));
    }

    pub fn open_palette(&mut self) {
        let language = self.language().to_string();
        self.overlay = Overlay::Palette(CommandPalette::open(&self.deck, &language));
    }

    pub fn open_slideshow(&mut self) {
        self.overlay = Overlay::Slideshow(Slideshow::open(self.deck.slide_count()));
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    /// Global key dispatch. An open overlay owns the keyboard exclusively;
    /// otherwise keys go through the router. `typing` marks focused text
    /// input, which suppresses the router entirely.
    pub fn handle_key(&mut self, press: KeyPress, typing: bool) {
        match &mut self.overlay {
            Overlay::Palette(p) => match p.handle_key(press) {
                PaletteOutcome::Stay => {}
                PaletteOutcome::Close => self.overlay = Overlay::None,
                PaletteOutcome::Execute(action) => {
                    self.overlay = Overlay::None;
                    self.apply_command(action);
                }
            },
            Overlay::Slideshow(s) => match s.handle_key(press) {
                SlideshowOutcome::Stay => {}
                SlideshowOutcome::Close => self.overlay = Overlay::None,
            },
            Overlay::None => {
                let count = self.deck.section_count();
                match keys::route(press, count, typing) {
                    Some(RouterAction::OpenPalette) => self.open_palette(),
                    Some(RouterAction::OpenSlideshow) => self.open_slideshow(),
                    Some(RouterAction::NextSection) => self.next_section(),
                    Some(RouterAction::PrevSection) => self.prev_section(),
                    Some(RouterAction::JumpToSection(index)) => self.navigate_to_index(index),
                    Some(RouterAction::ToggleHints) => self.effects.push(Effect::ToggleHints),
                    Some(RouterAction::Quit) => self.effects.push(Effect::Quit),
                    None => {}
                }
            }
        }
    }

    /// Typed characters reach the palette's query field only.
    pub fn handle_text(&mut self, text: &str) {
        if let Overlay::Palette(p) = &mut self.overlay {
            p.append(text);
        }
    }

    pub fn palette_hover(&mut self, filtered_index: usize) {
        if let Overlay::Palette(p) = &mut self.overlay {
            p.hover(filtered_index);
        }
    }

    pub fn palette_click(&mut self, filtered_index: usize) {
        if let Overlay::Palette(p) = &mut self.overlay {
            match p.click(filtered_index) {
                PaletteOutcome::Execute(action) => {
                    self.overlay = Overlay::None;
                    self.apply_command(action);
                }
                PaletteOutcome::Close => self.overlay = Overlay::None,
                PaletteOutcome::Stay => {}
            }
        }
    }

    pub fn slideshow_jump(&mut self, index: usize) {
        if let Overlay::Slideshow(s) = &mut self.overlay {
            s.jump(index);
        }
    }

    /// Swap in a reloaded deck, preserving as much navigation state as the
    /// new deck allows.
    pub fn replace_deck(&mut self, deck: Deck) {
        let active_id = self
            .deck
            .section_id(self.active_section)
            .map(str::to_string);
        let language_code = self.language().to_string();

        self.deck = deck;
        self.language = self
            .deck
            .language_index(&language_code)
            .unwrap_or_else(|| self.deck.default_language_index());
        self.active_section = active_id
            .as_deref()
            .and_then(|id| self.deck.section_index(id))
            .unwrap_or(0);

        let language = self.language().to_string();
        match &mut self.overlay {
            Overlay::Palette(p) => p.relocalize(&self.deck, &language),
            Overlay::Slideshow(s) => s.resize(self.deck.slide_count()),
            Overlay::None => {}
        }
        self.sync_fragment();
    }

    fn apply_command(&mut self, action: CommandAction) {
        match action {
            CommandAction::GoToSection(index) => self.navigate_to_index(index),
            CommandAction::ToggleLanguage => self.toggle_language(),
            CommandAction::ToggleTheme => self.effects.push(Effect::ToggleTheme),
            CommandAction::StartSlideshow => self.open_slideshow(),
        }
    }

    /// Keep the location fragment in sync: cleared on the home section,
    /// `#<id>` otherwise. Emitted as a replacement only when it changes.
    fn sync_fragment(&mut self) {
        let fragment = if self.active_section == 0 {
            None
        } else {
            self.deck
                .section_id(self.active_section)
                .map(deep_link::format)
        };
        if fragment != self.last_fragment {
            self.last_fragment = fragment.clone();
            self.effects.push(Effect::SetFragment(fragment));
        }
    }
}
