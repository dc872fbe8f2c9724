use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::content::loader;
use crate::nav::keys::{Key, KeyPress, Modifiers};
use crate::nav::{Controller, Effect, Overlay, scroll_spy};
use crate::render::document::{self, DocumentLayout};
use crate::render::overlay::{self, PaletteEvent};
use crate::render::slides::{self, SlideshowEvent};
use crate::theme::Theme;
use crate::watch::DeckWatcher;

const SIDEBAR_BREAKPOINT: f32 = 900.0;
const SIDEBAR_WIDTH: f32 = 230.0;
const TOPBAR_HEIGHT: f32 = 48.0;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopbarAction {
    ToggleLanguage,
    OpenPalette,
    OpenSlideshow,
    ToggleDrawer,
}

enum InputItem {
    Key(KeyPress),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawerEvent {
    Navigate(usize),
    Close,
}

struct ViewerApp {
    controller: Controller,
    deck_path: PathBuf,
    theme: Theme,
    lookahead: f32,
    base_title: String,
    layout: DocumentLayout,
    scroll_offset: f32,
    scroll_target: f32,
    pending_settle: Option<(usize, Instant)>,
    show_hints: bool,
    toast: Option<Toast>,
    watcher: Option<DeckWatcher>,
    viewport_cmds: Vec<egui::ViewportCommand>,
    frame_count: u32,
    fps: f32,
    fps_update: Instant,
}

impl ViewerApp {
    fn compute_scale(rect: egui::Rect) -> f32 {
        (rect.width() / 1280.0).clamp(0.7, 1.4)
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.fps_update.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_update = Instant::now();
        }
    }

    fn reload_deck_if_changed(&mut self) {
        if !self.watcher.as_ref().is_some_and(|w| w.changed()) {
            return;
        }
        match loader::load(&self.deck_path) {
            Ok(deck) => {
                self.controller.replace_deck(deck);
                self.toast = Some(Toast::new("Deck reloaded".to_string()));
            }
            Err(e) => {
                log::warn!("deck reload failed: {e:#}");
                self.toast = Some(Toast::new(format!("Reload failed: {e}")));
            }
        }
    }

    /// Drain controller effects into shell state and viewport commands.
    fn apply_effects(&mut self, ctx: &egui::Context) {
        for effect in self.controller.drain_effects() {
            match effect {
                Effect::ScrollToSection(index) => {
                    if let Some(top) = self.layout.tops.get(index) {
                        self.scroll_target = *top;
                        ctx.request_repaint();
                    }
                }
                Effect::SetFragment(fragment) => {
                    let title = match fragment {
                        Some(fragment) => format!("{} \u{2014} {fragment}", self.base_title),
                        None => self.base_title.clone(),
                    };
                    self.viewport_cmds.push(egui::ViewportCommand::Title(title));
                }
                Effect::Toast(message) => self.toast = Some(Toast::new(message)),
                Effect::ToggleTheme => {
                    self.theme = self.theme.toggled();
                    self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
                }
                Effect::ToggleHints => self.show_hints = !self.show_hints,
                Effect::Quit => self.viewport_cmds.push(egui::ViewportCommand::Close),
            }
        }
    }

    /// Desktop sidebar with one item per section. Returns a clicked index.
    fn draw_sidebar(
        &self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        width: f32,
        scale: f32,
    ) -> Option<usize> {
        let sidebar_rect =
            egui::Rect::from_min_max(rect.left_top(), egui::pos2(rect.left() + width, rect.bottom()));
        ui.painter()
            .rect_filled(sidebar_rect, 0.0, self.theme.panel_background);

        let deck = self.controller.deck();
        let language = self.controller.language();
        let padding = 18.0 * scale;

        let nav_title = deck
            .locale(language)
            .nav_title
            .clone()
            .unwrap_or_else(|| deck.meta.title.clone());
        let title_galley = ui.painter().layout(
            nav_title,
            egui::FontId::proportional(17.0 * scale),
            self.theme.heading_color,
            width - padding * 2.0,
        );
        let title_height = title_galley.rect.height();
        ui.painter().galley(
            egui::pos2(sidebar_rect.left() + padding, sidebar_rect.top() + padding),
            title_galley,
            self.theme.heading_color,
        );

        let mut clicked = None;
        let item_height = 34.0 * scale;
        let mut y = sidebar_rect.top() + padding + title_height + 22.0 * scale;

        for index in 0..deck.section_count() {
            let item_rect = egui::Rect::from_min_size(
                egui::pos2(sidebar_rect.left(), y),
                egui::vec2(width, item_height),
            );
            let response = ui.interact(
                item_rect,
                ui.id().with(("nav_item", index)),
                egui::Sense::click(),
            );
            let active = index == self.controller.active_section();

            if active {
                ui.painter().rect_filled(
                    item_rect,
                    0.0,
                    Theme::with_opacity(self.theme.accent, 0.12),
                );
                let bar = egui::Rect::from_min_size(
                    item_rect.left_top(),
                    egui::vec2(3.0 * scale, item_height),
                );
                ui.painter().rect_filled(bar, 0.0, self.theme.accent);
            }

            let color = if active {
                self.theme.accent
            } else if response.hovered() {
                self.theme.heading_color
            } else {
                Theme::with_opacity(self.theme.foreground, 0.8)
            };
            let label = deck.section_label(language, index);
            let galley = ui.painter().layout_no_wrap(
                label.to_string(),
                egui::FontId::proportional(14.0 * scale),
                color,
            );
            ui.painter().galley(
                egui::pos2(
                    item_rect.left() + padding,
                    item_rect.center().y - galley.rect.height() / 2.0,
                ),
                galley,
                color,
            );

            if response.clicked() {
                clicked = Some(index);
            }
            y += item_height;
        }

        if let Some(footer) = &deck.meta.footer {
            let color = Theme::with_opacity(self.theme.foreground, 0.4);
            let galley = ui.painter().layout(
                footer.clone(),
                egui::FontId::proportional(12.0 * scale),
                color,
                width - padding * 2.0,
            );
            ui.painter().galley(
                egui::pos2(
                    sidebar_rect.left() + padding,
                    sidebar_rect.bottom() - galley.rect.height() - padding,
                ),
                galley,
                color,
            );
        }

        clicked
    }

    /// Slide-in navigation drawer for narrow windows.
    fn draw_drawer(&self, ui: &mut egui::Ui, rect: egui::Rect, scale: f32) -> Option<DrawerEvent> {
        let backdrop = ui.interact(rect, ui.id().with("drawer_backdrop"), egui::Sense::click());
        ui.painter()
            .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(120));

        let width = 250.0 * scale;
        let drawer_rect =
            egui::Rect::from_min_max(rect.left_top(), egui::pos2(rect.left() + width, rect.bottom()));
        ui.interact(drawer_rect, ui.id().with("drawer_panel"), egui::Sense::click());
        ui.painter()
            .rect_filled(drawer_rect, 0.0, self.theme.panel_background);

        let deck = self.controller.deck();
        let language = self.controller.language();
        let padding = 18.0 * scale;
        let item_height = 40.0 * scale;
        let mut clicked = None;
        let mut y = drawer_rect.top() + padding;

        for index in 0..deck.section_count() {
            let item_rect = egui::Rect::from_min_size(
                egui::pos2(drawer_rect.left(), y),
                egui::vec2(width, item_height),
            );
            let response = ui.interact(
                item_rect,
                ui.id().with(("drawer_item", index)),
                egui::Sense::click(),
            );
            let active = index == self.controller.active_section();
            let color = if active {
                self.theme.accent
            } else if response.hovered() {
                self.theme.heading_color
            } else {
                Theme::with_opacity(self.theme.foreground, 0.8)
            };
            let galley = ui.painter().layout_no_wrap(
                deck.section_label(language, index).to_string(),
                egui::FontId::proportional(15.0 * scale),
                color,
            );
            ui.painter().galley(
                egui::pos2(
                    item_rect.left() + padding,
                    item_rect.center().y - galley.rect.height() / 2.0,
                ),
                galley,
                color,
            );
            if response.clicked() {
                clicked = Some(DrawerEvent::Navigate(index));
            }
            y += item_height;
        }

        if clicked.is_none() && backdrop.clicked() {
            return Some(DrawerEvent::Close);
        }
        clicked
    }

    /// Top-right controls: language toggle, palette, presentation mode, and
    /// the drawer toggle on narrow windows.
    fn draw_topbar(
        &self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        scale: f32,
        narrow: bool,
    ) -> Option<TopbarAction> {
        let mut action = None;
        let button_height = 28.0 * scale;
        let gap = 8.0 * scale;
        let mut x = rect.right() - 16.0 * scale;
        let y = rect.top() + (TOPBAR_HEIGHT * scale - button_height) / 2.0;

        let buttons = [
            (
                "\u{25B6}".to_string(),
                TopbarAction::OpenSlideshow,
                "topbar_present",
            ),
            ("\u{2318}K".to_string(), TopbarAction::OpenPalette, "topbar_palette"),
            (
                self.controller.language().to_uppercase(),
                TopbarAction::ToggleLanguage,
                "topbar_lang",
            ),
        ];

        for (label, button_action, id) in buttons {
            let galley = ui.painter().layout_no_wrap(
                label,
                egui::FontId::proportional(13.0 * scale),
                self.theme.foreground,
            );
            let button_width = galley.rect.width() + 20.0 * scale;
            x -= button_width;
            let button_rect = egui::Rect::from_min_size(
                egui::pos2(x, y),
                egui::vec2(button_width, button_height),
            );
            let response = ui.interact(button_rect, ui.id().with(id), egui::Sense::click());
            let bg = if response.hovered() {
                Theme::with_opacity(self.theme.accent, 0.2)
            } else {
                Theme::with_opacity(self.theme.panel_background, 0.9)
            };
            ui.painter().rect_filled(button_rect, 6.0 * scale, bg);
            ui.painter().galley(
                egui::pos2(
                    button_rect.center().x - galley.rect.width() / 2.0,
                    button_rect.center().y - galley.rect.height() / 2.0,
                ),
                galley,
                self.theme.foreground,
            );
            if response.clicked() {
                action = Some(button_action);
            }
            x -= gap;
        }

        if narrow {
            let burger_rect = egui::Rect::from_min_size(
                egui::pos2(rect.left() + 16.0 * scale, y),
                egui::vec2(button_height, button_height),
            );
            let response = ui.interact(burger_rect, ui.id().with("topbar_menu"), egui::Sense::click());
            let color = if response.hovered() {
                self.theme.heading_color
            } else {
                Theme::with_opacity(self.theme.foreground, 0.8)
            };
            let galley = ui.painter().layout_no_wrap(
                "\u{2630}".to_string(),
                egui::FontId::proportional(16.0 * scale),
                color,
            );
            ui.painter().galley(
                egui::pos2(
                    burger_rect.center().x - galley.rect.width() / 2.0,
                    burger_rect.center().y - galley.rect.height() / 2.0,
                ),
                galley,
                color,
            );
            if response.clicked() {
                action = Some(TopbarAction::ToggleDrawer);
            }
        }

        action
    }

    fn draw_toast(&mut self, ui: &egui::Ui, ctx: &egui::Context, rect: egui::Rect, scale: f32) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
        if let Some(ref toast) = self.toast {
            let opacity = toast.opacity();
            if opacity > 0.0 {
                let toast_color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
                let toast_bg = Theme::with_opacity(self.theme.panel_background, opacity * 0.9);
                let galley = ui.painter().layout_no_wrap(
                    toast.message.clone(),
                    egui::FontId::proportional(16.0 * scale),
                    toast_color,
                );
                let padding = 12.0 * scale;
                let toast_rect = egui::Rect::from_min_size(
                    egui::pos2(
                        rect.center().x - galley.rect.width() / 2.0 - padding,
                        rect.bottom() - 70.0 * scale,
                    ),
                    egui::vec2(
                        galley.rect.width() + padding * 2.0,
                        galley.rect.height() + padding * 2.0,
                    ),
                );
                ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
                ui.painter().galley(
                    egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding),
                    galley,
                    toast_color,
                );
                ctx.request_repaint();
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_fps();
        self.reload_deck_if_changed();

        // Collect input inside the closure, apply outside (sending viewport
        // commands from within ctx.input deadlocks).
        let mut items: Vec<InputItem> = Vec::new();
        let mut wheel = 0.0;
        ctx.input(|i| {
            for event in &i.events {
                match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => {
                        if let Some(mapped) = map_key(*key) {
                            items.push(InputItem::Key(KeyPress {
                                key: mapped,
                                mods: Modifiers {
                                    command: modifiers.command,
                                    shift: modifiers.shift,
                                },
                            }));
                        }
                    }
                    egui::Event::Text(text) => items.push(InputItem::Text(text.clone())),
                    _ => {}
                }
            }
            wheel = i.smooth_scroll_delta.y;
        });

        for item in items {
            match item {
                InputItem::Key(press) => self.controller.handle_key(press, false),
                InputItem::Text(text) => self.controller.handle_text(&text),
            }
        }

        // The base page only scrolls when no overlay owns input.
        if self.controller.overlay().is_none() && wheel != 0.0 {
            self.scroll_target -= wheel;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = Self::compute_scale(rect);

                let narrow = rect.width() < SIDEBAR_BREAKPOINT;
                let sidebar_width = if narrow { 0.0 } else { SIDEBAR_WIDTH * scale };
                let content_rect = egui::Rect::from_min_max(
                    egui::pos2(rect.left() + sidebar_width, rect.top()),
                    rect.max,
                );

                let language = self.controller.language().to_string();
                self.layout = document::measure(
                    ui,
                    self.controller.deck(),
                    &language,
                    &self.theme,
                    content_rect.width(),
                    scale,
                );

                // One-shot deep-link scroll, delayed until layout settles.
                if let Some((index, due)) = self.pending_settle {
                    if Instant::now() >= due {
                        if let Some(top) = self.layout.tops.get(index) {
                            self.scroll_target = *top;
                        }
                        self.pending_settle = None;
                    }
                    ctx.request_repaint();
                }

                self.apply_effects(ctx);

                // Animate scroll toward target.
                let viewport_height = content_rect.height();
                let max_scroll = (self.layout.total_height - viewport_height).max(0.0);
                self.scroll_target = self.scroll_target.clamp(0.0, max_scroll);
                let diff = self.scroll_target - self.scroll_offset;
                if diff.abs() < 0.5 {
                    self.scroll_offset = self.scroll_target;
                } else {
                    self.scroll_offset += diff * 0.15;
                    ctx.request_repaint();
                }

                // Scroll spy: authoritative, recomputed every frame.
                let active = scroll_spy::active_section(
                    &self.layout.tops,
                    self.scroll_offset,
                    self.lookahead,
                );
                let progress = scroll_spy::scroll_progress(
                    self.scroll_offset,
                    self.layout.total_height,
                    viewport_height,
                );
                self.controller.on_scroll_spy_update(active, progress);
                self.apply_effects(ctx);

                // Document, clipped to the content area.
                let doc_ui = ui.new_child(
                    egui::UiBuilder::new()
                        .max_rect(content_rect)
                        .id_salt("document"),
                );
                document::draw(
                    &doc_ui,
                    self.controller.deck(),
                    &language,
                    &self.theme,
                    content_rect,
                    &self.layout,
                    self.scroll_offset,
                    scale,
                );

                // Reading progress bar across the top.
                let bar_rect = egui::Rect::from_min_max(
                    rect.left_top(),
                    egui::pos2(
                        rect.left() + rect.width() * progress / 100.0,
                        rect.top() + 3.0 * scale,
                    ),
                );
                ui.painter().rect_filled(bar_rect, 0.0, self.theme.accent);

                let mut nav_click = None;
                if !narrow {
                    nav_click = self.draw_sidebar(ui, rect, sidebar_width, scale);
                }
                let topbar_action = self.draw_topbar(ui, content_rect, scale, narrow);

                if narrow && self.controller.drawer_open() {
                    match self.draw_drawer(ui, rect, scale) {
                        Some(DrawerEvent::Close) => self.controller.toggle_drawer(),
                        Some(DrawerEvent::Navigate(index)) => nav_click = Some(index),
                        None => {}
                    }
                }

                if let Some(index) = nav_click {
                    self.controller.navigate_to_index(index);
                    self.apply_effects(ctx);
                }
                match topbar_action {
                    Some(TopbarAction::ToggleLanguage) => {
                        self.controller.toggle_language();
                        self.apply_effects(ctx);
                    }
                    Some(TopbarAction::OpenPalette) => self.controller.open_palette(),
                    Some(TopbarAction::OpenSlideshow) => self.controller.open_slideshow(),
                    Some(TopbarAction::ToggleDrawer) => self.controller.toggle_drawer(),
                    None => {}
                }

                // Exclusive overlays.
                let palette_event = match self.controller.overlay() {
                    Overlay::Palette(palette) => {
                        overlay::draw_palette(ui, palette, &language, &self.theme, rect, scale)
                    }
                    _ => None,
                };
                match palette_event {
                    Some(PaletteEvent::Hover(index)) => self.controller.palette_hover(index),
                    Some(PaletteEvent::ClickRow(index)) => {
                        self.controller.palette_click(index);
                        self.apply_effects(ctx);
                    }
                    Some(PaletteEvent::ClickBackdrop) => self.controller.close_overlay(),
                    None => {}
                }

                let slideshow_event = match self.controller.overlay() {
                    Overlay::Slideshow(show) => slides::draw_slideshow(
                        ui,
                        self.controller.deck(),
                        &language,
                        show,
                        &self.theme,
                        rect,
                        scale,
                    ),
                    _ => None,
                };
                match slideshow_event {
                    Some(SlideshowEvent::Close) => self.controller.close_overlay(),
                    Some(SlideshowEvent::Jump(index)) => self.controller.slideshow_jump(index),
                    None => {}
                }

                if self.show_hints && self.controller.overlay().is_none() {
                    overlay::draw_hints(
                        ui,
                        &self.theme,
                        rect,
                        scale,
                        self.controller.deck().section_count(),
                    );
                }

                self.draw_toast(ui, ctx, rect, scale);

                // FPS overlay
                let fps_text = format!("{:.0} fps", self.fps);
                let fps_color = Theme::with_opacity(self.theme.foreground, 0.3);
                let fps_galley = ui.painter().layout_no_wrap(
                    fps_text,
                    egui::FontId::monospace(12.0 * scale),
                    fps_color,
                );
                let fps_pos = egui::pos2(
                    rect.right() - fps_galley.rect.width() - 10.0 * scale,
                    rect.bottom() - fps_galley.rect.height() - 8.0 * scale,
                );
                ui.painter().galley(fps_pos, fps_galley, fps_color);
            });

        for cmd in self.viewport_cmds.drain(..) {
            ctx.send_viewport_cmd(cmd);
        }
    }
}

fn map_key(key: egui::Key) -> Option<Key> {
    Some(match key {
        egui::Key::ArrowUp => Key::ArrowUp,
        egui::Key::ArrowDown => Key::ArrowDown,
        egui::Key::ArrowLeft => Key::ArrowLeft,
        egui::Key::ArrowRight => Key::ArrowRight,
        egui::Key::Space => Key::Space,
        egui::Key::Enter => Key::Enter,
        egui::Key::Escape => Key::Escape,
        egui::Key::Home => Key::Home,
        egui::Key::End => Key::End,
        egui::Key::Backspace => Key::Backspace,
        egui::Key::Num0 => Key::Digit(0),
        egui::Key::Num1 => Key::Digit(1),
        egui::Key::Num2 => Key::Digit(2),
        egui::Key::Num3 => Key::Digit(3),
        egui::Key::Num4 => Key::Digit(4),
        egui::Key::Num5 => Key::Digit(5),
        egui::Key::Num6 => Key::Digit(6),
        egui::Key::Num7 => Key::Digit(7),
        egui::Key::Num8 => Key::Digit(8),
        egui::Key::Num9 => Key::Digit(9),
        egui::Key::K => Key::Letter('k'),
        egui::Key::P => Key::Letter('p'),
        egui::Key::Q => Key::Letter('q'),
        egui::Key::H => Key::Letter('h'),
        _ => return None,
    })
}

pub fn run(
    file: PathBuf,
    windowed: bool,
    section: Option<String>,
    language: Option<String>,
    present: bool,
) -> anyhow::Result<()> {
    let deck = loader::load(&file)?;
    let config = Config::load_or_default();

    let theme_name = deck
        .meta
        .theme
        .clone()
        .or_else(|| config.defaults.as_ref().and_then(|d| d.theme.clone()))
        .unwrap_or_else(|| "light".to_string());
    let theme = Theme::from_name(&theme_name);

    let windowed = windowed
        || config
            .defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false);
    let start_language =
        language.or_else(|| config.defaults.as_ref().and_then(|d| d.language.clone()));

    let lookahead = config.lookahead_margin();
    let settle_delay = Duration::from_millis(config.settle_delay_ms());
    let title = deck.meta.title.clone();
    let base_title = title.clone();

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let mut controller = Controller::new(deck);
            let settle_target =
                controller.bootstrap(section.as_deref(), start_language.as_deref());
            if present {
                controller.open_slideshow();
            }

            let watcher = match DeckWatcher::new(&file, cc.egui_ctx.clone()) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    log::warn!("deck watching disabled: {e:#}");
                    None
                }
            };

            let now = Instant::now();
            Ok(Box::new(ViewerApp {
                controller,
                deck_path: file,
                theme,
                lookahead,
                base_title,
                layout: DocumentLayout::default(),
                scroll_offset: 0.0,
                scroll_target: 0.0,
                pending_settle: settle_target.map(|index| (index, now + settle_delay)),
                show_hints: false,
                toast: None,
                watcher,
                viewport_cmds: Vec::new(),
                frame_count: 0,
                fps: 0.0,
                fps_update: now,
            }))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
