use eframe::egui::{self, FontId, Pos2, Sense};

use crate::content::{Block, Deck, SectionContent, SlideDef, SlideLayout};
use crate::render::text;
use crate::slideshow::Slideshow;
use crate::theme::Theme;

/// Pointer interactions on the slideshow chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowEvent {
    Close,
    Jump(usize),
}

/// Render the full presentation-mode overlay: the current slide plus chrome
/// (close control, prev/next, position dots, progress indicator, counter).
pub fn draw_slideshow(
    ui: &mut egui::Ui,
    deck: &Deck,
    language: &str,
    show: &Slideshow,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> Option<SlideshowEvent> {
    // Swallow pointer input aimed at the base page underneath.
    ui.interact(rect, ui.id().with("show_backdrop"), Sense::click());
    ui.painter().rect_filled(rect, 0.0, theme.background);

    if let Some(slide) = deck.slides.get(show.index()) {
        render_slide(ui, deck, language, slide, theme, rect, scale);
    }

    draw_chrome(ui, deck, show, theme, rect, scale)
}

/// Render one slide using its configured layout.
pub fn render_slide(
    ui: &egui::Ui,
    deck: &Deck,
    language: &str,
    slide: &SlideDef,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let Some(content) = deck.slide_content(language, slide) else {
        return;
    };
    match slide.layout {
        SlideLayout::Title => render_title(ui, deck, slide, content, theme, rect, scale),
        SlideLayout::Statement => render_statement(ui, slide, content, theme, rect, scale),
        SlideLayout::Bullets => render_bullets(ui, slide, content, theme, rect, scale),
        SlideLayout::Stats => render_stats(ui, slide, content, theme, rect, scale),
        SlideLayout::Closing => render_closing(ui, deck, language, slide, theme, rect, scale),
    }
}

fn slide_heading<'a>(slide: &'a SlideDef, content: &'a SectionContent) -> Option<&'a str> {
    if let Some(title) = slide.title.as_deref() {
        return Some(title);
    }
    content.blocks.iter().find_map(|b| match b {
        Block::Heading { text, .. } => Some(text.as_str()),
        _ => None,
    })
}

fn first_paragraph(content: &SectionContent) -> Option<&str> {
    content.blocks.iter().find_map(|b| match b {
        Block::Paragraph { text } => Some(text.as_str()),
        _ => None,
    })
}

fn render_title(
    ui: &egui::Ui,
    deck: &Deck,
    slide: &SlideDef,
    content: &SectionContent,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let title = slide
        .title
        .as_deref()
        .or_else(|| slide_heading(slide, content))
        .unwrap_or(&deck.meta.title);
    let subtitle = first_paragraph(content);

    let title_size = theme.h1_size * 1.5 * scale;
    let width = rect.width() * 0.8;
    let job = text::text_job(title, title_size, theme.heading_color, width);
    let galley = ui.painter().layout_job(job);
    let title_height = galley.rect.height();
    let mut y = rect.center().y - title_height / 2.0 - 40.0 * scale;
    let x = rect.center().x - galley.rect.width() / 2.0;
    ui.painter()
        .galley(Pos2::new(x, y), galley, theme.heading_color);
    y += title_height + 28.0 * scale;

    if let Some(subtitle) = subtitle {
        let job = text::text_job(
            subtitle,
            theme.h3_size * scale,
            Theme::with_opacity(theme.foreground, 0.85),
            width,
        );
        let galley = ui.painter().layout_job(job);
        let x = rect.center().x - galley.rect.width() / 2.0;
        ui.painter()
            .galley(Pos2::new(x, y), galley, theme.foreground);
    }
}

fn render_statement(
    ui: &egui::Ui,
    slide: &SlideDef,
    content: &SectionContent,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let width = rect.width() * 0.7;
    let left = rect.center().x - width / 2.0;

    // Eyebrow, heading, then every paragraph at display size.
    let mut blocks: Vec<(String, f32, egui::Color32)> = Vec::new();
    blocks.push((
        content.label.to_uppercase(),
        theme.small_size * 1.2 * scale,
        theme.accent,
    ));
    if let Some(heading) = slide_heading(slide, content) {
        blocks.push((
            heading.to_string(),
            theme.h1_size * scale,
            theme.heading_color,
        ));
    }
    for block in &content.blocks {
        if let Block::Paragraph { text } = block {
            blocks.push((text.clone(), theme.h3_size * scale, theme.foreground));
        }
    }

    let gap = 26.0 * scale;
    let galleys: Vec<_> = blocks
        .iter()
        .map(|(s, size, color)| {
            let job = text::text_job(s, *size, *color, width);
            ui.painter().layout_job(job)
        })
        .collect();
    let total: f32 =
        galleys.iter().map(|g| g.rect.height()).sum::<f32>() + gap * (galleys.len() as f32 - 1.0);

    let mut y = (rect.center().y - total / 2.0).max(rect.top() + 60.0 * scale);
    for (galley, (_, _, color)) in galleys.into_iter().zip(&blocks) {
        let x = left + (width - galley.rect.width()) / 2.0;
        let height = galley.rect.height();
        ui.painter().galley(Pos2::new(x, y), galley, *color);
        y += height + gap;
    }
}

fn render_bullets(
    ui: &egui::Ui,
    slide: &SlideDef,
    content: &SectionContent,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let padding = 110.0 * scale;
    let content_rect = rect.shrink(padding);
    let slide_scale = scale * 1.35;
    let mut y = content_rect.top();

    if let Some(heading) = slide_heading(slide, content) {
        let height = text::draw_text(
            ui,
            heading,
            Pos2::new(content_rect.left(), y),
            theme.h2_size * slide_scale,
            theme.heading_color,
            content_rect.width(),
            true,
        );
        y += height + 36.0 * scale;
    }

    for block in &content.blocks {
        match block {
            Block::List { .. } | Block::Quote { .. } => {
                let height = text::draw_block(
                    ui,
                    block,
                    theme,
                    Pos2::new(content_rect.left(), y),
                    content_rect.width(),
                    slide_scale,
                    true,
                );
                y += height + 30.0 * scale;
            }
            // Secondary headings become group labels between lists.
            Block::Heading { text, .. } if Some(text.as_str()) != slide_heading(slide, content) => {
                let height = text::draw_text(
                    ui,
                    text,
                    Pos2::new(content_rect.left(), y),
                    theme.h3_size * slide_scale,
                    theme.accent,
                    content_rect.width(),
                    true,
                );
                y += height + 18.0 * scale;
            }
            _ => {}
        }
        if y > content_rect.bottom() {
            break;
        }
    }
}

fn render_stats(
    ui: &egui::Ui,
    slide: &SlideDef,
    content: &SectionContent,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let padding = 110.0 * scale;
    let content_rect = rect.shrink(padding);
    let slide_scale = scale * 1.3;
    let mut y = content_rect.top();

    if let Some(heading) = slide_heading(slide, content) {
        let height = text::draw_text(
            ui,
            heading,
            Pos2::new(content_rect.left(), y),
            theme.h2_size * slide_scale,
            theme.heading_color,
            content_rect.width(),
            true,
        );
        y += height + 44.0 * scale;
    }

    for block in &content.blocks {
        match block {
            Block::Stats { .. } | Block::Table { .. } => {
                let height = text::draw_block(
                    ui,
                    block,
                    theme,
                    Pos2::new(content_rect.left(), y),
                    content_rect.width(),
                    slide_scale,
                    true,
                );
                y += height + 34.0 * scale;
            }
            Block::Paragraph { text } => {
                let color = Theme::with_opacity(theme.foreground, 0.7);
                let height = text::draw_text(
                    ui,
                    text,
                    Pos2::new(content_rect.left(), y),
                    theme.body_size * slide_scale,
                    color,
                    content_rect.width(),
                    true,
                );
                y += height + 24.0 * scale;
            }
            _ => {}
        }
        if y > content_rect.bottom() {
            break;
        }
    }
}

fn render_closing(
    ui: &egui::Ui,
    deck: &Deck,
    language: &str,
    slide: &SlideDef,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let title = slide.title.as_deref().unwrap_or(&deck.meta.title);
    let galley = ui.painter().layout_no_wrap(
        title.to_string(),
        FontId::proportional(theme.h1_size * 1.3 * scale),
        theme.heading_color,
    );
    let x = rect.center().x - galley.rect.width() / 2.0;
    let y = rect.center().y - galley.rect.height() / 2.0;
    ui.painter()
        .galley(Pos2::new(x, y), galley.clone(), theme.heading_color);

    let line2 = deck
        .locale(language)
        .nav_title
        .clone()
        .unwrap_or_else(|| deck.meta.title.clone());
    let sub_color = Theme::with_opacity(theme.foreground, 0.6);
    let sub_galley = ui.painter().layout_no_wrap(
        line2,
        FontId::proportional(theme.h3_size * scale),
        sub_color,
    );
    let sub_x = rect.center().x - sub_galley.rect.width() / 2.0;
    ui.painter().galley(
        Pos2::new(sub_x, y + galley.rect.height() + 24.0 * scale),
        sub_galley,
        sub_color,
    );
}

fn draw_chrome(
    ui: &mut egui::Ui,
    deck: &Deck,
    show: &Slideshow,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> Option<SlideshowEvent> {
    let mut event = None;
    let dim = Theme::with_opacity(theme.foreground, 0.45);

    // Close control, top right.
    let close_size = 34.0 * scale;
    let close_rect = egui::Rect::from_min_size(
        Pos2::new(rect.right() - close_size - 18.0 * scale, rect.top() + 18.0 * scale),
        egui::vec2(close_size, close_size),
    );
    let close_response = ui.interact(close_rect, ui.id().with("show_close"), Sense::click());
    let close_color = if close_response.hovered() { theme.foreground } else { dim };
    let close_galley = ui.painter().layout_no_wrap(
        "\u{2715}".to_string(),
        FontId::proportional(22.0 * scale),
        close_color,
    );
    ui.painter().galley(
        Pos2::new(
            close_rect.center().x - close_galley.rect.width() / 2.0,
            close_rect.center().y - close_galley.rect.height() / 2.0,
        ),
        close_galley,
        close_color,
    );
    if close_response.clicked() {
        event = Some(SlideshowEvent::Close);
    }

    // Home control, top left.
    let home_rect = egui::Rect::from_min_size(
        Pos2::new(rect.left() + 18.0 * scale, rect.top() + 18.0 * scale),
        egui::vec2(close_size, close_size),
    );
    let home_response = ui.interact(home_rect, ui.id().with("show_home"), Sense::click());
    let home_color = if home_response.hovered() { theme.foreground } else { dim };
    let home_galley = ui.painter().layout_no_wrap(
        "\u{2302}".to_string(),
        FontId::proportional(22.0 * scale),
        home_color,
    );
    ui.painter().galley(
        Pos2::new(
            home_rect.center().x - home_galley.rect.width() / 2.0,
            home_rect.center().y - home_galley.rect.height() / 2.0,
        ),
        home_galley,
        home_color,
    );
    if home_response.clicked() {
        event = Some(SlideshowEvent::Jump(0));
    }

    // Prev / next chevrons at the side edges.
    let chevron_size = 44.0 * scale;
    for (label, id, target, enabled) in [
        (
            "\u{2039}",
            "show_prev",
            show.index().saturating_sub(1),
            show.index() > 0,
        ),
        (
            "\u{203A}",
            "show_next",
            show.index() + 1,
            show.index() + 1 < show.total(),
        ),
    ] {
        let x = if id == "show_prev" {
            rect.left() + 16.0 * scale
        } else {
            rect.right() - chevron_size - 16.0 * scale
        };
        let chevron_rect = egui::Rect::from_min_size(
            Pos2::new(x, rect.center().y - chevron_size / 2.0),
            egui::vec2(chevron_size, chevron_size),
        );
        let response = ui.interact(chevron_rect, ui.id().with(id), Sense::click());
        let opacity = match (enabled, response.hovered()) {
            (false, _) => 0.15,
            (true, true) => 0.9,
            (true, false) => 0.45,
        };
        let color = Theme::with_opacity(theme.foreground, opacity);
        let galley = ui.painter().layout_no_wrap(
            label.to_string(),
            FontId::proportional(36.0 * scale),
            color,
        );
        ui.painter().galley(
            Pos2::new(
                chevron_rect.center().x - galley.rect.width() / 2.0,
                chevron_rect.center().y - galley.rect.height() / 2.0,
            ),
            galley,
            color,
        );
        if enabled && response.clicked() {
            event = Some(SlideshowEvent::Jump(target));
        }
    }

    // Slide position dots, bottom center. Clicking a dot jumps directly.
    let total = show.total();
    let dot = 9.0 * scale;
    let dot_gap = 10.0 * scale;
    let dots_width = total as f32 * dot + (total as f32 - 1.0) * dot_gap;
    let dots_y = rect.bottom() - 46.0 * scale;
    for i in 0..total {
        let x = rect.center().x - dots_width / 2.0 + i as f32 * (dot + dot_gap);
        let dot_rect = egui::Rect::from_min_size(
            Pos2::new(x, dots_y),
            egui::vec2(dot, dot),
        );
        let response = ui.interact(
            dot_rect.expand(4.0 * scale),
            ui.id().with(("show_dot", i)),
            Sense::click(),
        );
        let color = if i == show.index() {
            theme.accent
        } else if response.hovered() {
            Theme::with_opacity(theme.foreground, 0.6)
        } else {
            Theme::with_opacity(theme.foreground, 0.25)
        };
        ui.painter().circle_filled(dot_rect.center(), dot / 2.0, color);
        if response.clicked() {
            event = Some(SlideshowEvent::Jump(i));
        }
    }

    // Progress indicator along the bottom edge.
    let progress_rect = egui::Rect::from_min_max(
        Pos2::new(rect.left(), rect.bottom() - 3.0 * scale),
        Pos2::new(
            rect.left() + rect.width() * show.progress(),
            rect.bottom(),
        ),
    );
    ui.painter().rect_filled(progress_rect, 0.0, theme.accent);

    // Footer and counter.
    if let Some(footer) = &deck.meta.footer {
        let footer_color = Theme::with_opacity(theme.foreground, 0.4);
        let galley = ui.painter().layout_no_wrap(
            footer.clone(),
            FontId::proportional(14.0 * scale),
            footer_color,
        );
        let pos = Pos2::new(rect.left() + 20.0 * scale, rect.bottom() - 28.0 * scale);
        ui.painter().galley(pos, galley, footer_color);
    }

    let counter_text = format!("{} / {}", show.index() + 1, show.total());
    let counter_color = Theme::with_opacity(theme.foreground, 0.35);
    let counter_galley = ui.painter().layout_no_wrap(
        counter_text,
        FontId::monospace(14.0 * scale),
        counter_color,
    );
    let counter_pos = Pos2::new(
        rect.right() - counter_galley.rect.width() - 20.0 * scale,
        rect.bottom() - 28.0 * scale,
    );
    ui.painter().galley(counter_pos, counter_galley, counter_color);

    event
}
