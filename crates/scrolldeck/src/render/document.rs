use eframe::egui::{self, FontId, Pos2};

use crate::content::Deck;
use crate::render::text;
use crate::theme::Theme;

/// Measured geometry of the scrolling document: one top offset per section,
/// in document order, plus the total content height. Inputs to the scroll
/// spy and targets for smooth scrolling.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    pub tops: Vec<f32>,
    pub total_height: f32,
}

const TOP_PADDING: f32 = 48.0;
const SECTION_GAP: f32 = 110.0;
const BLOCK_GAP: f32 = 22.0;
const EYEBROW_GAP: f32 = 14.0;
const BOTTOM_PADDING: f32 = 160.0;

/// Measure every section at the given width. Rerun whenever the content
/// area resizes or the language changes; cheap enough to run per frame.
pub fn measure(
    ui: &egui::Ui,
    deck: &Deck,
    language: &str,
    theme: &Theme,
    width: f32,
    scale: f32,
) -> DocumentLayout {
    let mut tops = Vec::with_capacity(deck.section_count());
    let mut y = TOP_PADDING * scale;

    for index in 0..deck.section_count() {
        tops.push(y);
        let height = draw_section(ui, deck, language, index, theme, Pos2::ZERO, width, scale, false);
        y += height + SECTION_GAP * scale;
    }

    DocumentLayout {
        tops,
        total_height: y + (BOTTOM_PADDING - SECTION_GAP) * scale,
    }
}

/// Paint all sections that intersect the viewport.
#[allow(clippy::too_many_arguments)]
pub fn draw(
    ui: &egui::Ui,
    deck: &Deck,
    language: &str,
    theme: &Theme,
    rect: egui::Rect,
    layout: &DocumentLayout,
    scroll_offset: f32,
    scale: f32,
) {
    let width = rect.width();
    for (index, top) in layout.tops.iter().enumerate() {
        let screen_y = rect.top() + top - scroll_offset;
        let next_top = layout
            .tops
            .get(index + 1)
            .copied()
            .unwrap_or(layout.total_height);
        let height = next_top - top;
        if screen_y + height < rect.top() || screen_y > rect.bottom() {
            continue;
        }
        draw_section(
            ui,
            deck,
            language,
            index,
            theme,
            Pos2::new(rect.left(), screen_y),
            width,
            scale,
            true,
        );
    }
}

/// Lay out (and optionally paint) one section: an eyebrow label followed by
/// its content blocks. Returns the height used.
#[allow(clippy::too_many_arguments)]
fn draw_section(
    ui: &egui::Ui,
    deck: &Deck,
    language: &str,
    index: usize,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    scale: f32,
    paint: bool,
) -> f32 {
    let Some(content) = deck.section_content(language, index) else {
        return 0.0;
    };

    let padding = 56.0 * scale;
    let content_width = (width - padding * 2.0).max(120.0);
    let mut y = 0.0;

    let eyebrow_size = theme.small_size * scale;
    if paint {
        let eyebrow = content.label.to_uppercase();
        let galley = ui.painter().layout_no_wrap(
            eyebrow,
            FontId::proportional(eyebrow_size),
            theme.accent,
        );
        ui.painter()
            .galley(Pos2::new(pos.x + padding, pos.y), galley, theme.accent);
    }
    y += eyebrow_size + EYEBROW_GAP * scale;

    for block in &content.blocks {
        let block_pos = Pos2::new(pos.x + padding, pos.y + y);
        let height = text::draw_block(ui, block, theme, block_pos, content_width, scale, paint);
        y += height + BLOCK_GAP * scale;
    }

    (y - BLOCK_GAP * scale).max(eyebrow_size)
}
