use std::sync::OnceLock;

use eframe::egui::{self, Color32, FontFamily, FontId, Pos2, Stroke};
use regex::Regex;

use crate::content::{Block, Stat};
use crate::theme::Theme;

/// Inline markup span: `**bold**` and `_italic_` inside content strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
}

fn markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*|_([^_\s][^_]*)_").unwrap())
}

pub fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for caps in markup_regex().captures_iter(text) {
        let m = caps.get(0).unwrap();
        if m.start() > cursor {
            spans.push(Span::Text(text[cursor..m.start()].to_string()));
        }
        if let Some(bold) = caps.get(1) {
            spans.push(Span::Bold(bold.as_str().to_string()));
        } else if let Some(italic) = caps.get(2) {
            spans.push(Span::Italic(italic.as_str().to_string()));
        }
        cursor = m.end();
    }
    if cursor < text.len() {
        spans.push(Span::Text(text[cursor..].to_string()));
    }
    spans
}

/// Create a LayoutJob from a content string with inline markup applied.
pub fn text_job(
    text: &str,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    for span in parse_spans(text) {
        match span {
            Span::Text(s) => {
                let format = egui::text::TextFormat {
                    font_id: FontId::new(font_size, FontFamily::Proportional),
                    color,
                    ..Default::default()
                };
                job.append(&s, 0.0, format);
            }
            Span::Bold(s) => {
                let format = egui::text::TextFormat {
                    font_id: FontId::new(font_size + 1.0, FontFamily::Proportional),
                    color,
                    ..Default::default()
                };
                job.append(&s, 0.0, format);
            }
            Span::Italic(s) => {
                let format = egui::text::TextFormat {
                    font_id: FontId::new(font_size, FontFamily::Proportional),
                    color,
                    italics: true,
                    ..Default::default()
                };
                job.append(&s, 0.0, format);
            }
        }
    }
    job
}

/// Lay out and optionally paint a content string. Returns the height used.
pub fn draw_text(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font_size: f32,
    color: Color32,
    max_width: f32,
    paint: bool,
) -> f32 {
    let job = text_job(text, font_size, color, max_width);
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    if paint {
        ui.painter().galley(pos, galley, color);
    }
    height
}

/// Lay out and optionally paint one content block. Returns the height used,
/// so callers can stack blocks and measure sections with the same code path.
pub fn draw_block(
    ui: &egui::Ui,
    block: &Block,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
    paint: bool,
) -> f32 {
    match block {
        Block::Heading { text, level } => draw_text(
            ui,
            text,
            pos,
            theme.heading_size(*level) * scale,
            theme.heading_color,
            max_width,
            paint,
        ),
        Block::Paragraph { text } => draw_text(
            ui,
            text,
            pos,
            theme.body_size * scale,
            theme.foreground,
            max_width,
            paint,
        ),
        Block::List { items } => draw_list(ui, items, theme, pos, max_width, scale, paint),
        Block::Stats { items } => draw_stats(ui, items, theme, pos, max_width, scale, paint),
        Block::Quote { text, attribution } => {
            draw_quote(ui, text, attribution.as_deref(), theme, pos, max_width, scale, paint)
        }
        Block::Table { headers, rows } => {
            draw_table(ui, headers, rows, theme, pos, max_width, scale, paint)
        }
    }
}

fn draw_list(
    ui: &egui::Ui,
    items: &[String],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
    paint: bool,
) -> f32 {
    let font_size = theme.body_size * scale;
    let marker_width = 26.0 * scale;
    let item_spacing = 8.0 * scale;
    let mut y_offset = 0.0;

    for item in items {
        if paint {
            let marker_galley = ui.painter().layout_no_wrap(
                "\u{2022}".to_string(),
                FontId::proportional(font_size),
                theme.accent,
            );
            ui.painter().galley(
                Pos2::new(pos.x, pos.y + y_offset),
                marker_galley,
                theme.accent,
            );
        }
        let text_pos = Pos2::new(pos.x + marker_width, pos.y + y_offset);
        let text_height = draw_text(
            ui,
            item,
            text_pos,
            font_size,
            theme.foreground,
            max_width - marker_width,
            paint,
        );
        y_offset += text_height + item_spacing;
    }

    (y_offset - item_spacing).max(0.0)
}

fn draw_stats(
    ui: &egui::Ui,
    items: &[Stat],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
    paint: bool,
) -> f32 {
    if items.is_empty() {
        return 0.0;
    }

    let per_row = items.len().min(3);
    let gap = 14.0 * scale;
    let card_width = (max_width - gap * (per_row as f32 - 1.0)) / per_row as f32;
    let card_height = 104.0 * scale;
    let padding = 14.0 * scale;
    let rows = items.len().div_ceil(per_row);

    if paint {
        for (i, stat) in items.iter().enumerate() {
            let col = i % per_row;
            let row = i / per_row;
            let card_pos = Pos2::new(
                pos.x + col as f32 * (card_width + gap),
                pos.y + row as f32 * (card_height + gap),
            );
            let rect = egui::Rect::from_min_size(card_pos, egui::vec2(card_width, card_height));
            ui.painter().rect_filled(rect, 8.0 * scale, theme.panel_background);

            let label_color = Theme::with_opacity(theme.foreground, 0.65);
            let label_galley = ui.painter().layout(
                stat.label.clone(),
                FontId::proportional(theme.small_size * scale),
                label_color,
                card_width - padding * 2.0,
            );
            ui.painter().galley(
                Pos2::new(card_pos.x + padding, card_pos.y + padding),
                label_galley,
                label_color,
            );

            let value_galley = ui.painter().layout_no_wrap(
                stat.value.clone(),
                FontId::proportional(theme.h3_size * scale),
                theme.accent,
            );
            let value_y = card_pos.y + padding + theme.small_size * scale + 8.0 * scale;
            ui.painter().galley(
                Pos2::new(card_pos.x + padding, value_y),
                value_galley,
                theme.accent,
            );

            if let Some(detail) = &stat.detail {
                let detail_color = Theme::with_opacity(theme.foreground, 0.5);
                let detail_galley = ui.painter().layout(
                    detail.clone(),
                    FontId::proportional(theme.small_size * 0.9 * scale),
                    detail_color,
                    card_width - padding * 2.0,
                );
                let detail_y = value_y + theme.h3_size * scale + 6.0 * scale;
                ui.painter().galley(
                    Pos2::new(card_pos.x + padding, detail_y),
                    detail_galley,
                    detail_color,
                );
            }
        }
    }

    rows as f32 * card_height + (rows as f32 - 1.0) * gap
}

#[allow(clippy::too_many_arguments)]
fn draw_quote(
    ui: &egui::Ui,
    text: &str,
    attribution: Option<&str>,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
    paint: bool,
) -> f32 {
    let quote_size = theme.body_size * 1.2 * scale;
    let bar_width = 4.0 * scale;
    let indent = 20.0 * scale;
    let quote_width = max_width - indent;

    let quoted = format!("\u{201C}{text}\u{201D}");
    let job = text_job(&quoted, quote_size, theme.foreground, quote_width);
    let galley = ui.painter().layout_job(job);
    let text_height = galley.rect.height();

    if paint {
        let bar_rect = egui::Rect::from_min_size(pos, egui::vec2(bar_width, text_height));
        ui.painter().rect_filled(bar_rect, 2.0, theme.accent);
        ui.painter().galley(
            Pos2::new(pos.x + indent, pos.y),
            galley,
            theme.foreground,
        );
    }

    let mut total = text_height;
    if let Some(attribution) = attribution {
        let attr_color = Theme::with_opacity(theme.foreground, 0.6);
        let attr_size = theme.small_size * scale;
        total += 10.0 * scale;
        if paint {
            let attr_galley = ui.painter().layout_no_wrap(
                format!("\u{2014} {attribution}"),
                FontId::proportional(attr_size),
                attr_color,
            );
            ui.painter().galley(
                Pos2::new(pos.x + indent, pos.y + total),
                attr_galley,
                attr_color,
            );
        }
        total += attr_size * 1.3;
    }
    total
}

#[allow(clippy::too_many_arguments)]
fn draw_table(
    ui: &egui::Ui,
    headers: &[String],
    rows: &[Vec<String>],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
    paint: bool,
) -> f32 {
    let columns = headers.len().max(1);
    let column_width = max_width / columns as f32;
    let row_height = theme.body_size * scale * 1.7;
    let font_size = theme.body_size * scale * 0.95;

    if paint {
        for (col, header) in headers.iter().enumerate() {
            let galley = ui.painter().layout(
                header.clone(),
                FontId::proportional(font_size),
                theme.heading_color,
                column_width - 8.0 * scale,
            );
            ui.painter().galley(
                Pos2::new(pos.x + col as f32 * column_width, pos.y),
                galley,
                theme.heading_color,
            );
        }
        let line_y = pos.y + row_height - 6.0 * scale;
        ui.painter().line_segment(
            [
                Pos2::new(pos.x, line_y),
                Pos2::new(pos.x + max_width, line_y),
            ],
            Stroke::new(1.0, Theme::with_opacity(theme.foreground, 0.25)),
        );

        for (row_index, row) in rows.iter().enumerate() {
            let y = pos.y + row_height * (row_index + 1) as f32;
            for (col, cell) in row.iter().enumerate().take(columns) {
                let color = if col == 0 {
                    theme.foreground
                } else {
                    Theme::with_opacity(theme.foreground, 0.8)
                };
                let galley = ui.painter().layout(
                    cell.clone(),
                    FontId::proportional(font_size),
                    color,
                    column_width - 8.0 * scale,
                );
                ui.painter().galley(
                    Pos2::new(pos.x + col as f32 * column_width, y),
                    galley,
                    color,
                );
            }
        }
    }

    row_height * (rows.len() + 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_one_span() {
        let spans = parse_spans("no markup here");
        assert_eq!(spans, vec![Span::Text("no markup here".to_string())]);
    }

    #[test]
    fn test_bold_and_italic_spans() {
        let spans = parse_spans("a **bold** and _leaning_ word");
        assert_eq!(
            spans,
            vec![
                Span::Text("a ".to_string()),
                Span::Bold("bold".to_string()),
                Span::Text(" and ".to_string()),
                Span::Italic("leaning".to_string()),
                Span::Text(" word".to_string()),
            ]
        );
    }

    #[test]
    fn test_underscore_in_identifiers_is_not_italic() {
        // A trailing identifier like snake_case must stay literal text.
        let spans = parse_spans("see peak_review for details");
        assert!(spans.iter().all(|s| matches!(s, Span::Text(_))));
    }

    #[test]
    fn test_empty_string() {
        assert!(parse_spans("").is_empty());
    }
}
