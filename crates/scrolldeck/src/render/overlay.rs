use eframe::egui::{self, FontId, Pos2, Sense};

use crate::palette::CommandPalette;
use crate::theme::Theme;

/// Pointer interactions on the command palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteEvent {
    Hover(usize),
    ClickRow(usize),
    ClickBackdrop,
}

const MAX_VISIBLE_ROWS: usize = 9;

/// Draw the command palette overlay. Returns any pointer interaction for the
/// shell to feed back into the controller.
pub fn draw_palette(
    ui: &mut egui::Ui,
    palette: &CommandPalette,
    language: &str,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> Option<PaletteEvent> {
    let mut event = None;

    // Dimmed backdrop; clicking it dismisses the palette.
    let backdrop = ui.interact(rect, ui.id().with("palette_backdrop"), Sense::click());
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(140));
    if backdrop.clicked() {
        event = Some(PaletteEvent::ClickBackdrop);
    }

    let filtered = palette.filtered();
    let row_height = 40.0 * scale;
    let input_height = 52.0 * scale;
    let visible_rows = filtered.len().clamp(1, MAX_VISIBLE_ROWS);

    let panel_width = (560.0 * scale).min(rect.width() - 48.0 * scale);
    let panel_height = input_height + visible_rows as f32 * row_height + 12.0 * scale;
    let panel_rect = egui::Rect::from_min_size(
        Pos2::new(
            rect.center().x - panel_width / 2.0,
            rect.top() + rect.height() * 0.18,
        ),
        egui::vec2(panel_width, panel_height),
    );

    // Swallow clicks on the panel itself so they don't hit the backdrop.
    ui.interact(panel_rect, ui.id().with("palette_panel"), Sense::click());
    ui.painter()
        .rect_filled(panel_rect, 12.0 * scale, theme.panel_background);

    // Query line with placeholder and a block caret.
    let padding = 18.0 * scale;
    let query_size = theme.body_size * 1.1 * scale;
    let query_pos = Pos2::new(
        panel_rect.left() + padding,
        panel_rect.top() + (input_height - query_size) / 2.0,
    );
    if palette.query().is_empty() {
        let placeholder = if language == "es" {
            "Buscar comandos..."
        } else {
            "Search commands..."
        };
        let color = Theme::with_opacity(theme.foreground, 0.4);
        let galley = ui.painter().layout_no_wrap(
            placeholder.to_string(),
            FontId::proportional(query_size),
            color,
        );
        ui.painter().galley(query_pos, galley, color);
    } else {
        let galley = ui.painter().layout_no_wrap(
            palette.query().to_string(),
            FontId::proportional(query_size),
            theme.heading_color,
        );
        let query_width = galley.rect.width();
        ui.painter().galley(query_pos, galley, theme.heading_color);
        let caret = egui::Rect::from_min_size(
            Pos2::new(query_pos.x + query_width + 2.0 * scale, query_pos.y),
            egui::vec2(2.0 * scale, query_size),
        );
        ui.painter().rect_filled(caret, 0.0, theme.accent);
    }

    let hint_color = Theme::with_opacity(theme.foreground, 0.35);
    let hint_galley = ui.painter().layout_no_wrap(
        "\u{2318}K".to_string(),
        FontId::monospace(theme.small_size * scale),
        hint_color,
    );
    ui.painter().galley(
        Pos2::new(
            panel_rect.right() - padding - hint_galley.rect.width(),
            panel_rect.top() + (input_height - theme.small_size * scale) / 2.0,
        ),
        hint_galley,
        hint_color,
    );

    let divider_y = panel_rect.top() + input_height;
    ui.painter().line_segment(
        [
            Pos2::new(panel_rect.left(), divider_y),
            Pos2::new(panel_rect.right(), divider_y),
        ],
        egui::Stroke::new(1.0, Theme::with_opacity(theme.foreground, 0.15)),
    );

    if filtered.is_empty() {
        let message = if language == "es" {
            "Sin resultados"
        } else {
            "No results found"
        };
        let color = Theme::with_opacity(theme.foreground, 0.45);
        let galley = ui.painter().layout_no_wrap(
            message.to_string(),
            FontId::proportional(theme.body_size * scale),
            color,
        );
        ui.painter().galley(
            Pos2::new(
                panel_rect.center().x - galley.rect.width() / 2.0,
                divider_y + row_height / 2.0,
            ),
            galley,
            color,
        );
        return event;
    }

    for (visible_index, &catalog_index) in filtered.iter().take(MAX_VISIBLE_ROWS).enumerate() {
        let Some(command) = palette.command(catalog_index) else {
            continue;
        };
        let row_rect = egui::Rect::from_min_size(
            Pos2::new(
                panel_rect.left(),
                divider_y + 6.0 * scale + visible_index as f32 * row_height,
            ),
            egui::vec2(panel_width, row_height),
        );
        let response = ui.interact(
            row_rect,
            ui.id().with(("palette_row", visible_index)),
            Sense::click(),
        );

        let selected = visible_index == palette.selected();
        if selected {
            ui.painter().rect_filled(
                row_rect.shrink2(egui::vec2(6.0 * scale, 2.0 * scale)),
                6.0 * scale,
                Theme::with_opacity(theme.accent, 0.15),
            );
        }

        let color = if selected { theme.accent } else { theme.foreground };
        let galley = ui.painter().layout_no_wrap(
            command.label.clone(),
            FontId::proportional(theme.body_size * scale),
            color,
        );
        ui.painter().galley(
            Pos2::new(
                row_rect.left() + padding,
                row_rect.center().y - galley.rect.height() / 2.0,
            ),
            galley,
            color,
        );

        if selected {
            let arrow_galley = ui.painter().layout_no_wrap(
                "\u{2192}".to_string(),
                FontId::proportional(theme.body_size * scale),
                theme.accent,
            );
            ui.painter().galley(
                Pos2::new(
                    row_rect.right() - padding - arrow_galley.rect.width(),
                    row_rect.center().y - arrow_galley.rect.height() / 2.0,
                ),
                arrow_galley,
                theme.accent,
            );
        }

        if response.clicked() {
            event = Some(PaletteEvent::ClickRow(visible_index));
        } else if response.hovered() && !selected {
            event = Some(PaletteEvent::Hover(visible_index));
        }
    }

    event
}

/// Keyboard hints overlay, toggled with H.
pub fn draw_hints(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32, section_count: usize) {
    let digits = section_count.saturating_sub(1).min(9);
    let digit_row = format!("0\u{2013}{digits}");
    let shortcuts = [
        ("\u{2193} \u{2192} Space", "Next section"),
        ("\u{2191} \u{2190}", "Previous section"),
        (digit_row.as_str(), "Jump to section"),
        ("Cmd/Ctrl+K", "Command palette"),
        ("Cmd/Ctrl+Shift+P", "Presentation mode"),
        ("H", "Toggle these hints"),
        ("Q", "Quit"),
    ];

    let bg = Theme::with_opacity(theme.panel_background, 0.92);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 20.0 * scale;
    let line_height = 28.0 * scale;
    let hud_height = shortcuts.len() as f32 * line_height + padding * 2.0 + 34.0 * scale;
    let hud_width = 330.0 * scale;
    let hud_rect = egui::Rect::from_min_size(
        Pos2::new(
            rect.right() - hud_width - 24.0 * scale,
            rect.bottom() - hud_height - 24.0 * scale,
        ),
        egui::vec2(hud_width, hud_height),
    );

    ui.painter().rect_filled(hud_rect, 10.0 * scale, bg);

    let title_galley = ui.painter().layout_no_wrap(
        "Keyboard Shortcuts".to_string(),
        FontId::proportional(16.0 * scale),
        Theme::with_opacity(theme.heading_color, 0.9),
    );
    ui.painter().galley(
        Pos2::new(hud_rect.left() + padding, hud_rect.top() + padding),
        title_galley,
        text_color,
    );

    let mut y = hud_rect.top() + padding + 34.0 * scale;
    for (key, desc) in &shortcuts {
        let key_galley = ui.painter().layout_no_wrap(
            key.to_string(),
            FontId::monospace(13.0 * scale),
            key_color,
        );
        ui.painter().galley(
            Pos2::new(hud_rect.left() + padding, y),
            key_galley,
            key_color,
        );

        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            FontId::proportional(13.0 * scale),
            text_color,
        );
        ui.painter().galley(
            Pos2::new(hud_rect.left() + padding + 150.0 * scale, y),
            desc_galley,
            text_color,
        );
        y += line_height;
    }
}
