/// Scroll-spy computation: translate a scroll offset into the active section
/// and the overall reading progress. Pure and idempotent; the shell reruns
/// it every frame with whatever offsets the layout pass produced.

/// The active section is the last one (in document order) whose top sits at
/// or above the scroll offset plus the lookahead margin. If none qualifies,
/// the first section is active.
pub fn active_section(section_tops: &[f32], scroll_offset: f32, lookahead: f32) -> usize {
    let mut current = 0;
    for (index, top) in section_tops.iter().enumerate() {
        if *top <= scroll_offset + lookahead {
            current = index;
        }
    }
    current
}

/// Reading progress in percent. Zero when the document fits in the viewport.
pub fn scroll_progress(scroll_offset: f32, document_height: f32, viewport_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_offset / scrollable * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPS: [f32; 4] = [0.0, 800.0, 1900.0, 3100.0];
    const LOOKAHEAD: f32 = 200.0;

    #[test]
    fn test_top_of_document_selects_first() {
        assert_eq!(active_section(&TOPS, 0.0, LOOKAHEAD), 0);
    }

    #[test]
    fn test_lookahead_margin_activates_early() {
        // 200px short of the second section already counts as inside it.
        assert_eq!(active_section(&TOPS, 599.0, LOOKAHEAD), 0);
        assert_eq!(active_section(&TOPS, 600.0, LOOKAHEAD), 1);
    }

    #[test]
    fn test_last_matching_section_wins() {
        assert_eq!(active_section(&TOPS, 3200.0, LOOKAHEAD), 3);
    }

    #[test]
    fn test_scrolled_above_everything_defaults_to_first() {
        assert_eq!(active_section(&TOPS, -500.0, LOOKAHEAD), 0);
    }

    #[test]
    fn test_no_sections_yields_first() {
        assert_eq!(active_section(&[], 100.0, LOOKAHEAD), 0);
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let a = active_section(&TOPS, 2000.0, LOOKAHEAD);
        let b = active_section(&TOPS, 2000.0, LOOKAHEAD);
        assert_eq!(a, b);
    }

    #[test]
    fn test_progress_bounds() {
        let doc = 4000.0;
        let viewport = 900.0;
        assert_eq!(scroll_progress(0.0, doc, viewport), 0.0);
        assert_eq!(scroll_progress(doc - viewport, doc, viewport), 100.0);

        let mut offset = 0.0;
        while offset <= doc - viewport {
            let p = scroll_progress(offset, doc, viewport);
            assert!((0.0..=100.0).contains(&p), "progress {p} out of bounds");
            offset += 137.0;
        }
    }

    #[test]
    fn test_progress_zero_when_content_fits() {
        assert_eq!(scroll_progress(50.0, 600.0, 900.0), 0.0);
        assert_eq!(scroll_progress(0.0, 900.0, 900.0), 0.0);
    }

    #[test]
    fn test_progress_clamps_overscroll() {
        assert_eq!(scroll_progress(5000.0, 4000.0, 900.0), 100.0);
        assert_eq!(scroll_progress(-50.0, 4000.0, 900.0), 0.0);
    }
}
