use super::keys::{Key, KeyPress};
use super::{Controller, Effect, Overlay};
use crate::content::loader;

const SAMPLE: &str = include_str!("../../../../sample-decks/peak-review.yaml");

fn controller() -> Controller {
    Controller::new(loader::parse(SAMPLE).unwrap())
}

#[test]
fn test_initial_state() {
    let c = controller();
    assert_eq!(c.active_section(), 0);
    assert_eq!(c.scroll_progress(), 0.0);
    assert_eq!(c.language(), "en");
    assert!(c.overlay().is_none());
}

#[test]
fn test_navigate_to_unknown_section_is_a_no_op() {
    let mut c = controller();
    c.navigate_to("does-not-exist");
    assert_eq!(c.active_section(), 0);
    assert!(c.drain_effects().is_empty());
}

#[test]
fn test_navigation_clamps_at_both_ends() {
    let mut c = controller();
    c.prev_section();
    assert_eq!(c.active_section(), 0);

    let last = c.deck().section_count() - 1;
    c.navigate_to_index(last);
    c.next_section();
    assert_eq!(c.active_section(), last);
}

#[test]
fn test_digit_jump_lands_on_position() {
    let mut c = controller();
    c.handle_key(KeyPress::plain(Key::Digit(2)), false);
    assert_eq!(c.deck().section_id(c.active_section()), Some("learnings"));
    assert!(
        c.drain_effects().contains(&Effect::ScrollToSection(2)),
        "jump should request a smooth scroll"
    );
}

#[test]
fn test_out_of_range_digit_is_a_no_op() {
    let mut c = controller();
    c.handle_key(KeyPress::plain(Key::Digit(9)), false);
    assert_eq!(c.active_section(), 0);
    assert!(c.drain_effects().is_empty());
}

#[test]
fn test_scroll_spy_overrides_optimistic_navigation() {
    let mut c = controller();
    c.navigate_to_index(3);
    assert_eq!(c.active_section(), 3);
    // Last writer wins: the spy's verdict replaces the optimistic update.
    c.on_scroll_spy_update(1, 22.5);
    assert_eq!(c.active_section(), 1);
    assert_eq!(c.scroll_progress(), 22.5);
}

#[test]
fn test_fragment_set_and_cleared() {
    let mut c = controller();
    c.navigate_to("purpose");
    let effects = c.drain_effects();
    assert!(effects.contains(&Effect::SetFragment(Some("#purpose".to_string()))));

    c.navigate_to("hero");
    let effects = c.drain_effects();
    assert!(
        effects.contains(&Effect::SetFragment(None)),
        "home section clears the fragment"
    );
}

#[test]
fn test_fragment_emitted_only_on_change() {
    let mut c = controller();
    c.on_scroll_spy_update(2, 40.0);
    c.drain_effects();
    c.on_scroll_spy_update(2, 41.0);
    let effects = c.drain_effects();
    assert!(
        !effects.iter().any(|e| matches!(e, Effect::SetFragment(_))),
        "unchanged fragment must not be re-emitted"
    );
}

#[test]
fn test_deep_link_bootstrap() {
    let mut c = controller();
    let target = c.bootstrap(Some("#purpose"), None);
    assert_eq!(target, Some(1));
    assert_eq!(c.deck().section_id(c.active_section()), Some("purpose"));
}

#[test]
fn test_unrecognized_deep_link_falls_back_to_first() {
    let mut c = controller();
    assert_eq!(c.bootstrap(Some("#nope"), None), None);
    assert_eq!(c.active_section(), 0);
}

#[test]
fn test_language_cycle_returns_to_start() {
    let mut c = controller();
    let original = c.language().to_string();
    let n = c.deck().languages.len();
    for _ in 0..n {
        c.toggle_language();
    }
    assert_eq!(c.language(), original);
}

#[test]
fn test_language_toggle_swaps_content_tree() {
    let mut c = controller();
    let index = c.deck().section_index("next-steps").unwrap();
    let before = c.deck().section_label(c.language(), index).to_string();
    c.toggle_language();
    assert_eq!(c.language(), "es");
    let after = c.deck().section_label(c.language(), index);
    assert_ne!(before, after, "active subtree should follow the language");
}

#[test]
fn test_slideshow_owns_the_keyboard() {
    let mut c = controller();
    c.handle_key(KeyPress::command_shift(Key::Letter('p')), false);
    assert!(matches!(c.overlay(), Overlay::Slideshow(_)));
    c.drain_effects();

    // Section-navigation shortcuts must not reach the base page.
    c.handle_key(KeyPress::plain(Key::ArrowDown), false);
    c.handle_key(KeyPress::plain(Key::Space), false);
    c.handle_key(KeyPress::plain(Key::Digit(2)), false);

    let Overlay::Slideshow(show) = c.overlay() else {
        panic!("slideshow should still be open");
    };
    assert_eq!(show.index(), 2, "only the slide index advances");
    assert_eq!(c.active_section(), 0, "base-page section is untouched");
    assert!(c.drain_effects().is_empty(), "no scroll requests while viewing");
}

#[test]
fn test_closing_slideshow_leaves_base_page_unchanged() {
    let mut c = controller();
    c.on_scroll_spy_update(2, 45.0);
    c.drain_effects();

    c.open_slideshow();
    c.handle_key(KeyPress::plain(Key::ArrowRight), false);
    c.handle_key(KeyPress::plain(Key::Escape), false);

    assert!(c.overlay().is_none());
    assert_eq!(c.active_section(), 2);
    assert_eq!(c.scroll_progress(), 45.0);
}

#[test]
fn test_palette_search_and_execute() {
    let mut c = controller();
    c.handle_key(KeyPress::command(Key::Letter('k')), false);
    assert!(matches!(c.overlay(), Overlay::Palette(_)));

    c.handle_text("lear");
    c.handle_key(KeyPress::plain(Key::Enter), false);

    assert!(c.overlay().is_none(), "palette closes after executing");
    assert_eq!(c.deck().section_id(c.active_section()), Some("learnings"));
}

#[test]
fn test_palette_escape_executes_nothing() {
    let mut c = controller();
    c.open_palette();
    c.handle_text("lear");
    c.handle_key(KeyPress::plain(Key::Escape), false);
    assert!(c.overlay().is_none());
    assert_eq!(c.active_section(), 0);
}

#[test]
fn test_palette_language_action_relabels_catalog() {
    let mut c = controller();
    c.open_palette();
    c.handle_text("switch to spanish");
    c.handle_key(KeyPress::plain(Key::Enter), false);
    assert_eq!(c.language(), "es");

    // Reopen: labels are rebuilt for the new language.
    c.open_palette();
    let Overlay::Palette(p) = c.overlay() else {
        panic!("palette should be open");
    };
    assert!(
        p.filtered()
            .iter()
            .any(|&i| p.command(i).unwrap().label == "Cambiar a Ingl\u{e9}s")
    );
}

#[test]
fn test_palette_start_slideshow_hands_over_exclusivity() {
    let mut c = controller();
    c.open_palette();
    c.handle_text("presentation");
    c.handle_key(KeyPress::plain(Key::Enter), false);
    assert!(matches!(c.overlay(), Overlay::Slideshow(_)));
}

#[test]
fn test_typing_guard_suppresses_router() {
    let mut c = controller();
    c.handle_key(KeyPress::plain(Key::ArrowDown), true);
    assert_eq!(c.active_section(), 0);
}

#[test]
fn test_replace_deck_keeps_section_by_id() {
    let mut c = controller();
    c.navigate_to("metrics");
    c.drain_effects();

    c.replace_deck(loader::parse(SAMPLE).unwrap());
    assert_eq!(c.deck().section_id(c.active_section()), Some("metrics"));
    assert_eq!(c.language(), "en");
}
