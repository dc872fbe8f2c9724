use colored::Colorize;

/// Print the deck file format specification.
pub fn run(short: bool) {
    if short {
        print_quick_reference();
    } else {
        print_full_spec();
    }
}

fn heading(text: &str) {
    println!();
    println!("{}", text.bold().underline());
}

fn print_quick_reference() {
    println!("{}", "scrolldeck deck format \u{2014} quick reference".bold());
    println!();
    println!("meta:            title, footer, theme (light|dark), default_language");
    println!("languages:       [en, es, ...]");
    println!("sections:        [id, id, ...]          # document order");
    println!("locales.<lang>:  nav_title, sections.<id>.label, sections.<id>.blocks");
    println!("slides:          [{{ section, layout, title? }}]");
    println!();
    println!("block kinds:     heading (text, level), paragraph (text),");
    println!("                 list (items), stats (items: label/value/detail),");
    println!("                 quote (text, attribution), table (headers, rows)");
    println!("slide layouts:   title, statement, bullets, stats, closing");
    println!("inline markup:   **bold**, _italic_");
}

fn print_full_spec() {
    println!("{}", "scrolldeck deck format".bold());
    println!("A deck is one YAML file. Every language ships the full content tree.");

    heading("meta");
    println!("  title             Window and deck title (required)");
    println!("  footer            Line shown on presentation slides");
    println!("  theme             'light' or 'dark'; overrides the config default");
    println!("  default_language  Must appear in `languages`; defaults to the first");

    heading("languages");
    println!("  Ordered list of language codes. The language toggle cycles this");
    println!("  list; every code needs a matching entry under `locales`.");

    heading("sections");
    println!("  Ordered list of section ids. The order defines the scroll page,");
    println!("  digit shortcuts, and deep-link targets (#<id>). Every locale must");
    println!("  provide content for every id.");

    heading("locales.<lang>");
    println!("  nav_title         Sidebar title for this language");
    println!("  sections.<id>:");
    println!("    label           Display name (sidebar, palette, eyebrow)");
    println!("    blocks          Content blocks, rendered top to bottom");

    heading("blocks");
    println!("  - kind: heading     text, level (1-3, default 2)");
    println!("  - kind: paragraph   text");
    println!("  - kind: list        items: [string, ...]");
    println!("  - kind: stats       items: [{{label, value, detail?}}, ...]");
    println!("  - kind: quote       text, attribution?");
    println!("  - kind: table       headers: [...], rows: [[...], ...]");
    println!();
    println!("  Strings support **bold** and _italic_ inline markup.");

    heading("slides");
    println!("  The hand-curated presentation sequence. Slides pull content from");
    println!("  sections but are independent of the scroll page; a deck usually");
    println!("  has fewer slides than sections.");
    println!();
    println!("  - section         A section id");
    println!("    layout          title | statement | bullets | stats | closing");
    println!("    title           Optional heading override");

    heading("keyboard surface");
    println!("  Base page:   \u{2193} \u{2192} Space next, \u{2191} \u{2190} previous, 0-9 jump,");
    println!("               Cmd/Ctrl+K palette, Cmd/Ctrl+Shift+P present, H hints, Q quit");
    println!("  Palette:     type to filter, \u{2191}\u{2193} select, Enter run, Esc close");
    println!("  Presenting:  \u{2193} \u{2192} Space next, \u{2191} \u{2190} previous, Home/End, Esc close");
}
