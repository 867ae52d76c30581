use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;

lazy_static! {
    static ref SYNTAXES: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME: Theme = {
        let mut themes = ThemeSet::load_defaults().themes;
        themes
            .remove("base16-ocean.dark")
            .unwrap_or_default()
    };
}

pub fn highlight_line(line: &str, extension: &str) -> Result<String, syntect::Error> {
    let syntax = SYNTAXES
        .find_syntax_by_extension(extension)
        .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text());
    let mut highlighter = HighlightLines::new(syntax, &THEME);
    let regions: Vec<(Style, &str)> = highlighter.highlight_line(line, &SYNTAXES)?;
    Ok(format!("{}\x1b[0m", as_24_bit_terminal_escaped(&regions[..], false)))
}

/// Colors one serialized JSON row, falling back to the plain text.
pub fn highlight_json(line: &str) -> String {
    highlight_line(line, "json").unwrap_or_else(|_| line.to_string())
}

#[test]
fn highlighted_row_keeps_text() {
    let row = r#"{"id":1,"name":"Red Apple"}"#;
    let highlighted = highlight_json(row);
    assert!(highlighted.contains("Red Apple"));
    assert!(highlighted.contains("\x1b["));
    assert!(highlighted.ends_with("\x1b[0m"));
}

#[test]
fn unknown_extension_is_plain_text() {
    assert!(highlight_line("hello", "no-such-ext").unwrap().contains("hello"));
}
