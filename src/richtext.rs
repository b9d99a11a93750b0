use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;
use std::sync::OnceLock;

fn block_html_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^<(p|ul|ol|div|h[1-6]|blockquote)").expect("static regex")
    })
}

/// Turn stored CMS text into HTML.
///
/// Content from the structured editor already starts with a block-level tag and
/// passes through untouched. Anything else is treated as Markdown, with single
/// newlines kept as line breaks. Output is injected unescaped, so it must only
/// ever come from the trusted CMS.
pub fn render(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    if block_html_prefix().is_match(text.trim()) {
        return text.to_string();
    }

    match std::panic::catch_unwind(|| markdown_to_html(text)) {
        Ok(html) => html,
        Err(_) => {
            log::error!("Markdown conversion failed, serving raw text");
            text.to_string()
        }
    }
}

fn markdown_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Split text into paragraphs on blank lines, dropping empty ones.
pub fn paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a newline-delimited list (one entry per line).
pub fn lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
