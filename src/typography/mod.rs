use crate::render::html_escape;

/// Colors and fonts chosen in the CMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Brand color; the stylesheet default is kept when unset.
    pub primary: Option<String>,
    pub background: String,
    pub heading_font: String,
    pub body_font: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary: None,
            background: "#ffffff".to_string(),
            heading_font: "Outfit".to_string(),
            body_font: "Outfit".to_string(),
        }
    }
}

/// Only characters that can appear in a CSS color or font family survive.
fn css_safe(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | ' ' | '-' | '_' | '(' | ')' | ',' | '.' | '%'))
        .collect()
}

/// Build CSS custom properties for the brand color and fonts.
pub fn build_css_variables(theme: &Theme) -> String {
    let primary = theme
        .primary
        .as_deref()
        .map(|c| format!("\n    --primary: {} !important;", css_safe(c)))
        .unwrap_or_default();

    format!(
        r#":root {{{primary}
    --font-heading: '{heading}', sans-serif;
    --font-body: '{body}', sans-serif;
}}
body {{ font-family: var(--font-body); }}
h1, h2, h3, h4, h5, h6 {{ font-family: var(--font-heading); }}"#,
        primary = primary,
        heading = css_safe(&theme.heading_font),
        body = css_safe(&theme.body_font),
    )
}

/// Build the Google Fonts tags for the heading and body families.
pub fn build_font_links(theme: &Theme) -> String {
    let family = |name: &str| name.trim().split_whitespace().collect::<Vec<_>>().join("+");

    let url = format!(
        "https://fonts.googleapis.com/css2?family={}:wght@400;500;600;700;800;900&family={}:wght@300;400;500;600&display=swap",
        family(&theme.heading_font),
        family(&theme.body_font),
    );

    format!(
        r#"    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="{}" rel="stylesheet">
"#,
        html_escape(&url)
    )
}
