use crate::render::html_escape;

/// Script that loads the Google reCAPTCHA v2 widget.
pub fn script_tag() -> String {
    r#"<script src="https://www.google.com/recaptcha/api.js" async defer></script>"#.to_string()
}

/// The checkbox widget. It posts its token as `g-recaptcha-response`.
pub fn widget(site_key: Option<&str>) -> String {
    match site_key {
        Some(key) => format!(
            r#"<div class="g-recaptcha" data-sitekey="{}"></div>"#,
            html_escape(key)
        ),
        None => String::new(),
    }
}
