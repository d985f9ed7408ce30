//! Markup shared by both render strategies.

use chrono::{Datelike, Utc};

pub const SITE_NAME: &str = "Fleet Smart";
pub const TAGLINE: &str = "Advanced Electric Vehicle Fleet Management";

pub const NAV_LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/fleet", "Fleet"),
    ("/about", "About"),
    ("/contact", "Contact"),
];

pub const UNASSIGNED_DRIVER: &str = "Unassigned";
pub const UNKNOWN_LOCATION: &str = "Unknown";

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// `50` -> `50.0%`
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Width of a battery bar fill, kept inside the bar.
pub fn bar_width(level: f64) -> f64 {
    if level.is_finite() {
        level.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub fn nav_links(class: &str) -> String {
    NAV_LINKS
        .iter()
        .map(|(href, label)| format!(r#"<a class="{class}" href="{href}">{label}</a>"#))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn copyright() -> String {
    format!("&copy; {} {SITE_NAME}. All rights reserved.", Utc::now().year())
}

pub fn not_found_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Page not found - {SITE_NAME}</title>
</head>
<body>
    <h1>404 - Page not found</h1>
    <p>{message}</p>
    <nav>{nav}</nav>
</body>
</html>
"#,
        message = escape(message),
        nav = nav_links("nav-link"),
    )
}

pub fn error_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Error - {SITE_NAME}</title>
</head>
<body>
    <h1>Something went wrong</h1>
    <p>The page could not be displayed. Please try again later.</p>
    <nav>{nav}</nav>
</body>
</html>
"#,
        nav = nav_links("nav-link"),
    )
}

#[cfg(test)]
mod tests {
    use super::{bar_width, escape, percent};

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn formats_one_decimal() {
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(percent(78.5), "78.5%");
    }

    #[test]
    fn bar_width_stays_in_range() {
        assert_eq!(bar_width(140.0), 100.0);
        assert_eq!(bar_width(-5.0), 0.0);
        assert_eq!(bar_width(f64::NAN), 0.0);
    }
}
