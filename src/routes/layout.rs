//! Shared document shell and navigation markup for the rendered pages

use indoc::formatdoc;

/// Navigation markup shared across all pages
const NAV_HTML: &str = include_str!("../resources/templates/nav.html");

/// Escapes a value for safe interpolation into HTML text and
/// attribute positions. Usernames and other externally sourced
/// strings must pass through here before rendering.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for char in value.chars() {
        match char {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            value => out.push(value),
        }
    }
    out
}

/// Wraps the provided page content in the shared HTML document shell
pub fn document(title: &str, content: &str) -> String {
    formatdoc! {r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
        <meta charset="UTF-8">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <title>{title}</title>
        <link rel="stylesheet" href="/assets/main.css">
        </head>
        <body>
        {nav}
        {content}
        </body>
        </html>"#,
        title = escape(title),
        nav = NAV_HTML,
        content = content,
    }
}

#[cfg(test)]
mod test {
    use super::{document, escape};

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>alert('&')</script>"),
            "&lt;script&gt;alert(&#x27;&amp;&#x27;)&lt;/script&gt;"
        );
        assert_eq!(escape("plain text"), "plain text");
        assert_eq!(escape("a \"b\" c"), "a &quot;b&quot; c");
    }

    #[test]
    fn test_document_shell() {
        let html = document("Page <Title>", "<main>content</main>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        // Titles are escaped, content is trusted markup
        assert!(html.contains("<title>Page &lt;Title&gt;</title>"));
        assert!(html.contains("<main>content</main>"));
        assert!(html.contains("/assets/main.css"));
    }
}
