use tfgchat_chat::DEFAULT_CHAT_URL;

/// Escape HTML to prevent XSS
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Get the page origin (e.g. `http://localhost:4200`)
pub fn get_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

/// Pick the chat endpoint: explicit URL, path on the page origin, or the default
pub fn resolve_endpoint(endpoint: Option<String>, origin: Option<&str>) -> String {
    match endpoint.map(|e| e.trim().to_string()) {
        Some(e) if e.starts_with('/') => match origin {
            Some(origin) => format!("{}{}", origin.trim_end_matches('/'), e),
            None => e,
        },
        Some(e) if !e.is_empty() => e,
        _ => DEFAULT_CHAT_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_resolve_endpoint() {
        assert_eq!(resolve_endpoint(None, None), "http://localhost:8000/chat");
        assert_eq!(resolve_endpoint(Some("  ".into()), None), "http://localhost:8000/chat");
        assert_eq!(
            resolve_endpoint(Some("https://bot.example/chat".into()), Some("http://page")),
            "https://bot.example/chat"
        );
        assert_eq!(
            resolve_endpoint(Some("/chat".into()), Some("http://localhost:8000/")),
            "http://localhost:8000/chat"
        );
        assert_eq!(resolve_endpoint(Some("/chat".into()), None), "/chat");
    }
}
