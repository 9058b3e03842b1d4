use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

pub const TOKEN_COOKIE: &str = "jwt_token";

/// Looks up `name` in a `key=value; key=value` cookie string. Entries are
/// trimmed of surrounding whitespace; the first match wins.
pub fn find_cookie(cookie_str: &str, name: &str) -> Option<String> {
    cookie_str
        .split(';')
        .map(|entry| entry.trim())
        .find_map(|entry| {
            let (key, value) = entry.split_once('=')?;
            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

/// Reads the session token from the browser cookie store, if present.
pub fn get_token() -> Option<String> {
    // the cookie accessor lives on HtmlDocument, not Document
    let document = window()?.document()?.dyn_into::<HtmlDocument>().ok()?;
    let cookies = document.cookie().ok()?;
    find_cookie(&cookies, TOKEN_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_token_among_other_cookies() {
        let cookies = "theme=dark; jwt_token=abc123; lang=en";
        assert_eq!(find_cookie(cookies, "jwt_token"), Some("abc123".to_string()));
    }

    #[test]
    fn trims_whitespace_around_entries() {
        let cookies = "  theme=dark ;   jwt_token=tok.en.value ; lang=en";
        assert_eq!(
            find_cookie(cookies, "jwt_token"),
            Some("tok.en.value".to_string())
        );
    }

    #[test]
    fn first_match_wins() {
        let cookies = "jwt_token=first; jwt_token=second";
        assert_eq!(find_cookie(cookies, "jwt_token"), Some("first".to_string()));
    }

    #[test]
    fn missing_cookie_is_none() {
        assert_eq!(find_cookie("theme=dark; lang=en", "jwt_token"), None);
        assert_eq!(find_cookie("", "jwt_token"), None);
    }

    #[test]
    fn name_must_match_exactly() {
        // a prefix like "jwt_token_old" must not satisfy a "jwt_token" lookup
        let cookies = "jwt_token_old=stale; lang=en";
        assert_eq!(find_cookie(cookies, "jwt_token"), None);
    }

    #[test]
    fn value_keeps_embedded_equals_sign() {
        let cookies = "jwt_token=abc=def";
        assert_eq!(find_cookie(cookies, "jwt_token"), Some("abc=def".to_string()));
    }
}
