// SPDX-License-Identifier: GPL-3.0-only

//! Search input bridge
//!
//! Collects keyboard events into the browser's search text and turns it into
//! the address handed to the page viewer. Committing does not clear the text,
//! so reopening the keyboard shows the previous query.

use crate::constants::browser;

/// Result of pressing Enter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCommit {
    /// Address for the page viewer
    pub address: String,
    /// Keyboard visibility requested after the commit (always hidden)
    pub keyboard_visible: bool,
}

/// Search text being composed
#[derive(Debug, Clone)]
pub struct SearchInputBridge {
    text: String,
    search_url: String,
}

impl Default for SearchInputBridge {
    fn default() -> Self {
        Self::new(browser::DEFAULT_SEARCH_URL)
    }
}

impl SearchInputBridge {
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            search_url: search_url.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn key(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Remove the last character
    pub fn delete(&mut self) {
        self.text.pop();
    }

    pub fn space(&mut self) {
        self.text.push(' ');
    }

    /// Replace the whole text (typing straight into the address field)
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Resolve the viewer address for the current text
    pub fn commit(&self) -> SearchCommit {
        let query = self.text.trim();
        let address = if query.is_empty() {
            browser::BLANK_ADDRESS.to_string()
        } else {
            search_address(&self.search_url, query)
        };

        SearchCommit {
            address,
            keyboard_visible: false,
        }
    }
}

/// `<base>?q=<query>` (or `&q=` when the base already has a query string)
pub fn search_address(base: &str, query: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}q={}", base, separator, encode_uri_component(query))
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
pub fn encode_uri_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' => result.push(c),
            '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_compose_text() {
        let mut search = SearchInputBridge::default();
        search.key('h');
        search.key('i');
        search.space();
        search.key('x');
        search.delete();
        assert_eq!(search.text(), "hi ");
    }

    #[test]
    fn test_delete_on_empty() {
        let mut search = SearchInputBridge::default();
        search.delete();
        assert_eq!(search.text(), "");
    }

    #[test]
    fn test_commit_keeps_text() {
        let mut search = SearchInputBridge::default();
        search.set_text("rust");
        let commit = search.commit();
        assert_eq!(commit.address, "https://www.google.com/search?q=rust");
        assert_eq!(search.text(), "rust");
    }

    #[test]
    fn test_commit_trims_surrounding_whitespace() {
        let mut search = SearchInputBridge::default();
        search.set_text("  hello world  ");
        let commit = search.commit();
        assert_eq!(commit.address, "https://www.google.com/search?q=hello%20world");
        assert!(!commit.keyboard_visible);
    }

    #[test]
    fn test_encode_reserved_and_unicode() {
        assert_eq!(encode_uri_component("a&b=c/d?"), "a%26b%3Dc%2Fd%3F");
        assert_eq!(encode_uri_component("(it's) ~fine*!"), "(it's)%20~fine*!");
        assert_eq!(encode_uri_component("café"), "caf%C3%A9");
        assert_eq!(encode_uri_component("+#%"), "%2B%23%25");
    }

    #[test]
    fn test_custom_base_with_query() {
        assert_eq!(
            search_address("https://duckduckgo.com/?ia=web", "a b"),
            "https://duckduckgo.com/?ia=web&q=a%20b"
        );
    }
}
