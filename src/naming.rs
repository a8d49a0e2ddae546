//! Method identifier splitting.
//!
//! Turns a camel-case method identifier into lowercase word tokens, the input
//! for convention-based verb and path inference:
//!
//! ```
//! use rpcroute::naming::name_tokens;
//!
//! assert_eq!(name_tokens("GetBlogArticles"), vec!["get", "blog", "articles"]);
//! assert_eq!(name_tokens("HTTPServer"), vec!["http", "server"]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

// Acronym followed by a capitalised word: "HTTPServer" -> "HTTP_Server"
#[allow(clippy::expect_used)]
static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new("([A-Z])([A-Z][a-z])").expect("valid acronym regex"));

// Lowercase or digit followed by a capital: "getBlog" -> "get_Blog"
#[allow(clippy::expect_used)]
static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new("([a-z0-9])([A-Z])").expect("valid camel-case regex"));

/// Convert an identifier to lowercase snake case.
///
/// The acronym rule must run before the camel-case rule, otherwise runs of
/// capitals would be split into single letters.
#[must_use]
pub fn to_snake_case(input: &str) -> String {
    let output = ACRONYM_BOUNDARY.replace_all(input, "${1}_${2}");
    let output = CAMEL_BOUNDARY.replace_all(&output, "${1}_${2}");
    output.replace('-', "_").to_lowercase()
}

/// Split an identifier into lowercase tokens.
///
/// Empty tokens (from leading, trailing or doubled separators) are dropped, so
/// an empty identifier yields no tokens at all.
#[must_use]
pub fn name_tokens(identifier: &str) -> Vec<String> {
    to_snake_case(identifier)
        .split('_')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
