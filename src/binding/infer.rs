//! Convention-based verb and path inference for methods without an HTTP
//! annotation.
//!
//! The first name token picks the verb (`GetBlogArticles` -> GET
//! `blog/articles`). A first token that is not a verb keyword keeps its place
//! in the path and the route defaults to POST (`Ping` -> POST `ping`).

use http::Method;

/// Verb and raw path derived from a method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredRoute {
    pub verb: Method,
    pub path: String,
}

/// Map a leading name token to its HTTP verb, case-insensitively.
#[must_use]
pub fn verb_for_keyword(token: &str) -> Option<Method> {
    match token.to_uppercase().as_str() {
        "GET" | "FIND" | "QUERY" | "LIST" | "SEARCH" => Some(Method::GET),
        "POST" | "CREATE" => Some(Method::POST),
        "PUT" | "UPDATE" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// Infer verb and path from lowercase name tokens. Total over every input.
#[must_use]
pub fn infer_route(tokens: &[String]) -> InferredRoute {
    match tokens.split_first() {
        Some((first, rest)) => match verb_for_keyword(first) {
            Some(verb) => InferredRoute {
                verb,
                path: rest.join("/"),
            },
            None => InferredRoute {
                verb: Method::POST,
                path: tokens.join("/"),
            },
        },
        None => InferredRoute {
            verb: Method::POST,
            path: String::new(),
        },
    }
}
