use crate::path::{has_path_params, path_param_names};
use serde::Serialize;

/// Body marker for bindings whose whole request payload is read from the body.
pub const WILDCARD_BODY: &str = "*";

/// One resolved HTTP route for an RPC method.
///
/// A method yields one binding per HTTP mapping; `num` tells bindings of the
/// same method apart and is folded into the handler name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteBinding {
    /// Owning RPC method (`SayHello`)
    pub method_name: String,
    /// Sequence number among bindings of the same method name
    pub num: usize,
    /// HTTP verb; empty for an annotation that sets no pattern
    pub verb: String,
    /// Normalised path in router syntax (`/v1/users/:id`)
    pub path: String,
    /// Request type, qualified for the generated package (`SayHelloReq`, `common.Empty`)
    pub request: String,
    /// Response type, qualified the same way
    pub reply: String,
    /// `Some("*")` for convention-inferred bindings, unset for annotated ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub summary: String,
    pub description: String,
    pub tags: String,
    pub deprecated: bool,
    pub require_auth: bool,
    /// Comma separated auth scheme names
    pub auth_schemes: String,
}

impl RouteBinding {
    /// `SayHello_0`, `SayHello_1`, ...
    #[must_use]
    pub fn handler_name(&self) -> String {
        format!("{}_{}", self.method_name, self.num)
    }

    #[must_use]
    pub fn has_path_params(&self) -> bool {
        has_path_params(&self.path)
    }

    #[must_use]
    pub fn path_params(&self) -> Vec<&str> {
        path_param_names(&self.path)
    }

    /// Path with a leading slash, as registered on the router.
    #[must_use]
    pub fn route_path(&self) -> String {
        if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        }
    }

    /// GET and DELETE bind the request from the query string.
    #[must_use]
    pub fn is_query_method(&self) -> bool {
        self.verb == "GET" || self.verb == "DELETE"
    }

    #[must_use]
    pub fn doc_verb(&self) -> String {
        self.verb.to_lowercase()
    }

    #[must_use]
    pub fn doc_summary(&self) -> &str {
        if self.summary.is_empty() {
            &self.method_name
        } else {
            &self.summary
        }
    }

    #[must_use]
    pub fn doc_description(&self) -> String {
        if self.description.is_empty() {
            format!("{} API endpoint", self.method_name)
        } else {
            self.description.clone()
        }
    }

    #[must_use]
    pub fn doc_tags<'a>(&'a self, default_tag: &'a str) -> &'a str {
        if self.tags.is_empty() {
            default_tag
        } else {
            &self.tags
        }
    }

    /// One entry per configured auth scheme; empty unless auth is required.
    #[must_use]
    pub fn security_schemes(&self) -> Vec<&str> {
        if !self.require_auth {
            return Vec::new();
        }
        self.auth_schemes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
