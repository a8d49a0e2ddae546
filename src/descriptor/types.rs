use serde::{Deserialize, Serialize};

/// A fully materialised set of schema files, as handed over by the descriptor
/// compiler. Every file that declares a referenced payload type must be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorSet {
    #[serde(default)]
    pub files: Vec<FileDescriptor>,
}

/// One schema file and the services it declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Schema path, relative to the include root
    pub path: String,
    /// Short package identifier used to qualify types from this file (`v1`)
    pub package: String,
    /// Import path of the generated package (`example.com/api/blog/v1`)
    pub import_path: String,
    /// Dotted schema package (`blog.v1`); prefixes service full names
    #[serde(default)]
    pub proto_package: String,
    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    /// Default auth requirement for methods that do not declare their own
    #[serde(default)]
    pub auth: Option<AuthRequirement>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl ServiceDescriptor {
    /// `blog.v1.BlogService`, or just the service name when the file has no
    /// schema package.
    #[must_use]
    pub fn full_name(&self, file: &FileDescriptor) -> String {
        if file.proto_package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", file.proto_package, self.name)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub input: TypeRef,
    pub output: TypeRef,
    /// Explicit HTTP binding annotation
    #[serde(default)]
    pub http: Option<HttpRule>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub auth: Option<AuthRequirement>,
}

/// Reference to a request or response payload type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    /// Import path of the declaring file. `None` means the type lives in the
    /// same file as the method referencing it.
    #[serde(default)]
    pub import_path: Option<String>,
}

impl TypeRef {
    pub fn local(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            import_path: None,
        }
    }

    pub fn imported(name: impl Into<String>, import_path: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            import_path: Some(import_path.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequirement {
    #[serde(default)]
    pub required: bool,
    /// Comma separated scheme names, e.g. `BearerAuth, ApiKeyAuth`
    #[serde(default)]
    pub schemes: String,
}

/// The oneof pattern of an HTTP rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpPattern {
    Get(String),
    Put(String),
    Post(String),
    Delete(String),
    Patch(String),
    Custom(CustomPattern),
}

impl HttpPattern {
    /// Verb and path template carried by the pattern.
    #[must_use]
    pub fn verb_and_path(&self) -> (&str, &str) {
        match self {
            HttpPattern::Get(p) => ("GET", p.as_str()),
            HttpPattern::Put(p) => ("PUT", p.as_str()),
            HttpPattern::Post(p) => ("POST", p.as_str()),
            HttpPattern::Delete(p) => ("DELETE", p.as_str()),
            HttpPattern::Patch(p) => ("PATCH", p.as_str()),
            HttpPattern::Custom(c) => (c.kind.as_str(), c.path.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPattern {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub path: String,
}

/// Per-method HTTP binding annotation: a primary pattern plus alternates.
///
/// On the wire the pattern is written as one of the `get`, `put`, `post`,
/// `delete`, `patch` or `custom` keys, matching the usual HTTP rule layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHttpRule")]
pub struct HttpRule {
    /// `None` for a rule that sets no pattern at all
    #[serde(flatten)]
    pub pattern: Option<HttpPattern>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_bindings: Vec<HttpRule>,
}

impl HttpRule {
    pub fn new(pattern: HttpPattern) -> Self {
        HttpRule {
            pattern: Some(pattern),
            additional_bindings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_binding(mut self, binding: HttpRule) -> Self {
        self.additional_bindings.push(binding);
        self
    }
}

#[derive(Deserialize)]
struct RawHttpRule {
    get: Option<String>,
    put: Option<String>,
    post: Option<String>,
    delete: Option<String>,
    patch: Option<String>,
    custom: Option<CustomPattern>,
    #[serde(default)]
    additional_bindings: Vec<HttpRule>,
}

impl TryFrom<RawHttpRule> for HttpRule {
    type Error = String;

    fn try_from(raw: RawHttpRule) -> Result<Self, Self::Error> {
        let mut patterns: Vec<HttpPattern> = [
            raw.get.map(HttpPattern::Get),
            raw.put.map(HttpPattern::Put),
            raw.post.map(HttpPattern::Post),
            raw.delete.map(HttpPattern::Delete),
            raw.patch.map(HttpPattern::Patch),
            raw.custom.map(HttpPattern::Custom),
        ]
        .into_iter()
        .flatten()
        .collect();

        if patterns.len() > 1 {
            let verbs: Vec<&str> = patterns.iter().map(|p| p.verb_and_path().0).collect();
            return Err(format!(
                "http rule sets more than one pattern ({})",
                verbs.join(", ")
            ));
        }

        Ok(HttpRule {
            pattern: patterns.pop(),
            additional_bindings: raw.additional_bindings,
        })
    }
}
