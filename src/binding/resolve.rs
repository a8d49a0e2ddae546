use super::infer::infer_route;
use super::types::{RouteBinding, WILDCARD_BODY};
use crate::descriptor::{
    AuthRequirement, DescriptorSet, FileDescriptor, HttpRule, MethodDescriptor, TypeRef,
};
use crate::naming::name_tokens;
use crate::path::normalize_path;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fatal resolution failures. Any of these aborts the whole run.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A payload type's import path matches no file in the descriptor set.
    #[error("no such package: {import_path} (declaring type {type_name})")]
    UnknownPackage {
        type_name: String,
        import_path: String,
    },
}

/// Import path -> short package identifier, built once per descriptor set.
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    packages: HashMap<String, String>,
}

impl PackageRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every file of the set. The first file registering an import
    /// path wins.
    #[must_use]
    pub fn from_descriptor_set(set: &DescriptorSet) -> Self {
        let mut registry = Self::new();
        for file in &set.files {
            registry.insert(&file.import_path, &file.package);
        }
        registry
    }

    pub fn insert(&mut self, import_path: &str, package: &str) {
        self.packages
            .entry(import_path.to_string())
            .or_insert_with(|| package.to_string());
    }

    #[must_use]
    pub fn package_for(&self, import_path: &str) -> Option<&str> {
        self.packages.get(import_path).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Next free sequence number per method name.
///
/// Numbers are never reset during a run, so a method name declared twice
/// (in one service or across services) keeps counting where it left off.
#[derive(Debug, Clone, Default)]
pub struct EmissionCounter {
    next: HashMap<String, usize>,
}

impl EmissionCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the current number for `method` and advance it.
    pub fn next(&mut self, method: &str) -> usize {
        let slot = self.next.entry(method.to_string()).or_insert(0);
        let num = *slot;
        *slot += 1;
        num
    }

    /// Number the next binding of `method` would receive.
    #[must_use]
    pub fn peek(&self, method: &str) -> usize {
        self.next.get(method).copied().unwrap_or(0)
    }
}

/// Everything the resolver needs besides the method itself.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub registry: &'a PackageRegistry,
    /// File declaring the method's service
    pub file: &'a FileDescriptor,
    /// Service-level auth default for methods without their own
    pub default_auth: Option<&'a AuthRequirement>,
}

/// Type name as seen from `file`: bare when declared in the same package,
/// `pkg.Name` otherwise.
pub fn qualify_type(
    registry: &PackageRegistry,
    ty: &TypeRef,
    file: &FileDescriptor,
) -> Result<String, ResolveError> {
    let import_path = match ty.import_path.as_deref() {
        None => return Ok(ty.name.clone()),
        Some(p) if p == file.import_path => return Ok(ty.name.clone()),
        Some(p) => p,
    };
    match registry.package_for(import_path) {
        Some(package) => Ok(format!("{package}.{}", ty.name)),
        None => Err(ResolveError::UnknownPackage {
            type_name: ty.name.clone(),
            import_path: import_path.to_string(),
        }),
    }
}

/// Verb and path template of a rule's pattern, empty when none is set.
fn rule_verb_and_path(method: &str, rule: &HttpRule) -> (String, String) {
    match &rule.pattern {
        Some(pattern) => {
            let (verb, path) = pattern.verb_and_path();
            (verb.to_string(), path.to_string())
        }
        None => {
            warn!(method, "http rule sets no pattern; emitting an empty route");
            (String::new(), String::new())
        }
    }
}

/// Resolve all HTTP bindings of one method.
///
/// Annotated methods yield one binding per alternate, in listed order,
/// followed by the primary pattern. Unannotated methods yield exactly one
/// binding inferred from the method name. Sequence numbers come from
/// `counter` in emission order, so alternates number below the primary.
pub fn resolve_method(
    method: &MethodDescriptor,
    ctx: &ResolveContext<'_>,
    counter: &mut EmissionCounter,
) -> Result<Vec<RouteBinding>, ResolveError> {
    let request = qualify_type(ctx.registry, &method.input, ctx.file)?;
    let reply = qualify_type(ctx.registry, &method.output, ctx.file)?;
    let auth = method.auth.as_ref().or(ctx.default_auth);

    let mut emit = |verb: String, template: &str, body: Option<&str>| {
        let binding = RouteBinding {
            method_name: method.name.clone(),
            num: counter.next(&method.name),
            verb,
            path: normalize_path(template),
            request: request.clone(),
            reply: reply.clone(),
            body: body.map(str::to_string),
            summary: method.summary.clone(),
            description: method.description.clone(),
            tags: method.tags.clone(),
            deprecated: method.deprecated,
            require_auth: auth.map(|a| a.required).unwrap_or(false),
            auth_schemes: auth.map(|a| a.schemes.clone()).unwrap_or_default(),
        };
        debug!(
            method = %binding.method_name,
            num = binding.num,
            verb = %binding.verb,
            path = %binding.path,
            "resolved binding"
        );
        binding
    };

    let bindings = match &method.http {
        Some(rule) => {
            let mut out = Vec::with_capacity(rule.additional_bindings.len() + 1);
            for alternate in &rule.additional_bindings {
                let (verb, path) = rule_verb_and_path(&method.name, alternate);
                out.push(emit(verb, &path, None));
            }
            let (verb, path) = rule_verb_and_path(&method.name, rule);
            out.push(emit(verb, &path, None));
            out
        }
        None => {
            let inferred = infer_route(&name_tokens(&method.name));
            vec![emit(
                inferred.verb.to_string(),
                &inferred.path,
                Some(WILDCARD_BODY),
            )]
        }
    };
    Ok(bindings)
}
