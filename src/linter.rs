//! # Descriptor Linter
//!
//! Reports problems in a descriptor set before any code is generated.
//!
//! ## Checks Performed
//!
//! 1. **unknown_package** - a payload type's import path matches no file (generation would abort)
//! 2. **duplicate_route** - two bindings of one service share verb and path (the router rejects it)
//! 3. **empty_pattern** - an HTTP rule sets no pattern and would register an empty route
//! 4. **duplicate_method** - a method name is declared twice in one service
//! 5. **empty_custom_verb** - a custom pattern without a verb
//! 6. **default_post** - an unannotated method whose name starts with no verb keyword
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rpcroute::linter::{lint_descriptor_set, LintSeverity};
//!
//! let issues = lint_descriptor_set(&set);
//! for issue in &issues {
//!     eprintln!("[{}] {}: {}", issue.severity, issue.location, issue.message);
//! }
//! ```

use crate::binding::{
    qualify_type, resolve_method, verb_for_keyword, EmissionCounter, PackageRegistry,
    ResolveContext,
};
use crate::descriptor::{
    DescriptorSet, FileDescriptor, HttpPattern, HttpRule, MethodDescriptor, ServiceDescriptor,
};
use crate::naming::name_tokens;
use std::collections::{HashMap, HashSet};
use std::fmt;


/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    /// Generation will fail or produce unusable output
    Error,
    /// Generation succeeds but the output is probably not what was meant
    Warning,
    /// Convention reminder
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "ERROR"),
            LintSeverity::Warning => write!(f, "WARN"),
            LintSeverity::Info => write!(f, "INFO"),
        }
    }
}

/// A lint issue found in a descriptor set
#[derive(Debug, Clone)]
pub struct LintIssue {
    /// `Service.Method`, or `Service` for service-wide issues
    pub location: String,
    pub severity: LintSeverity,
    /// Type of lint issue (e.g. "duplicate_route")
    pub kind: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl LintIssue {
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint every service of every file in the set.
#[must_use]
pub fn lint_descriptor_set(set: &DescriptorSet) -> Vec<LintIssue> {
    let registry = PackageRegistry::from_descriptor_set(set);
    let mut counter = EmissionCounter::new();
    let mut issues = Vec::new();
    for file in &set.files {
        for service in &file.services {
            lint_service(&registry, &mut counter, file, service, &mut issues);
        }
    }
    issues
}

/// True if any issue is an error.
#[must_use]
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

fn lint_service(
    registry: &PackageRegistry,
    counter: &mut EmissionCounter,
    file: &FileDescriptor,
    service: &ServiceDescriptor,
    issues: &mut Vec<LintIssue>,
) {
    let mut seen_methods = HashSet::new();
    for method in &service.methods {
        let location = format!("{}.{}", service.name, method.name);
        if !seen_methods.insert(method.name.as_str()) {
            issues.push(
                LintIssue::new(
                    &location,
                    LintSeverity::Warning,
                    "duplicate_method",
                    format!("method {} is declared more than once", method.name),
                )
                .with_suggestion("rename one of the methods; handler numbers keep counting across both"),
            );
        }
        lint_types(registry, file, method, &location, issues);
        match &method.http {
            Some(rule) => lint_rule(rule, &location, issues),
            None => lint_inferred(method, &location, issues),
        }
    }
    lint_duplicate_routes(registry, counter, file, service, issues);
}

fn lint_types(
    registry: &PackageRegistry,
    file: &FileDescriptor,
    method: &MethodDescriptor,
    location: &str,
    issues: &mut Vec<LintIssue>,
) {
    for ty in [&method.input, &method.output] {
        if let Err(err) = qualify_type(registry, ty, file) {
            issues.push(
                LintIssue::new(location, LintSeverity::Error, "unknown_package", err.to_string())
                    .with_suggestion("add the declaring file to the descriptor set"),
            );
        }
    }
}

fn lint_rule(rule: &HttpRule, location: &str, issues: &mut Vec<LintIssue>) {
    let rules = rule.additional_bindings.iter().chain(std::iter::once(rule));
    for (index, r) in rules.enumerate() {
        let which = if index == rule.additional_bindings.len() {
            "primary pattern".to_string()
        } else {
            format!("additional binding #{index}")
        };
        match &r.pattern {
            None => issues.push(
                LintIssue::new(
                    location,
                    LintSeverity::Warning,
                    "empty_pattern",
                    format!("{which} sets no HTTP pattern; an empty route will be registered"),
                )
                .with_suggestion("set one of get, put, post, delete, patch or custom"),
            ),
            Some(HttpPattern::Custom(custom)) if custom.kind.trim().is_empty() => issues.push(
                LintIssue::new(
                    location,
                    LintSeverity::Warning,
                    "empty_custom_verb",
                    format!("{which} is a custom pattern without a verb"),
                ),
            ),
            Some(_) => {}
        }
    }
}

fn lint_inferred(method: &MethodDescriptor, location: &str, issues: &mut Vec<LintIssue>) {
    let tokens = name_tokens(&method.name);
    let first = tokens.first().map(String::as_str).unwrap_or_default();
    if verb_for_keyword(first).is_none() {
        issues.push(
            LintIssue::new(
                location,
                LintSeverity::Info,
                "default_post",
                format!(
                    "no HTTP annotation and \"{first}\" is not a verb keyword; route defaults to POST /{}",
                    tokens.join("/")
                ),
            )
            .with_suggestion("prefix the name with Get/List/Create/Update/Patch/Delete or add an http annotation"),
        );
    }
}

fn lint_duplicate_routes(
    registry: &PackageRegistry,
    counter: &mut EmissionCounter,
    file: &FileDescriptor,
    service: &ServiceDescriptor,
    issues: &mut Vec<LintIssue>,
) {
    let ctx = ResolveContext {
        registry,
        file,
        default_auth: service.auth.as_ref(),
    };
    let mut routes: HashMap<(String, String), String> = HashMap::new();
    for method in &service.methods {
        // unknown packages are reported by lint_types
        let Ok(bindings) = resolve_method(method, &ctx, counter) else {
            continue;
        };
        for binding in bindings {
            if binding.verb.is_empty() {
                continue;
            }
            let key = (binding.verb.clone(), binding.route_path());
            let handler = binding.handler_name();
            if let Some(previous) = routes.get(&key) {
                issues.push(LintIssue::new(
                    format!("{}.{}", service.name, method.name),
                    LintSeverity::Error,
                    "duplicate_route",
                    format!(
                        "{} {} is registered by both {previous} and {handler}",
                        key.0, key.1
                    ),
                ));
            } else {
                routes.insert(key, handler);
            }
        }
    }
}

/// Human readable report, grouped by severity.
#[must_use]
pub fn format_lint_report(issues: &[LintIssue]) -> String {
    if issues.is_empty() {
        return "✅ No lint issues found!\n".to_string();
    }
    let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
    let mut out = format!(
        "📋 Lint Results:\n   {} error(s), {} warning(s), {} info(s)\n\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );
    for (severity, heading) in [
        (LintSeverity::Error, "❌ Errors (must fix):"),
        (LintSeverity::Warning, "⚠️  Warnings (should fix):"),
        (LintSeverity::Info, "ℹ️  Info:"),
    ] {
        let group: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(heading);
        out.push('\n');
        for issue in group {
            out.push_str(&format!(
                "   [{}] {}\n      {}\n",
                issue.kind, issue.location, issue.message
            ));
            if let Some(suggestion) = &issue.suggestion {
                out.push_str(&format!("      💡 Suggestion: {suggestion}\n"));
            }
        }
        out.push('\n');
    }
    out
}

pub fn print_lint_issues(issues: &[LintIssue]) {
    print!("{}", format_lint_report(issues));
}

/// Turn error-severity issues into a failure.
///
/// # Errors
///
/// Returns an error naming the number of errors when any are present.
pub fn fail_if_errors(issues: &[LintIssue]) -> anyhow::Result<()> {
    let errors = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("lint found {errors} error(s)");
    }
    Ok(())
}
