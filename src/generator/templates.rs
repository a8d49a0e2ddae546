use askama::Template;

use crate::binding::RouteBinding;
use crate::config::GeneratorConfig;
use crate::routes::{FileRoutes, PackageImport, ServiceRoutes};

/// One interface method of a generated server interface.
#[derive(Debug, Clone)]
pub struct MethodView {
    pub name: String,
    pub request: String,
    pub reply: String,
}

/// One registered route and the handler factory serving it.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub method_name: String,
    /// Handler factory function, e.g. `_Greeter_SayHello_0_HTTP_Handler`
    pub handler: String,
    /// Verb as a quoted Go string literal
    pub verb_literal: String,
    /// Route path as a quoted Go string literal
    pub path_literal: String,
    pub request: String,
    /// Bind path parameters before the payload
    pub bind_uri: bool,
    /// `ShouldBindQuery` or `ShouldBindJSON`
    pub bind_call: &'static str,
    /// Comment lines above the handler factory, without the `// ` prefix
    pub doc_lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ServiceView {
    pub interface_name: String,
    pub full_name: String,
    pub deprecated: bool,
    pub methods: Vec<MethodView>,
    pub routes: Vec<RouteView>,
}

/// Template data for one generated gin registration file
#[derive(Template)]
#[template(path = "gin_http.go.txt", escape = "none")]
pub struct GinFileTemplate {
    pub source: String,
    pub package: String,
    pub imports: Vec<PackageImport>,
    pub services: Vec<ServiceView>,
}

/// `/users/:id` -> `/users/{id}`, the form documentation tools expect.
pub(crate) fn swagger_path(route_path: &str) -> String {
    route_path
        .split('/')
        .map(|seg| match seg.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => seg.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Collapse line breaks so a value stays on its `//` comment line.
fn one_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

/// Quoted, escaped Go string literal. JSON string syntax is a subset of Go's.
fn go_string(s: &str) -> anyhow::Result<String> {
    Ok(serde_json::to_string(s)?)
}

fn handler_fn_name(service: &str, binding: &RouteBinding) -> String {
    format!("_{service}_{}_HTTP_Handler", binding.handler_name())
}

pub(crate) fn swagger_lines(binding: &RouteBinding, default_tag: &str) -> Vec<String> {
    let mut lines = vec![
        format!("@Summary {}", binding.doc_summary()),
        format!("@Description {}", binding.doc_description()),
        format!("@Tags {}", binding.doc_tags(default_tag)),
        "@Accept json".to_string(),
        "@Produce json".to_string(),
    ];
    for param in binding.path_params() {
        lines.push(format!("@Param {param} path string true \"{param}\""));
    }
    if binding.is_query_method() {
        lines.push(format!(
            "@Param request query {} false \"request\"",
            binding.request
        ));
    } else {
        lines.push(format!(
            "@Param request body {} true \"request\"",
            binding.request
        ));
    }
    lines.push(format!("@Success 200 {{object}} {}", binding.reply));
    for scheme in binding.security_schemes() {
        lines.push(format!("@Security {scheme}"));
    }
    if binding.deprecated {
        lines.push("@Deprecated".to_string());
    }
    lines.push(format!(
        "@Router {} [{}]",
        swagger_path(&binding.route_path()),
        binding.doc_verb()
    ));
    lines
}

fn route_view(
    service: &ServiceRoutes,
    binding: &RouteBinding,
    config: &GeneratorConfig,
) -> anyhow::Result<RouteView> {
    let handler = handler_fn_name(&service.name, binding);
    let mut doc_lines = vec![format!(
        "{handler} serves {} {}.",
        binding.verb,
        binding.route_path()
    )];
    if config.swagger {
        doc_lines.extend(swagger_lines(binding, &config.default_tag));
    }
    Ok(RouteView {
        method_name: binding.method_name.clone(),
        handler,
        verb_literal: go_string(&binding.verb)?,
        path_literal: go_string(&binding.route_path())?,
        request: binding.request.clone(),
        bind_uri: binding.has_path_params(),
        bind_call: if binding.is_query_method() {
            "ShouldBindQuery"
        } else {
            "ShouldBindJSON"
        },
        doc_lines: doc_lines.iter().map(|line| one_line(line)).collect(),
    })
}

fn service_view(service: &ServiceRoutes, config: &GeneratorConfig) -> anyhow::Result<ServiceView> {
    Ok(ServiceView {
        interface_name: service.interface_name(),
        full_name: service.full_name.clone(),
        deprecated: service.deprecated,
        methods: service
            .method_set()
            .into_iter()
            .map(|b| MethodView {
                name: b.method_name.clone(),
                request: b.request.clone(),
                reply: b.reply.clone(),
            })
            .collect(),
        routes: service
            .bindings
            .iter()
            .map(|b| route_view(service, b, config))
            .collect::<anyhow::Result<_>>()?,
    })
}

/// Render the gin registration source for one schema file.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_file(routes: &FileRoutes, config: &GeneratorConfig) -> anyhow::Result<String> {
    let rendered = GinFileTemplate {
        source: routes.path.clone(),
        package: routes.package.clone(),
        imports: routes.imports.clone(),
        services: routes
            .services
            .iter()
            .map(|s| service_view(s, config))
            .collect::<anyhow::Result<_>>()?,
    }
    .render()?;
    Ok(rendered)
}

/// `api/helloworld/helloworld.proto` + `_gin.pb.go` ->
/// `api/helloworld/helloworld_gin.pb.go`
#[must_use]
pub fn output_file_name(schema_path: &str, suffix: &str) -> String {
    let stem = schema_path.strip_suffix(".proto").unwrap_or(schema_path);
    format!("{stem}{suffix}")
}
