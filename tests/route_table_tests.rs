//! Route table construction from descriptor set fixtures.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use rpcroute::descriptor::load_descriptor_set;
use rpcroute::routes::{build_route_tables, FileRoutes, PackageImport};
use rpcroute::ResolveError;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn blog_tables() -> Vec<FileRoutes> {
    let set = load_descriptor_set(&fixture("blog.yaml")).unwrap();
    build_route_tables(&set).unwrap()
}

fn routes_of(file: &FileRoutes) -> Vec<(String, String, String)> {
    file.services
        .iter()
        .flat_map(|s| &s.bindings)
        .map(|b| (b.verb.clone(), b.route_path(), b.handler_name()))
        .collect()
}

fn route(verb: &str, path: &str, handler: &str) -> (String, String, String) {
    (verb.to_string(), path.to_string(), handler.to_string())
}

#[test]
fn test_only_files_with_services_get_tables() {
    let tables = blog_tables();
    let paths: Vec<&str> = tables.iter().map(|t| t.path.as_str()).collect();
    assert_eq!(paths, vec!["api/blog/v1/blog.proto", "api/admin/v1/admin.proto"]);
}

#[test]
fn test_blog_service_routes() {
    let tables = blog_tables();
    assert_eq!(tables[0].services[0].full_name, "blog.v1.BlogService");
    assert_eq!(
        routes_of(&tables[0]),
        vec![
            route("GET", "/articles", "GetArticles_0"),
            route("GET", "/v1/authors/:author_id/articles/:id", "GetArticle_0"),
            route("GET", "/v1/articles/:id", "GetArticle_1"),
            route("POST", "/v1/articles", "CreateArticle_0"),
            route("PUT", "/v1/articles/:id", "UpdateArticle_0"),
            route("DELETE", "/v1/articles/:id", "DeleteArticle_0"),
            route("POST", "/ping", "Ping_0"),
        ]
    );
}

#[test]
fn test_method_numbering_spans_files() {
    let tables = blog_tables();
    assert_eq!(
        routes_of(&tables[1]),
        vec![
            route("GET", "/users", "ListUsers_0"),
            route("GET", "/admin/articles", "GetArticles_1"),
        ]
    );
}

#[test]
fn test_inferred_and_annotated_bodies() {
    let tables = blog_tables();
    let bindings = &tables[0].services[0].bindings;
    assert_eq!(bindings[0].body.as_deref(), Some("*"), "inferred binding");
    assert_eq!(bindings[0].path, "articles");
    assert!(bindings[1..6].iter().all(|b| b.body.is_none()));
}

#[test]
fn test_types_are_qualified_outside_their_package() {
    let tables = blog_tables();
    let blog = &tables[0].services[0].bindings;
    assert_eq!(blog[0].request, "GetArticlesReq");
    assert_eq!(blog[1].reply, "common.Article");
    assert_eq!(blog[5].reply, "common.Empty");

    let admin = &tables[1].services[0].bindings;
    assert_eq!(admin[1].request, "v1.GetArticlesReq");
    assert_eq!(admin[1].reply, "v1.GetArticlesResp");
}

#[test]
fn test_imports_per_file() {
    let tables = blog_tables();
    assert_eq!(
        tables[0].imports,
        vec![PackageImport {
            alias: "common".into(),
            path: "example.com/blog/api/common".into(),
        }]
    );
    assert_eq!(
        tables[1].imports,
        vec![PackageImport {
            alias: "v1".into(),
            path: "example.com/blog/api/blog/v1".into(),
        }]
    );
}

#[test]
fn test_auth_and_docs_carry_over() {
    let tables = blog_tables();
    let bindings = &tables[0].services[0].bindings;
    assert!(bindings[0].require_auth, "service default applies");
    assert_eq!(bindings[0].security_schemes(), vec!["BearerAuth"]);
    assert_eq!(bindings[0].summary, "List articles");
    assert_eq!(bindings[0].doc_tags("api"), "blog");
    assert!(bindings[5].deprecated);

    let ping = bindings.last().unwrap();
    assert!(!ping.require_auth, "method override wins");
    assert!(ping.security_schemes().is_empty());

    let admin = &tables[1].services[0].bindings;
    assert!(admin.iter().all(|b| !b.require_auth));
}

#[test]
fn test_json_descriptor_set() {
    let set = load_descriptor_set(&fixture("greeter.json")).unwrap();
    let tables = build_route_tables(&set).unwrap();
    assert_eq!(
        routes_of(&tables[0]),
        vec![
            route("GET", "/helloworld/:name", "SayHello_0"),
            route("POST", "/helloworld/:name", "SayHello_1"),
        ]
    );
    assert!(tables[0].imports.is_empty());
}

#[test]
fn test_unknown_package_is_fatal() {
    let set = load_descriptor_set(&fixture("unknown_package.yaml")).unwrap();
    let err = build_route_tables(&set).unwrap_err();
    assert_eq!(
        err,
        ResolveError::UnknownPackage {
            type_name: "Order".into(),
            import_path: "example.com/shop/api/missing".into(),
        }
    );
    assert!(err.to_string().starts_with("no such package: example.com/shop/api/missing"));
}

#[test]
fn test_missing_file_reports_path() {
    let err = load_descriptor_set(&fixture("does_not_exist.yaml")).unwrap_err();
    assert!(format!("{err:#}").contains("does_not_exist.yaml"));
}
