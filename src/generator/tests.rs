#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::config::GeneratorConfig;
use crate::descriptor::{parse_descriptor_set, DescriptorSet};
use crate::routes::build_route_tables;
use std::fs;
use std::os::unix::fs::PermissionsExt;

const GREETER: &str = r#"
files:
  - path: api/helloworld/helloworld.proto
    package: helloworld
    import_path: example.com/api/helloworld
    proto_package: helloworld
    services:
      - name: Greeter
        auth: { required: true, schemes: "BearerAuth, ApiKeyAuth" }
        methods:
          - name: SayHello
            input: { name: HelloRequest }
            output: { name: HelloReply }
            http:
              get: "/helloworld/{name}"
              additional_bindings:
                - post: /v1/greeter/say_hello
          - name: ListGreetings
            input: { name: ListGreetingsReq }
            output: { name: Empty, import_path: example.com/api/common }
            summary: List greetings
            description: "Lists every greeting\nsent so far"
            deprecated: true
  - path: api/common/common.proto
    package: common
    import_path: example.com/api/common
"#;

fn greeter() -> DescriptorSet {
    parse_descriptor_set(GREETER, true).unwrap()
}

fn no_format() -> GeneratorConfig {
    GeneratorConfig {
        format: false,
        ..GeneratorConfig::default()
    }
}

fn render(set: &DescriptorSet, config: &GeneratorConfig) -> String {
    let tables = build_route_tables(set).unwrap();
    render_file(&tables[0], config).unwrap()
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
}

#[test]
fn test_output_file_name() {
    assert_eq!(
        output_file_name("api/helloworld/helloworld.proto", "_gin.pb.go"),
        "api/helloworld/helloworld_gin.pb.go"
    );
    assert_eq!(output_file_name("noext", "_http.go"), "noext_http.go");
}

#[test]
fn test_swagger_path() {
    assert_eq!(swagger_path("/users/:id/posts/:post_id"), "/users/{id}/posts/{post_id}");
    assert_eq!(swagger_path("/plain"), "/plain");
    assert_eq!(swagger_path("/"), "/");
}

#[test]
fn test_render_header_and_imports() {
    let out = render(&greeter(), &no_format());
    assert!(out.starts_with("// Code generated by rpcroute-gen. DO NOT EDIT.\n"));
    assert!(out.contains("// source: api/helloworld/helloworld.proto"));
    assert!(out.contains("\npackage helloworld\n"));
    assert!(out.contains("\tcontext \"context\""));
    assert!(out.contains("\tgin \"github.com/gin-gonic/gin\""));
    assert!(out.contains("\tcommon \"example.com/api/common\""));
    assert!(out.contains("\tmetadata \"google.golang.org/grpc/metadata\""));
    assert!(!out.contains("example.com/api/helloworld\""), "own package must not be imported");
}

#[test]
fn test_render_interface_lists_each_method_once() {
    let out = render(&greeter(), &no_format());
    assert!(out.contains("type GreeterHTTPServer interface {"));
    let list = position(
        &out,
        "\tListGreetings(context.Context, *ListGreetingsReq) (*common.Empty, error)",
    );
    let say = position(
        &out,
        "\tSayHello(context.Context, *HelloRequest) (*HelloReply, error)",
    );
    assert!(list < say);
    assert_eq!(out.matches("\tSayHello(context.Context").count(), 1);
}

#[test]
fn test_registration_follows_table_order() {
    let out = render(&greeter(), &no_format());
    assert!(out.contains("func RegisterGreeterHTTPServer(r gin.IRoutes, srv GreeterHTTPServer) {"));
    let post = position(
        &out,
        "r.Handle(\"POST\", \"/v1/greeter/say_hello\", _Greeter_SayHello_0_HTTP_Handler(srv))",
    );
    let get = position(
        &out,
        "r.Handle(\"GET\", \"/helloworld/:name\", _Greeter_SayHello_1_HTTP_Handler(srv))",
    );
    let list = position(
        &out,
        "r.Handle(\"GET\", \"/greetings\", _Greeter_ListGreetings_0_HTTP_Handler(srv))",
    );
    assert!(post < get && get < list);
}

#[test]
fn test_handler_factories_bind_by_verb() {
    let out = render(&greeter(), &no_format());
    assert!(out.contains(
        "func _Greeter_SayHello_1_HTTP_Handler(srv GreeterHTTPServer) gin.HandlerFunc {"
    ));
    assert_eq!(out.matches("c.ShouldBindUri(&in)").count(), 1);
    assert_eq!(out.matches("c.ShouldBindQuery(&in)").count(), 2);
    assert_eq!(out.matches("c.ShouldBindJSON(&in)").count(), 1);
    assert!(out.contains("out, err := srv.SayHello(ctx, &in)"));
    assert!(out.contains("out, err := srv.ListGreetings(ctx, &in)"));
}

#[test]
fn test_swagger_comments() {
    let out = render(&greeter(), &no_format());
    assert!(out.contains("// @Summary SayHello\n"));
    assert!(out.contains("// @Description SayHello API endpoint\n"));
    assert!(out.contains("// @Summary List greetings\n"));
    assert!(out.contains("// @Description Lists every greeting sent so far\n"));
    assert!(out.contains("// @Tags api\n"));
    assert!(out.contains("// @Param name path string true \"name\"\n"));
    assert!(out.contains("// @Param request body HelloRequest true \"request\"\n"));
    assert!(out.contains("// @Param request query ListGreetingsReq false \"request\"\n"));
    assert!(out.contains("// @Success 200 {object} common.Empty\n"));
    assert!(out.contains("// @Router /helloworld/{name} [get]\n"));
    assert!(out.contains("// @Router /greetings [get]\n"));
    // service default auth applies to every binding
    assert_eq!(out.matches("// @Security BearerAuth\n").count(), 3);
    assert_eq!(out.matches("// @Security ApiKeyAuth\n").count(), 3);
    assert_eq!(out.matches("// @Deprecated\n").count(), 1);
}

#[test]
fn test_swagger_disabled() {
    let config = GeneratorConfig {
        swagger: false,
        ..no_format()
    };
    let out = render(&greeter(), &config);
    assert!(!out.contains("@Router"));
    assert!(!out.contains("@Summary"));
    assert!(out.contains("// _Greeter_SayHello_0_HTTP_Handler serves POST /v1/greeter/say_hello."));
}

#[test]
fn test_default_tag_from_config() {
    let config = GeneratorConfig {
        default_tag: "greeter".into(),
        ..no_format()
    };
    let out = render(&greeter(), &config);
    assert!(out.contains("// @Tags greeter\n"));
    assert!(!out.contains("// @Tags api\n"));
}

#[test]
fn test_deprecated_service_comment() {
    let set = parse_descriptor_set(
        r#"
files:
  - path: old.proto
    package: old
    import_path: example.com/old
    services:
      - name: Legacy
        deprecated: true
        methods:
          - name: GetThing
            input: { name: Req }
            output: { name: Resp }
"#,
        true,
    )
    .unwrap();
    let out = render(&set, &no_format());
    let doc = position(&out, "// LegacyHTTPServer is the HTTP server API for the Legacy service.");
    let dep = position(&out, "// Deprecated: Do not use.");
    let ty = position(&out, "type LegacyHTTPServer interface {");
    assert!(doc < dep && dep < ty);
}

#[test]
fn test_empty_annotation_registers_empty_route() {
    let set = parse_descriptor_set(
        r#"
files:
  - path: s.proto
    package: s
    import_path: example.com/s
    services:
      - name: S
        methods:
          - name: Broken
            input: { name: Req }
            output: { name: Resp }
            http: {}
"#,
        true,
    )
    .unwrap();
    let out = render(&set, &no_format());
    assert!(out.contains("r.Handle(\"\", \"/\", _S_Broken_0_HTTP_Handler(srv))"));
}

#[test]
fn test_multiline_doc_fields_stay_in_comments() {
    let set = parse_descriptor_set(
        r#"
files:
  - path: s.proto
    package: s
    import_path: example.com/s
    services:
      - name: S
        methods:
          - name: ListThings
            input: { name: Req }
            output: { name: Resp }
            http: { get: /things }
            summary: "List greetings\nfor the user"
            tags: "things\r\nfunc Evil() {}"
            auth: { required: true, schemes: "Bearer\nAuth" }
"#,
        true,
    )
    .unwrap();
    let out = render(&set, &no_format());
    assert!(out.contains("// @Summary List greetings for the user\n"));
    assert!(out.contains("// @Security Bearer Auth\n"));
    for line in out.lines() {
        if line.contains("for the user") || line.contains("func Evil") || line.ends_with("Auth") {
            assert!(line.trim_start().starts_with("// "), "uncommented line {line:?}");
        }
    }
}

#[test]
fn test_route_literals_are_escaped() {
    let set = parse_descriptor_set(
        r#"
files:
  - path: s.proto
    package: s
    import_path: example.com/s
    services:
      - name: S
        methods:
          - name: GetThing
            input: { name: Req }
            output: { name: Resp }
            http: { get: "/a\"b\\c" }
"#,
        true,
    )
    .unwrap();
    let out = render(&set, &no_format());
    assert!(
        out.contains(r#"r.Handle("GET", "/a\"b\\c", _S_GetThing_0_HTTP_Handler(srv))"#),
        "{out}"
    );
}

#[test]
fn test_plan_files_skips_files_without_services() {
    let dir = tempfile::tempdir().unwrap();
    let planned = plan_files(&greeter(), &no_format(), dir.path()).unwrap();
    assert_eq!(planned.len(), 1);
    assert_eq!(
        planned[0].path,
        dir.path().join("api/helloworld/helloworld_gin.pb.go")
    );
    assert_eq!(planned[0].source, "api/helloworld/helloworld.proto");
    assert_eq!(planned[0].routes, 3);
}

#[test]
fn test_generate_writes_and_respects_force() {
    let dir = tempfile::tempdir().unwrap();
    let options = GenerateOptions {
        output_dir: dir.path().to_path_buf(),
        config: no_format(),
        ..Default::default()
    };
    let target = dir.path().join("api/helloworld/helloworld_gin.pb.go");

    let written = generate_files(&greeter(), &options).unwrap();
    assert_eq!(written, vec![target.clone()]);
    assert!(fs::read_to_string(&target).unwrap().contains("RegisterGreeterHTTPServer"));

    fs::write(&target, "// edited\n").unwrap();
    let written = generate_files(&greeter(), &options).unwrap();
    assert!(written.is_empty(), "existing file must be skipped");
    assert_eq!(fs::read_to_string(&target).unwrap(), "// edited\n");

    let forced = GenerateOptions {
        force: true,
        ..options
    };
    let written = generate_files(&greeter(), &forced).unwrap();
    assert_eq!(written.len(), 1);
    assert!(fs::read_to_string(&target).unwrap().contains("RegisterGreeterHTTPServer"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let options = GenerateOptions {
        output_dir: dir.path().to_path_buf(),
        dry_run: true,
        config: no_format(),
        ..Default::default()
    };
    let written = generate_files(&greeter(), &options).unwrap();
    assert!(written.is_empty());
    assert!(!dir.path().join("api").exists());
}

#[test]
fn test_generate_runs_configured_formatter() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("formatted");
    let stub = dir.path().join("fake-gofmt");
    fs::write(
        &stub,
        format!("#!/bin/sh\n[ \"$1\" = \"-w\" ] && touch {}\n", marker.display()),
    )
    .unwrap();
    let mut perms = fs::metadata(&stub).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&stub, perms).unwrap();

    let options = GenerateOptions {
        output_dir: dir.path().join("out"),
        config: GeneratorConfig {
            formatter: stub.to_string_lossy().into_owned(),
            ..GeneratorConfig::default()
        },
        ..Default::default()
    };
    generate_files(&greeter(), &options).unwrap();
    assert!(marker.exists(), "formatter was not invoked");
}

#[test]
fn test_unknown_package_fails_generation() {
    let set = parse_descriptor_set(
        r#"
files:
  - path: s.proto
    package: s
    import_path: example.com/s
    services:
      - name: S
        methods:
          - name: GetThing
            input: { name: Req, import_path: example.com/gone }
            output: { name: Resp }
"#,
        true,
    )
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let options = GenerateOptions {
        output_dir: dir.path().to_path_buf(),
        config: no_format(),
        ..Default::default()
    };
    let err = generate_files(&set, &options).unwrap_err();
    assert!(format!("{err:#}").contains("no such package: example.com/gone"));
    assert!(!dir.path().join("s_gin.pb.go").exists());
}
