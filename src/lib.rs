//! # rpcroute
//!
//! **rpcroute** turns RPC service descriptors into HTTP route tables and
//! generates gin route registration code from them.
//!
//! ## Overview
//!
//! Every RPC method becomes one or more HTTP route bindings. Methods carrying
//! an HTTP annotation get one binding per pattern; methods without one get a
//! verb and path inferred from their name:
//!
//! ```text
//! GetBlogArticles  ->  GET    /blog/articles
//! CreateUser       ->  POST   /user
//! DeleteUser       ->  DELETE /user
//! SayHello         ->  POST   /say/hello
//! ```
//!
//! Path templates are rewritten into router syntax (`/users/{id}` becomes
//! `/users/:id`), payload types are qualified with their package when declared
//! elsewhere, and each binding gets a unique handler name (`GetShelf_0`,
//! `GetShelf_1`, ...).
//!
//! ## Architecture
//!
//! - **[`descriptor`]** - Descriptor set model and loading (YAML or JSON)
//! - **[`naming`]** - Method name tokenisation
//! - **[`path`]** - Path parameter normalisation
//! - **[`binding`]** - Route bindings, verb inference and per-method resolution
//! - **[`routes`]** - Route tables per service and per file
//! - **[`linter`]** - Diagnostics over a descriptor set
//! - **[`generator`]** - askama rendering of gin registration source
//! - **[`config`]** - `rpcroute.toml` generator settings
//! - **[`logging`]** - tracing subscriber set-up
//! - **[`cli`]** - The `rpcroute-gen` command line
//!
//! ### Generation Flow
//!
//! ```text
//! descriptors.yaml -> load_descriptor_set -> build_route_tables -> render_file -> *_gin.pb.go
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rpcroute::{build_route_tables, load_descriptor_set};
//!
//! let set = load_descriptor_set("descriptors.yaml".as_ref())?;
//! for file in build_route_tables(&set)? {
//!     for service in &file.services {
//!         for b in &service.bindings {
//!             println!("{} {} -> {}", b.verb, b.route_path(), b.handler_name());
//!         }
//!     }
//! }
//! ```
//!
//! Or from the command line:
//!
//! ```bash
//! rpcroute-gen inspect --input descriptors.yaml
//! rpcroute-gen generate --input descriptors.yaml --output gen
//! ```

pub mod binding;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod generator;
pub mod linter;
pub mod logging;
pub mod naming;
pub mod path;
pub mod routes;

pub use binding::{resolve_method, EmissionCounter, PackageRegistry, ResolveError, RouteBinding};
pub use descriptor::{load_descriptor_set, DescriptorSet};
pub use routes::{build_route_tables, FileRoutes, ServiceRoutes};
