//! # Generator Module
//!
//! Renders gin route registration source from resolved route tables.
//!
//! ## Overview
//!
//! For every schema file that declares services, one Go file is produced next
//! to the usual generated stubs:
//!
//! ```text
//! api/helloworld/helloworld.proto  ->  api/helloworld/helloworld_gin.pb.go
//! ```
//!
//! The file holds, per service:
//! - **Server interface** - `GreeterHTTPServer`, one method per RPC
//! - **Registration** - `RegisterGreeterHTTPServer(r, srv)` calling
//!   `r.Handle(VERB, "/path", handler)` once per route binding
//! - **Handler factories** - one per binding, binding path, query and body
//!   parameters into the request type before calling the server
//!
//! Handler factories carry swagger comments (`@Summary`, `@Param`, `@Router`,
//! ...) unless `swagger = false` is set in `rpcroute.toml`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rpcroute::generator::{generate_files, GenerateOptions};
//!
//! let written = generate_files(&set, &GenerateOptions {
//!     output_dir: "gen".into(),
//!     ..Default::default()
//! })?;
//! ```
//!
//! ## Templates
//!
//! The askama template lives in `templates/gin_http.go.txt`.

mod project;
mod templates;
#[cfg(test)]
mod tests;

pub use project::*;
pub use templates::*;
