//! # Descriptor Module
//!
//! In-memory model of the RPC services a generator run works on: schema files,
//! the services they declare, each method's payload types, and the optional
//! HTTP binding annotation attached to a method.
//!
//! Compiling schema sources into this model is the job of the descriptor
//! compiler. This crate accepts its output serialized as YAML or JSON:
//!
//! ```yaml
//! files:
//!   - path: api/blog/v1/blog.proto
//!     package: v1
//!     import_path: example.com/api/blog/v1
//!     proto_package: blog.v1
//!     services:
//!       - name: BlogService
//!         methods:
//!           - name: GetArticle
//!             input: { name: GetArticleReq }
//!             output: { name: Article }
//!             http:
//!               get: /v1/articles/{id}
//!               additional_bindings:
//!                 - get: /v1/posts/{id}
//! ```

mod load;
mod types;

pub use load::*;
pub use types::*;
