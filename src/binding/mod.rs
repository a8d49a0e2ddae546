//! # Binding Module
//!
//! Resolves RPC methods into HTTP route bindings.
//!
//! ## Resolution Rules
//!
//! A method carrying an HTTP annotation produces one binding per alternate
//! pattern (in listed order) and then one for the primary pattern:
//!
//! ```text
//! rpc GetShelf(GetShelfReq) returns (Shelf) {
//!   get: "/v1/shelves/{id}"
//!   additional_bindings { get: "/v1/libraries/{lib}/shelves/{id}" }
//! }
//!
//! GetShelf_0  GET  /v1/libraries/:lib/shelves/:id
//! GetShelf_1  GET  /v1/shelves/:id
//! ```
//!
//! A method without an annotation produces a single binding whose verb and
//! path come from its name, and whose whole request payload is the body:
//!
//! ```text
//! GetBlogArticles  ->  GET  blog/articles
//! CreateUser       ->  POST user
//! Ping             ->  POST ping
//! ```
//!
//! Paths are always rewritten into router syntax (`{id}` -> `:id`).
//!
//! ## Numbering
//!
//! Every binding takes the next number from an [`EmissionCounter`] keyed by
//! method name. The counter is owned by the caller and threaded through each
//! [`resolve_method`] call, so a redeclared method name continues its
//! numbering instead of colliding on handler names.

mod infer;
mod resolve;
mod types;

pub use infer::*;
pub use resolve::*;
pub use types::*;
