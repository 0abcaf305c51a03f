//! Route pattern DSL.
//!
//! Compiles slash-delimited route patterns with typed placeholders, matches
//! concrete paths against them, and resolves templates from the extracted
//! values.
//!
//! # Example
//!
//! ```
//! use routedsl::{resolve, RoutePattern};
//!
//! let pattern = RoutePattern::compile("/posts/{{slug string}}{{ext ext}}").unwrap();
//!
//! let values = pattern.eval("/posts/hello.html").into_values().unwrap();
//! assert_eq!(values["slug"], "hello");
//! assert_eq!(values["ext"], ".html");
//!
//! // A missing or invalid extension does not fail the match
//! assert!(pattern.is_match("/posts/hello"));
//!
//! assert_eq!(resolve(&values, "/archive/{{slug}}{{ext}}"), "/archive/hello.html");
//! ```
//!
//! Types are looked up by their full type expression in a [`TypeRegistry`].
//! Patterns compiled with [`RoutePattern::compile`] use the built-in types;
//! [`RoutePattern::with_registry`] takes any registry.

pub mod cli;
pub mod decl;
pub mod error;
pub mod matcher;
pub mod output;
pub mod pattern;
pub mod registry;
pub mod template;
pub mod types;

pub use decl::{END_VAR, START_VAR};
pub use error::{CompileError, DeclError, RegistryError, SegmentLocation};
pub use matcher::MatchResult;
pub use pattern::{PatternRecord, RoutePattern, Segment};
pub use registry::{TypeRegistry, Validator};
pub use template::resolve;
