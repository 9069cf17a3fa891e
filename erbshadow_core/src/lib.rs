//! `erbshadow_core` turns an ERB-style template — host markup mixed with
//! tag-delimited fragments of an embedded scripting language — into a
//! "shadow" source a static-analysis tool for that language can consume
//! directly. The shadow buffer contains only guest-language-valid tokens
//! and is byte-length- and line-identical to the template, so every
//! diagnostic position maps back to the original without translation.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template bytes + externally parsed AST
//!   → Extractor (block-stack traversal, fragment transformers)
//!   → ordered Fragment list
//!   → ShadowDocument (blank fill + absolute-offset overlay)
//!   → external guest-language linter
//! ```
//!
//! The crate deliberately does no parsing of its own: an external
//! markup+guest parser supplies the [`Node`] tree with byte-accurate
//! ranges, and an external linter consumes the result. Which files are
//! eligible for processing is equally the embedder's decision.
//!
//! ## Key Types
//!
//! - [`Node`] / [`NodeKind`] — the borrowed, caller-owned AST view.
//! - [`Fragment`] — one immutable byte-range replacement record.
//! - [`Extractor`] — one traversal over one document; consumed on use.
//! - [`ShadowDocument`] — the rendered, length-identical output buffer.
//! - [`ShadowConfig`] — the single consumed option: preferred quote style.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use erbshadow_core::{ShadowConfig, extract_shadow};
//! # fn parse(_: &[u8]) -> erbshadow_core::Node { unimplemented!() }
//!
//! let source = std::fs::read("template.html.erb").unwrap();
//! let document = parse(&source); // external parser adapter
//! let shadow = extract_shadow(&source, &document, &ShadowConfig::default()).unwrap();
//! assert_eq!(shadow.len(), source.len());
//! ```

pub use config::*;
pub use error::*;
pub use extractor::*;
pub use fragment::*;
pub use node::*;
pub use position::*;
pub use shadow::*;
pub use tags::*;

pub mod comment;
pub mod config;
mod error;
mod extractor;
mod fragment;
pub mod markup;
mod node;
pub mod placeholder;
mod position;
mod shadow;
pub mod statement;
pub(crate) mod tags;

#[cfg(test)]
mod __fixtures;
