//! # menutree
//!
//! Renders a flat list of hierarchical taxonomy terms into a nested HTML
//! menu fragment. Each term carries a parent id; the renderer reconstructs
//! the implicit tree, walks it depth-first up to a configurable depth limit,
//! and emits nested markup using caller-supplied tag names, CSS classes, and
//! optional before/after decorations. Every caller-supplied string is
//! sanitized before it reaches the output.
//!
//! The output is a fragment meant to be embedded inside a list container
//! element; the caller owns the outer wrapper. An empty string means
//! "nothing to render", not an error.

pub mod options;
pub mod renderer;
pub mod taxonomy;

pub use options::{MenuOptions, OptionDefaults, RawOptions};
pub use renderer::{render_menu, MenuExtension, MenuRenderer, RenderContext};
pub use taxonomy::{filter_terms, load_terms, Term, TermId};
