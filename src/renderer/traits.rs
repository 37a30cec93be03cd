use crate::options::{MenuOptions, OptionDefaults};
use crate::taxonomy::Term;

/// Per-level state carried through the recursive walk.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub depth: usize,
}

impl RenderContext {
    pub fn new() -> Self {
        Self { depth: 0 }
    }

    pub fn with_depth(&self, depth: usize) -> Self {
        Self { depth }
    }

    /// One tab per level, matching the emitted nesting.
    pub fn indent(&self) -> String {
        "\t".repeat(self.depth)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability seam for an optional rendering extension.
///
/// Every method has a declining default, so an extension implements only
/// the capabilities it offers. `custom_render` replaces the built-in
/// renderer outright; `default_render` is consulted only when the extension
/// has extended the recognized option set via `extend_defaults`. Absence of
/// an extension (or `None` returns) selects the built-in renderer.
pub trait MenuExtension {
    /// Register extension-recognized option keys and their defaults.
    fn extend_defaults(&self, _defaults: &mut OptionDefaults) {}

    /// Fully custom rendering. Return `None` to fall through.
    fn custom_render(
        &self,
        _terms: &[Term],
        _options: &MenuOptions,
        _base_link: &str,
    ) -> Option<String> {
        None
    }

    /// Extended default rendering, consulted only when the option set was
    /// extended. Return `None` to fall through.
    fn default_render(
        &self,
        _terms: &[Term],
        _options: &MenuOptions,
        _base_link: &str,
    ) -> Option<String> {
        None
    }
}
