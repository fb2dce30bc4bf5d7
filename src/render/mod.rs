use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::{FcallError, Result};

// ---------------------------------------------------------------------------
// Core trait
// ---------------------------------------------------------------------------

/// Turns a parsed template and its variables into the final string.
///
/// The parser treats the template as opaque text; everything about
/// placeholder syntax and substitution lives behind this trait.
///
/// - `template`: the raw TEMPLATE literal, enclosing quotes included.
/// - `vars`: raw variable literals. Template values keep their quotes.
pub trait Render: Send + Sync {
    fn render(&self, template: &str, vars: &BTreeMap<String, String>) -> Result<String>;
}

pub mod substitute; // {{ .name }} replacement
pub mod verbatim;   // template text as-is

pub use substitute::Substitute;
pub use verbatim::Verbatim;

/// Name of the renderer used when none is chosen.
pub const DEFAULT_RENDERER: &str = "substitute";

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Renderers addressable by name.
#[derive(Default)]
pub struct Registry {
    renderers: HashMap<String, Arc<dyn Render>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in renderer.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_all(&mut registry);
        registry
    }

    pub fn register<R: Render + 'static>(&mut self, name: &str, renderer: R) {
        self.renderers.insert(name.to_string(), Arc::new(renderer));
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Render>> {
        self.renderers
            .get(name)
            .cloned()
            .ok_or_else(|| FcallError::UnknownRenderer(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Register every built-in renderer.
pub fn register_all(registry: &mut Registry) {
    substitute::register(registry);
    verbatim::register(registry);
}

/// Strip the enclosing single quotes of a template literal. A literal
/// truncated at end of input only loses its opening quote.
pub fn unquote(literal: &str) -> &str {
    let body = literal.strip_prefix('\'').unwrap_or(literal);
    body.strip_suffix('\'').unwrap_or(body)
}
