//! `substitute`: replace `{{ .name }}` markers with variable values.
//!
//! ```text
//! f('hello {{ .who }}, you are {{.age}}', { who: 'ada', age: 36 });
//! -> hello ada, you are 36
//! ```
//!
//! Template values are inserted without their quotes, numbers as written.
//! Text between `{{` and `}}` that is not `.identifier` is copied through
//! untouched, and so is an unterminated `{{`.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{FcallError, Result};
use crate::render::{unquote, Registry, Render};

#[derive(Debug, Clone, Copy, Default)]
pub struct Substitute {
    /// Fail on a placeholder with no matching variable instead of leaving
    /// it in the output.
    pub strict: bool,
}

impl Substitute {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl Render for Substitute {
    fn render(&self, template: &str, vars: &BTreeMap<String, String>) -> Result<String> {
        let mut rest = unquote(template);
        let mut result = String::with_capacity(rest.len());
        let mut replaced = 0usize;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find("}}") else {
                result.push_str(&rest[start..]);
                rest = "";
                break;
            };

            let marker = &rest[start..start + 2 + end + 2];
            match placeholder_name(&after[..end]) {
                Some(name) => match vars.get(name) {
                    Some(value) => {
                        result.push_str(unquote(value));
                        replaced += 1;
                    }
                    None if self.strict => {
                        return Err(FcallError::UnknownVariable(name.to_string()));
                    }
                    None => result.push_str(marker),
                },
                None => result.push_str(marker),
            }

            rest = &after[end + 2..];
        }
        result.push_str(rest);

        debug!("substitute: replaced {} placeholder(s)", replaced);
        Ok(result)
    }
}

/// `" .foo "` -> `Some("foo")`.
fn placeholder_name(inner: &str) -> Option<&str> {
    let name = inner.trim().strip_prefix('.')?;
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}

pub fn register(registry: &mut Registry) {
    registry.register("substitute", Substitute::default());
}
