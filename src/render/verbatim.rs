//! `verbatim`: the template body as written, placeholders untouched.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::render::{unquote, Registry, Render};

#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl Render for Verbatim {
    fn render(&self, template: &str, _vars: &BTreeMap<String, String>) -> Result<String> {
        Ok(unquote(template).to_string())
    }
}

pub fn register(registry: &mut Registry) {
    registry.register("verbatim", Verbatim);
}
