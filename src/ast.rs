use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::render::Render;

/// A parsed `f('template', { key: value, ... })` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FunctionStatement {
    /// Raw TEMPLATE literal, enclosing quotes included.
    pub template: String,
    /// Key -> raw literal value. Template values keep their quotes, numbers
    /// are bare digit runs. A repeated key keeps its last value.
    pub vars: BTreeMap<String, String>,
}

impl FunctionStatement {
    /// Hand the template and variables to a renderer.
    pub fn execute(&self, renderer: &dyn Render) -> Result<String> {
        renderer.render(&self.template, &self.vars)
    }
}
