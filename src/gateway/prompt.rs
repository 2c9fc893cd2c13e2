use minijinja::{context, Environment};

use crate::utils::Result;

/// Wraps a user query in the instruction template before generation
#[derive(Debug)]
pub struct PromptTemplate {
    env: Environment<'static>,
    source: String,
}

impl PromptTemplate {
    /// Compile `source` once so syntax errors surface at startup
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        Environment::new().template_from_str(&source)?;
        Ok(Self {
            env: Environment::new(),
            source,
        })
    }

    pub fn render(&self, query: &str) -> Result<String> {
        Ok(self.env.render_str(&self.source, context! { query => query })?)
    }
}
