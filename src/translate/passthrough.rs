use async_trait::async_trait;

use crate::error::Result;
use crate::language::Language;
use super::Translator;

/// Returns the source text unchanged
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str, _target: Language) -> Result<String> {
        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}
