pub mod json;
pub mod md;

use crate::error::MirrorError;
use crate::types::report::AnalysisResult;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(result: &AnalysisResult, format: OutputFormat) -> Result<String, MirrorError> {
    match format {
        OutputFormat::Json => json::to_json(result).map_err(MirrorError::Json),
        OutputFormat::Md => Ok(md::to_markdown(result)),
    }
}
