use crate::core::{Pipeline, Rendered};
use crate::utils::error::Result;

/// What a finished conversion produced.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub rendered: Rendered,
    /// Where the output was written, if it was written anywhere.
    pub output_path: Option<String>,
}

pub struct ConversionEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ConversionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<ConversionOutcome> {
        tracing::info!("Starting fit conversion");

        // Extract
        let fit = self.pipeline.extract().await?;
        tracing::info!(
            ship = %fit.ship,
            name = %fit.name,
            items = fit.item_count(),
            "Parsed fit"
        );

        // Transform
        let rendered = self.pipeline.transform(fit).await?;
        tracing::info!(format = %rendered.format, bytes = rendered.text.len(), "Rendered fit");

        // Load
        let output_path = self.pipeline.load(&rendered).await?;
        if let Some(path) = &output_path {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(ConversionOutcome {
            rendered,
            output_path,
        })
    }
}
