use crate::core::format::FitFormat;
use crate::core::{parse_fit, render_fit, CategoryLookup, ConfigProvider, Fit, Pipeline, Rendered, Storage};
use crate::utils::error::{FitError, Result};

/// Reads one fit through `storage`, converts it and writes it back.
pub struct ConvertPipeline<S: Storage, L: CategoryLookup, C: ConfigProvider> {
    storage: S,
    lookup: L,
    config: C,
}

impl<S: Storage, L: CategoryLookup, C: ConfigProvider> ConvertPipeline<S, L, C> {
    pub fn new(storage: S, lookup: L, config: C) -> Self {
        Self {
            storage,
            lookup,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, L: CategoryLookup, C: ConfigProvider> Pipeline for ConvertPipeline<S, L, C> {
    async fn extract(&self) -> Result<Fit> {
        let path = self.config.input_path();
        tracing::debug!("Reading fit from: {}", path);

        let bytes = self.storage.read_file(path).await?;
        let text = String::from_utf8(bytes).map_err(|e| FitError::ValidationError {
            message: format!("{} is not valid UTF-8: {}", path, e),
        })?;

        let format = match self.config.input_format() {
            Some(format) => format,
            None => {
                let sniffed = FitFormat::sniff(&text);
                tracing::debug!(format = %sniffed, "Detected input format");
                sniffed
            }
        };

        parse_fit(format, &text, &self.lookup)
    }

    async fn transform(&self, fit: Fit) -> Result<Rendered> {
        let format = self.config.output_format();
        let text = render_fit(&fit, format)?;
        Ok(Rendered { format, text })
    }

    async fn load(&self, rendered: &Rendered) -> Result<Option<String>> {
        let Some(path) = self.config.output_path() else {
            return Ok(None);
        };

        self.storage.write_file(path, rendered.text.as_bytes()).await?;
        Ok(Some(path.to_string()))
    }
}
