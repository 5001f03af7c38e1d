use crate::config::toml_config::TomlConfig;
use crate::core::format::FitFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::Path;

/// Fully resolved settings for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSettings {
    pub input_path: String,
    pub output_path: Option<String>,
    pub input_format: Option<FitFormat>,
    pub output_format: FitFormat,
}

impl ConversionSettings {
    /// Combines explicit choices with the config file. Explicit values win,
    /// then the config file, then whatever the file names imply. Output
    /// defaults to JSON.
    pub fn resolve(
        input_path: &str,
        output_path: Option<&str>,
        from: Option<FitFormat>,
        to: Option<FitFormat>,
        file: Option<&TomlConfig>,
    ) -> Self {
        let conversion = file.and_then(|config| config.conversion.as_ref());

        let input_format = from
            .or_else(|| conversion.and_then(|c| c.from))
            .or_else(|| FitFormat::from_extension(input_path));

        let output_format = to
            .or_else(|| conversion.and_then(|c| c.to))
            .or_else(|| output_path.and_then(FitFormat::from_extension))
            .unwrap_or(FitFormat::Json);

        let output_path = output_path.map(str::to_string).or_else(|| {
            let dir = conversion.and_then(|c| c.output_dir.as_ref())?;
            let stem = Path::new(input_path).file_stem()?.to_str()?;
            Some(
                Path::new(dir)
                    .join(format!("{}.{}", stem, output_format.extension()))
                    .to_string_lossy()
                    .into_owned(),
            )
        });

        Self {
            input_path: input_path.to_string(),
            output_path,
            input_format,
            output_format,
        }
    }
}

impl ConfigProvider for ConversionSettings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn input_format(&self) -> Option<FitFormat> {
        self.input_format
    }

    fn output_format(&self) -> FitFormat {
        self.output_format
    }
}

impl Validate for ConversionSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input_path)?;
        if let Some(output) = &self.output_path {
            validation::validate_path("output", output)?;
        }
        Ok(())
    }
}
