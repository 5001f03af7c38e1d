pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use crate::config::cli::ConversionSettings;
    use crate::config::toml_config::{CatalogConfig, TomlConfig};
    use crate::core::format::FitFormat;
    use crate::utils::error::Result;
    use crate::utils::logger::LogFormat;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "fitconv")]
    #[command(about = "Convert ship fittings between EFT, EFT2, JSON and YAML")]
    pub struct CliConfig {
        /// Fit file to convert
        pub input: String,

        /// Write here instead of stdout
        #[arg(short, long)]
        pub output: Option<String>,

        /// Input format (detected when omitted)
        #[arg(long, value_enum)]
        pub from: Option<FitFormat>,

        /// Output format (defaults to json)
        #[arg(long, value_enum)]
        pub to: Option<FitFormat>,

        /// TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// SQLite item catalog, overrides catalog.sqlite_path
        #[arg(long)]
        pub catalog: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        /// Emit logs as JSON lines
        #[arg(long)]
        pub log_json: bool,
    }

    impl CliConfig {
        pub fn log_format(&self) -> LogFormat {
            if self.log_json {
                LogFormat::Json
            } else {
                LogFormat::Compact
            }
        }

        pub fn load_file(&self) -> Result<Option<TomlConfig>> {
            self.config
                .as_deref()
                .map(|path| {
                    let config = TomlConfig::from_file(path)?;
                    config.validate()?;
                    Ok(config)
                })
                .transpose()
        }

        pub fn settings(&self, file: Option<&TomlConfig>) -> ConversionSettings {
            ConversionSettings::resolve(
                &self.input,
                self.output.as_deref(),
                self.from,
                self.to,
                file,
            )
        }

        pub fn catalog(&self, file: Option<&TomlConfig>) -> CatalogConfig {
            let mut catalog = file.map(|config| config.catalog.clone()).unwrap_or_default();
            if let Some(path) = &self.catalog {
                catalog.sqlite_path = Some(path.clone());
            }
            catalog
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("input", &self.input)?;
            if let Some(path) = &self.catalog {
                validation::validate_file_extension("catalog", path, &["sqlite", "sqlite3", "db"])?;
            }
            Ok(())
        }
    }

}
