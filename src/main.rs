use anyhow::Context;
use clap::Parser;
use fitconv::utils::error::{ErrorSeverity, FitError};
use fitconv::utils::{logger, validation::Validate};
use fitconv::{build_lookup, CliConfig, ConversionEngine, ConversionOutcome, ConvertPipeline, LocalStorage};
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.log_format());

    tracing::info!("Starting fitconv");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match convert(&config).await {
        Ok(outcome) => match outcome.output_path {
            Some(path) => {
                tracing::info!("✅ Conversion completed");
                eprintln!("✅ Wrote {} fit to {}", outcome.rendered.format, path);
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(outcome.rendered.text.as_bytes())
                    .and_then(|_| stdout.flush())
                    .context("writing converted fit to stdout")?;
            }
        },
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(exit_code(&e));
        }
    }

    Ok(())
}

async fn convert(config: &CliConfig) -> fitconv::Result<ConversionOutcome> {
    config.validate()?;

    let file = config.load_file()?;
    let settings = config.settings(file.as_ref());
    settings.validate()?;
    tracing::debug!(?settings, "Resolved conversion settings");

    let lookup = build_lookup(&config.catalog(file.as_ref()))?;

    let pipeline = ConvertPipeline::new(LocalStorage::new("."), lookup, settings);
    ConversionEngine::new(pipeline).run().await
}

fn exit_code(e: &FitError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
