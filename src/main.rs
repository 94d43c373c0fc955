use anyhow::Context;
use clap::Parser;
use opengd77::core::projection::{codeplug_aprs_rows, codeplug_channel_rows};
use opengd77::utils::{logger, validation::Validate};
use opengd77::{CliConfig, CodeplugError, CodeplugExporter, CodeplugFile, LocalStorage};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting opengd77 codeplug export");
    tracing::debug!("CLI config: {:?}", config);

    config
        .validate()
        .context("Configuration validation failed")?;

    if let Err(e) = run(&config) {
        tracing::error!("Export failed: {} (category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn run(config: &CliConfig) -> Result<(), CodeplugError> {
    tracing::info!("Loading codeplug definition from: {}", config.definition);
    let codeplug = CodeplugFile::from_file(&config.definition)?.build_codeplug()?;
    codeplug.verify_references()?;

    if config.dry_run {
        let channels = codeplug_channel_rows(&codeplug)?;
        let aprs = codeplug_aprs_rows(&codeplug)?;
        tracing::info!(
            "Dry run: {} channel rows and {} APRS rows would be written to {}",
            channels.len(),
            aprs.len(),
            config.output_path
        );
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let exporter = CodeplugExporter::new(storage, config.formats.clone());
    let summary = exporter.export(&codeplug)?;

    println!("✅ Codeplug exported to {}", config.output_path);
    for file in &summary.files {
        println!("📁 {}", file);
    }
    Ok(())
}

