use clap::Parser;
use zodiac_match::utils::error::ErrorSeverity;
use zodiac_match::utils::{logger, validation::Validate};
use zodiac_match::{
    CliConfig, CompatibilityEngine, CompatibilityReading, ConfiguredStore, ReadingRecord,
    TomlConfig, ZodiacError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 載入儲存設定 (未指定時使用本機檔案)
    let store_config = match &config.store_config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(store_config) => store_config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::local(&config.output_path),
    };

    // 初始化日誌
    let verbose = config.verbose || store_config.verbose();
    if config.log_json || store_config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting zodiac-match CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config, &store_config).await {
        tracing::error!(
            "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &CliConfig, store_config: &TomlConfig) -> Result<(), ZodiacError> {
    let engine = CompatibilityEngine::new(ConfiguredStore::from_config(store_config)?);

    if config.history {
        // validate() guarantees a user id in history mode
        let user_id = config.user_id.as_deref().unwrap_or_default();
        let records = engine.history(user_id, &config.to_filter()?).await?;
        if config.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else {
            print_history(user_id, &records);
        }
        return Ok(());
    }

    let request = config.to_request()?;
    let (reading, record) = match &config.user_id {
        Some(user_id) => {
            let (reading, record) = engine.save_reading(user_id, &request).await?;
            (reading, Some(record))
        }
        None => (engine.evaluate(&request)?, None),
    };

    if config.json {
        let output = serde_json::json!({
            "id": record.as_ref().map(|r| r.id.clone()),
            "description": reading.description(),
            "content": reading.content,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_reading(&reading);
        if let Some(record) = record {
            println!("💾 Saved as {}", record.id);
        }
    }

    Ok(())
}

fn print_reading(reading: &CompatibilityReading) {
    let content = &reading.content;
    println!("{} + {}", content.sign1, content.sign2);
    println!("{}% Compatible - {}", content.score, reading.description());
    for (axis, score) in content.areas.iter() {
        println!("  {:<14} {:>3}", axis.label(), score);
    }
}

fn print_history(user_id: &str, records: &[ReadingRecord]) {
    if records.is_empty() {
        println!("No readings found for {}", user_id);
        return;
    }

    for record in records {
        let summary = match record.compatibility() {
            Some(content) => format!(
                "{} + {}: {}% Compatible",
                content.sign1, content.sign2, content.score
            ),
            None => record.content.to_string(),
        };
        println!(
            "{}  {}  [{}]  {}",
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.id,
            record.kind,
            summary
        );
    }
}
