use clap::Parser;
use contact_book::core::ConfigProvider;
use contact_book::utils::error::ErrorSeverity;
use contact_book::utils::logger;
use contact_book::{CliConfig, ConsolePort, ContactBookApp, ContactBookError, LocalStorage, Settings};
use std::io;

async fn run(settings: Settings) -> contact_book::Result<()> {
    let storage = LocalStorage::new(settings.data_dir().to_string());
    let port = ConsolePort::new(io::stdin().lock(), io::stdout(), settings.clear_screen());
    let show_welcome = settings.show_welcome;
    let initial_file = settings.default_file().map(str::to_string);

    let mut app = ContactBookApp::new(storage, settings, port);

    if let Some(file) = initial_file {
        match app.load_file(&file).await {
            Ok(count) => tracing::info!("📁 Preloaded {} contacts from {}", count, file),
            Err(e) => {
                tracing::warn!("Could not preload {}: {}", file, e);
                eprintln!("⚠️  {}", e.user_friendly_message());
            }
        }
    }

    if show_welcome {
        app.welcome()?;
    }
    app.run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting contact-book");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入並驗證配置
    let settings = match Settings::resolve(&config) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(settings).await {
        if let ContactBookError::InputClosed { .. } = e {
            tracing::info!("Input closed, exiting");
            return;
        }

        tracing::error!(
            "❌ Contact book stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
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
}
