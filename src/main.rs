use clap::Parser;
use ocgui::cli::Cli;
use ocgui::config::Settings;
use ocgui::error::{AppError, ErrorCode};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new_with_cli(&cli)?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = ocgui::commands::run(&cli, &settings, &mut stdout).await {
        match e.downcast_ref::<AppError>() {
            // Field messages are meant for the user as-is
            Some(app_error) if app_error.code() == ErrorCode::Validation => {
                eprintln!("{}", app_error);
            }
            Some(app_error) => {
                error!(code = %app_error.code(), "{}", app_error);
                eprintln!("{}", app_error.user_message());
            }
            None => {
                error!("{:#}", e);
                eprintln!("Error: {:#}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
