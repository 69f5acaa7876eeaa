use clap::Parser;
use ocgui::cli::Cli;
use ocgui::config::Settings;
use ocgui::storage::StorageBackend;
use ocgui::timing::{Debounced, ToastKind, ToastQueue};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

#[test]
fn test_load_from_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("ocgui.toml");

    let ocgui_toml = r#"
[storage]
backend = "memory"
data_dir = "/srv/ocgui"

[database]
url = "sqlite::memory:"
max_connections = 2

[runs]
default_limit = 50

[search]
debounce_ms = 150
"#;
    fs::write(&path, ocgui_toml)?;

    let settings = Settings::from_file(&path)?;
    assert_eq!(settings.storage.backend, StorageBackend::Memory);
    assert_eq!(settings.storage.data_dir, PathBuf::from("/srv/ocgui"));
    assert_eq!(settings.database_url(), "sqlite::memory:");
    assert_eq!(settings.database.max_connections, 2);
    assert_eq!(settings.runs.default_limit, 50);
    assert_eq!(settings.search.debounce_ms, 150);
    // Untouched keys keep their defaults
    assert_eq!(settings.search.min_query_length, 2);
    assert_eq!(settings.toast.duration_ms, 5000);
    assert_eq!(settings.logging.level, "info");
    Ok(())
}

#[test]
fn test_missing_file_uses_defaults() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let settings = Settings::from_file(temp_dir.path().join("absent.toml"))?;

    assert_eq!(settings.storage.backend, StorageBackend::File);
    assert!(settings.storage.data_dir.ends_with("ocgui"));
    assert!(settings.database_url().starts_with("sqlite://"));
    assert!(settings.database_url().ends_with("ocgui.db"));
    assert_eq!(settings.runs.default_limit, 100);
    Ok(())
}

#[test]
fn test_invalid_file_is_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("ocgui.toml");
    fs::write(
        &path,
        r#"
[database]
url = "postgres://localhost/ocgui"

[runs]
default_limit = 0
"#,
    )?;

    let err = Settings::from_file(&path).unwrap_err().to_string();
    assert!(err.contains("Configuration validation failed"));
    assert!(err.contains("database.url"));
    assert!(err.contains("runs.default_limit"));
    Ok(())
}

#[test]
fn test_environment_and_cli_layering() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("ocgui.toml");
    fs::write(
        &path,
        r#"
[storage]
backend = "file"

[toast]
max_visible = 9
"#,
    )?;

    std::env::set_var("OCGUI_TOAST__MAX_VISIBLE", "3");
    let data_dir = temp_dir.path().join("data");
    let cli = Cli::parse_from([
        "ocgui".to_string(),
        "--config".to_string(),
        path.display().to_string(),
        "--storage".to_string(),
        "memory".to_string(),
        "--data-dir".to_string(),
        data_dir.display().to_string(),
        "templates".to_string(),
    ]);
    let settings = Settings::new_with_cli(&cli);
    std::env::remove_var("OCGUI_TOAST__MAX_VISIBLE");
    let settings = settings?;

    // env beats file, CLI beats both
    assert_eq!(settings.toast.max_visible, 3);
    assert_eq!(settings.storage.backend, StorageBackend::Memory);
    assert_eq!(settings.storage.data_dir, data_dir);
    assert_eq!(
        settings.persistence_config().url,
        format!("sqlite://{}", data_dir.join("ocgui.db").display())
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_timers_follow_configured_durations() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("ocgui.toml");
    fs::write(
        &path,
        r#"
[search]
debounce_ms = 120

[toast]
duration_ms = 800
max_visible = 4
"#,
    )?;
    let settings = Settings::from_file(&path)?;

    let toasts = ToastQueue::from_settings(&settings.toast);
    toasts.add("Agent saved", ToastKind::Success);
    let mut query = Debounced::with_settings(String::new(), &settings.search);
    query.schedule("review".to_string());

    sleep(Duration::from_millis(121)).await;
    assert_eq!(query.get(), "review");
    assert_eq!(toasts.toasts().len(), 1);

    // Default duration would keep the toast for 5s
    sleep(Duration::from_millis(680)).await;
    assert!(toasts.toasts().is_empty());
    Ok(())
}
