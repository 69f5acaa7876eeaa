use crate::config::{DatabaseSettings, RunSettings, Settings, StorageSettings, ToastSettings};
use crate::constants::security::MAX_QUERY_LIMIT;
pub use crate::domain::ValidationError;

pub struct SettingsValidator;

impl SettingsValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_storage(&settings.storage) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_database(&settings.database, &settings.database_url()) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_runs(&settings.runs) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_toast(&settings.toast) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_storage(storage: &StorageSettings) -> Result<(), Vec<ValidationError>> {
        if storage.data_dir.as_os_str().is_empty() {
            return Err(vec![ValidationError::MissingField(
                "storage.data_dir".to_string(),
            )]);
        }
        Ok(())
    }

    fn validate_database(
        database: &DatabaseSettings,
        url: &str,
    ) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if url.trim().is_empty() {
            errors.push(ValidationError::MissingField("database.url".to_string()));
        } else if !url.starts_with("sqlite:") {
            errors.push(ValidationError::InvalidValue {
                field: "database.url".to_string(),
                reason: format!("'{}' is not a sqlite: URL", url),
            });
        }

        if database.max_connections == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "database.max_connections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_runs(runs: &RunSettings) -> Result<(), Vec<ValidationError>> {
        if runs.default_limit == 0 || runs.default_limit > MAX_QUERY_LIMIT {
            return Err(vec![ValidationError::InvalidValue {
                field: "runs.default_limit".to_string(),
                reason: format!("must be between 1 and {}", MAX_QUERY_LIMIT),
            }]);
        }
        Ok(())
    }

    fn validate_toast(toast: &ToastSettings) -> Result<(), Vec<ValidationError>> {
        if toast.max_visible == 0 {
            return Err(vec![ValidationError::InvalidValue {
                field: "toast.max_visible".to_string(),
                reason: "must be at least 1".to_string(),
            }]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingSettings, SearchSettings};
    use crate::storage::StorageBackend;
    use std::path::PathBuf;

    fn valid() -> Settings {
        Settings {
            storage: StorageSettings {
                backend: StorageBackend::File,
                data_dir: PathBuf::from("data"),
            },
            database: DatabaseSettings {
                url: Some("sqlite::memory:".to_string()),
                max_connections: 1,
            },
            runs: RunSettings { default_limit: 100 },
            search: SearchSettings {
                debounce_ms: 300,
                min_query_length: 2,
            },
            toast: ToastSettings {
                duration_ms: 5000,
                max_visible: 5,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(SettingsValidator::validate(&valid()).is_ok());
    }

    #[test]
    fn test_rejects_non_sqlite_url() {
        let mut settings = valid();
        settings.database.url = Some("postgres://localhost/ocgui".to_string());
        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("database.url"));
    }

    #[test]
    fn test_collects_every_error() {
        let mut settings = valid();
        settings.storage.data_dir = PathBuf::new();
        settings.database.url = Some(String::new());
        settings.database.max_connections = 0;
        settings.runs.default_limit = MAX_QUERY_LIMIT + 1;
        settings.toast.max_visible = 0;

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::MissingField(
            "storage.data_dir".to_string()
        )));
        assert!(errors.contains(&ValidationError::MissingField("database.url".to_string())));
    }

    #[test]
    fn test_zero_run_limit() {
        let mut settings = valid();
        settings.runs.default_limit = 0;
        assert!(SettingsValidator::validate(&settings).is_err());
    }
}
