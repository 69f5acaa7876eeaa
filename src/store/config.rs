//! Config slice: at most one [`AppConfig`], replaced wholesale

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::PersistedSlice;
use crate::constants::storage_keys;
use crate::domain::AppConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSlice {
    config: Option<Arc<AppConfig>>,
}

impl ConfigSlice {
    pub fn config(&self) -> Option<&Arc<AppConfig>> {
        self.config.as_ref()
    }

    pub fn set_config(&mut self, config: Option<AppConfig>) {
        self.config = config.map(Arc::new);
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigState {
    #[serde(default)]
    config: Option<AppConfig>,
}

impl PersistedSlice for ConfigSlice {
    const STORAGE_KEY: &'static str = storage_keys::CONFIG;
    type State = ConfigState;

    fn to_state(&self) -> ConfigState {
        ConfigState {
            config: self.config.as_deref().cloned(),
        }
    }

    fn from_state(state: ConfigState) -> Self {
        let mut slice = Self::default();
        slice.set_config(state.config);
        slice
    }
}
