//! UI preference slice

use serde::{Deserialize, Serialize};

use super::PersistedSlice;
use crate::constants::storage_keys;
use crate::domain::Theme;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiSlice {
    theme: Theme,
    last_search_query: String,
}

impl UiSlice {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn last_search_query(&self) -> &str {
        &self.last_search_query
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn set_last_search_query(&mut self, query: impl Into<String>) {
        self.last_search_query = query.into();
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    #[serde(default)]
    theme: Theme,
    #[serde(default)]
    last_search_query: String,
}

impl PersistedSlice for UiSlice {
    const STORAGE_KEY: &'static str = storage_keys::UI;
    type State = UiState;

    fn to_state(&self) -> UiState {
        UiState {
            theme: self.theme,
            last_search_query: self.last_search_query.clone(),
        }
    }

    fn from_state(state: UiState) -> Self {
        Self {
            theme: state.theme,
            last_search_query: state.last_search_query,
        }
    }
}
