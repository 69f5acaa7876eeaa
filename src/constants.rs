//! Application-wide constants

/// Input limits used by the sanitizers and settings validation
pub mod security {
    pub const MAX_ID_LENGTH: usize = 256;
    pub const MAX_NAME_LENGTH: usize = 256;
    pub const MAX_DESCRIPTION_LENGTH: usize = 2048;
    pub const MAX_PATH_LENGTH: usize = 4096;
    pub const MAX_INPUT_LENGTH: usize = 100_000;
    pub const MAX_QUERY_LIMIT: u32 = 10_000;
    pub const ALLOWED_PROTOCOLS: &[&str] = &["file", "http", "https"];
}

pub mod search {
    pub const DEBOUNCE_MS: u64 = 300;
    pub const MIN_QUERY_LENGTH: usize = 2;
}

pub mod toast {
    pub const DEFAULT_DURATION_MS: u64 = 5000;
    pub const MAX_VISIBLE: usize = 5;
}

pub mod agent {
    pub const NAME_COPY_SUFFIX: &str = " (Copy)";
    /// Form limits (by convention, not enforced by the store)
    pub const MAX_FORM_NAME_LENGTH: usize = 100;
    pub const MAX_FORM_DESCRIPTION_LENGTH: usize = 500;
    pub const MAX_FORM_MODEL_LENGTH: usize = 100;
}

pub mod runs {
    pub const DEFAULT_LIMIT: u32 = 100;
}

/// Storage keys of the persisted store slices
pub mod storage_keys {
    pub const AGENTS: &str = "ocgui-agents";
    pub const SKILLS: &str = "ocgui-skills";
    pub const CONFIG: &str = "ocgui-config";
    pub const UI: &str = "ocgui-ui";
}
