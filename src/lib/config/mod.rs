use std::env;

// Directories under the application root that bare asset names resolve into.
pub const IMAGES_DIR: &str = "images";
pub const JAVASCRIPTS_DIR: &str = "javascripts";
pub const STYLESHEETS_DIR: &str = "stylesheets";

pub const JAVASCRIPT_EXT: &str = "js";
pub const STYLESHEET_EXT: &str = "css";
pub const DEFAULT_STYLESHEET_MEDIA: &str = "screen";

/// Environment variable holding the path the application is mounted under.
pub const SCRIPT_NAME_VAR: &str = "SCRIPT_NAME";

// Pager defaults.
pub const PAGER_FORMAT: &str = "~2~";
pub const PAGER_LINK_VAR: &str = "page";
pub const PAGER_ITEMS_PER_PAGE: usize = 20;

/// strftime format used by `ModelTags::date` unless overridden.
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Where the application lives, for computing public asset paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetContext {
    pub script_name: String,
}

impl AssetContext {
    /// An application mounted at `script_name` (e.g. `/blog`).
    pub fn new(script_name: impl Into<String>) -> Self {
        let script_name = script_name.into();
        Self {
            script_name: script_name.trim_end_matches('/').to_string(),
        }
    }

    /// Read the mount path from `SCRIPT_NAME`, defaulting to the root.
    pub fn from_env() -> Self {
        env::var(SCRIPT_NAME_VAR)
            .map(Self::new)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
