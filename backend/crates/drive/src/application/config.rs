//! Drive routing configuration

/// Seed URL for the default mapping when none is configured
pub const DEFAULT_DRIVE_URL: &str = "https://drive.google.com/drive/folders/default";

#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// Written as the default mapping at startup if no default exists yet
    pub default_drive_url: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            default_drive_url: DEFAULT_DRIVE_URL.to_string(),
        }
    }
}

impl DriveConfig {
    pub fn with_default_url(url: impl Into<String>) -> Self {
        Self {
            default_drive_url: url.into(),
        }
    }
}
