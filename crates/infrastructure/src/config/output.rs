//! Output configuration

use application::{FormatOptions, OutputFormat};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Text output settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Decorate text output with emoji
    #[serde(default = "default_true")]
    pub emoji: bool,

    /// Output format used when none is given on the command line
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            emoji: default_true(),
            format: OutputFormat::default(),
        }
    }
}

impl OutputConfig {
    /// Formatter options for these settings
    #[must_use]
    pub const fn format_options(&self) -> FormatOptions {
        FormatOptions { emoji: self.emoji }
    }
}
