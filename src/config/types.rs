use dumpindex_ffindex::DecodeOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub decode: DecodeOptions,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Print JSON on a single line instead of indenting it
    #[serde(default)]
    pub compact: bool,

    /// Spaces per indentation level for JSON output
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Track used by the per-track views
    #[serde(default)]
    pub track: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            compact: false,
            indent: default_indent(),
            track: 0,
        }
    }
}

fn default_indent() -> usize {
    4
}
