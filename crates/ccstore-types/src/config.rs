use std::path::Path;

use crate::description::StoreDescription;
use crate::error::TypeError;

impl StoreDescription {
    /// Parse a description from a TOML document.
    ///
    /// ```toml
    /// name = "scratch"
    /// type = "FS"
    ///
    /// [parameters]
    /// root = "/tmp/ccstore"
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, TypeError> {
        toml::from_str(s).map_err(|e| TypeError::Parse(e.to_string()))
    }

    /// Parse a description from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, TypeError> {
        serde_json::from_str(s).map_err(|e| TypeError::Parse(e.to_string()))
    }

    /// Load a description from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, TypeError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Self::from_toml_str(&std::fs::read_to_string(path)?),
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(TypeError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
