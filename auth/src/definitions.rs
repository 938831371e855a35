//! Profile definition parsing.
//!
//! The definition file is an XML document with a root container of named
//! profile entries, each carrying a protocol attribute and zero or more
//! name/value parameter entries:
//!
//! ```xml
//! <configs>
//!   <config name="my-rdp-server" protocol="rdp">
//!     <param name="hostname" value="my-rdp-server-hostname" />
//!     <param name="port" value="3389" />
//!   </config>
//! </configs>
//! ```

use crate::errors::DefinitionError;
use crate::types::{ConnectionProfile, Parameter, ProfileMap};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Deserialize)]
struct ConfigsDoc {
    #[serde(rename = "config", default)]
    configs: Vec<ConfigEntry>,
}

#[derive(Debug, Deserialize)]
struct ConfigEntry {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@protocol")]
    protocol: String,
    #[serde(rename = "param", default)]
    params: Vec<ParamEntry>,
}

#[derive(Debug, Deserialize)]
struct ParamEntry {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@value")]
    value: String,
}

/// Parses a definition document into a profile map.
///
/// Parameter order within each profile is preserved. Duplicate profile
/// identifiers follow map-building semantics: the last entry wins.
pub fn parse_definitions(xml: &str, path: &Path) -> Result<ProfileMap, DefinitionError> {
    let doc: ConfigsDoc =
        quick_xml::de::from_str(xml).map_err(|source| DefinitionError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut profiles = ProfileMap::new();
    for entry in doc.configs {
        let mut profile = ConnectionProfile::new(entry.protocol);
        for param in entry.params {
            profile
                .parameters
                .push(Parameter::new(param.name, param.value));
        }
        profiles.insert(entry.name, profile);
    }
    Ok(profiles)
}

/// A readable source of profile definitions.
///
/// File-backed in production; test doubles drive the cache's staleness
/// behavior without touching the file system.
pub trait DefinitionSource: Send + Sync {
    /// Last modification time of the definition document.
    fn modified(&self) -> Result<SystemTime, DefinitionError>;

    /// Reads the definition document.
    fn read(&self) -> Result<String, DefinitionError>;

    /// Path used in log and error messages.
    fn path(&self) -> &Path;
}

/// Definition source backed by a file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> DefinitionError {
        DefinitionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DefinitionSource for FileSource {
    fn modified(&self) -> Result<SystemTime, DefinitionError> {
        let metadata = std::fs::metadata(&self.path).map_err(|e| self.io_error(e))?;
        metadata.modified().map_err(|e| self.io_error(e))
    }

    fn read(&self) -> Result<String, DefinitionError> {
        std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
