//! External collaborator seams: the resource provider supplying the raw
//! table text, and the host dictionary consulted by `$$` pass-through
//! values.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::error::Error;

/// Read-only key→string lookup owned by the host application, one namespace
/// per locale. Consulted when a translated value redirects with the `$$`
/// pass-through marker. Lookups are snapshot-free: every rebuild reads the
/// host dictionary fresh.
pub trait HostDictionary {
    fn try_get(&self, locale: &str, key: &str) -> Option<String>;
}

/// Host dictionary that resolves nothing; every pass-through stays verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHostDictionary;

impl HostDictionary for NoHostDictionary {
    fn try_get(&self, _locale: &str, _key: &str) -> Option<String> {
        None
    }
}

/// In-memory host dictionary keyed by (locale, key). Intended for hosts that
/// already materialize their translations, and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapHostDictionary {
    entries: HashMap<(String, String), String>,
}

impl MapHostDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.entries
            .insert((locale.into(), key.into()), value.into());
    }
}

impl HostDictionary for MapHostDictionary {
    fn try_get(&self, locale: &str, key: &str) -> Option<String> {
        self.entries
            .get(&(locale.to_string(), key.to_string()))
            .cloned()
    }
}

/// Supplies the raw translation-table text. One-shot scoped acquisition:
/// open, read fully, release on every exit path.
pub trait ResourceProvider {
    fn read_source(&self) -> Result<String, Error>;
}

/// File-backed provider with BOM-aware decoding (UTF-8 passthrough, BOM-led
/// UTF-8/UTF-16 decoded transparently).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileProvider { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ResourceProvider for FileProvider {
    fn read_source(&self) -> Result<String, Error> {
        let file = File::open(&self.path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
        Ok(decoded)
    }
}

/// Provider serving an in-memory string (embedded resources, tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryProvider {
    text: String,
}

impl MemoryProvider {
    pub fn new(text: impl Into<String>) -> Self {
        MemoryProvider { text: text.into() }
    }
}

impl ResourceProvider for MemoryProvider {
    fn read_source(&self) -> Result<String, Error> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_host_dictionary_always_misses() {
        assert_eq!(NoHostDictionary.try_get("en-US", "Any.Key"), None);
    }

    #[test]
    fn test_map_host_dictionary_scopes_by_locale() {
        let mut host = MapHostDictionary::new();
        host.insert("en-US", "Greeting", "Hello");
        host.insert("fr-FR", "Greeting", "Bonjour");

        assert_eq!(host.try_get("fr-FR", "Greeting").as_deref(), Some("Bonjour"));
        assert_eq!(host.try_get("de-DE", "Greeting"), None);
    }

    #[test]
    fn test_memory_provider_round_trip() {
        let provider = MemoryProvider::new(",en-US\nKey,Value");
        assert_eq!(provider.read_source().unwrap(), ",en-US\nKey,Value");
    }

    #[test]
    fn test_file_provider_reads_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ",en-US\nKey,Café").unwrap();
        let provider = FileProvider::new(file.path());
        assert_eq!(provider.read_source().unwrap(), ",en-US\nKey,Café");
    }

    #[test]
    fn test_file_provider_strips_utf8_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBF,en-US\n").unwrap();
        let provider = FileProvider::new(file.path());
        assert_eq!(provider.read_source().unwrap(), ",en-US\n");
    }

    #[test]
    fn test_file_provider_missing_file_is_io_error() {
        let provider = FileProvider::new("/definitely/not/here.langtable");
        assert!(matches!(
            provider.read_source(),
            Err(crate::error::Error::Io(_))
        ));
    }
}
