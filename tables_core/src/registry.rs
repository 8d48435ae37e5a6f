use crate::archetype::ArchetypeTable;
use crate::config::ArchetypeFileConfig;
use crate::ConfigError;
use kit_types::ArchetypeKey;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Registry of all archetype tables, loaded from TOML files
#[derive(Debug, Default)]
pub struct ArchetypeRegistry {
    tables: HashMap<ArchetypeKey, ArchetypeTable>,
    names: HashMap<String, ArchetypeKey>,
}

impl ArchetypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all archetype tables from a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_dir(dir)?;
        tracing::info!(
            count = registry.len(),
            dir = %dir.display(),
            "loaded archetype tables"
        );
        Ok(registry)
    }

    /// Load tables from a directory recursively
    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        // Sorted so duplicate-key errors name the same file on every platform
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            paths.push(entry.path());
        }
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    /// Load a single archetype file
    fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        self.insert_str(&content, path)
    }

    /// Parse one archetype table from TOML text and register it.
    ///
    /// `origin` is only used in error messages.
    pub fn insert_str(
        &mut self,
        content: &str,
        origin: impl Into<PathBuf>,
    ) -> Result<(), ConfigError> {
        let origin = origin.into();
        let config: ArchetypeFileConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse {
                error: e,
                path: origin.clone(),
            })?;

        let table = ArchetypeTable::from_config(config).map_err(|message| {
            ConfigError::Validation {
                message,
                path: origin.clone(),
            }
        })?;

        self.insert(table).map_err(|message| ConfigError::Validation {
            message,
            path: origin,
        })
    }

    /// Register an already-built table; keys and names must be unique
    pub fn insert(&mut self, table: ArchetypeTable) -> Result<(), String> {
        if self.tables.contains_key(&table.key) {
            return Err(format!("duplicate archetype key {}", table.key));
        }
        if self.names.contains_key(&table.name) {
            return Err(format!("duplicate archetype name '{}'", table.name));
        }
        self.names.insert(table.name.clone(), table.key);
        self.tables.insert(table.key, table);
        Ok(())
    }

    /// Get a table by key
    pub fn get(&self, key: &ArchetypeKey) -> Option<&ArchetypeTable> {
        self.tables.get(key)
    }

    /// Get a table by its configured name
    pub fn get_by_name(&self, name: &str) -> Option<&ArchetypeTable> {
        self.names.get(name).and_then(|key| self.tables.get(key))
    }

    /// Check if an archetype exists
    pub fn contains(&self, key: &ArchetypeKey) -> bool {
        self.tables.contains_key(key)
    }

    /// List all archetype keys
    pub fn keys(&self) -> impl Iterator<Item = &ArchetypeKey> {
        self.tables.keys()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
