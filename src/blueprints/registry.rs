//! In-memory blueprint store.
//!
//! `InMemoryBlueprintStore` keeps every blueprint in a map keyed by
//! `(author, name)`, plus an author index so author-scoped queries never scan
//! the whole map. A single lock guards both, so the index can never disagree
//! with the map, and a duplicate check and its insert happen under one guard.

use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

use super::persistence::BlueprintPersistence;
use super::schema::{Blueprint, BlueprintKey, SeedFile};
use super::seed::default_seed;
use crate::core::config::StoreConfig;
use crate::core::error::{Result, StoreError};

#[derive(Debug, Default)]
struct StoreState {
    /// Blueprints indexed by composite key
    blueprints: AHashMap<BlueprintKey, Blueprint>,
    /// Author -> names, for author-scoped queries
    by_author: AHashMap<String, AHashSet<String>>,
}

impl StoreState {
    fn insert(&mut self, blueprint: Blueprint) -> Result<()> {
        let key = blueprint.key();
        if self.blueprints.contains_key(&key) {
            return Err(StoreError::AlreadyExists(blueprint.to_string()));
        }

        self.by_author
            .entry(key.author.clone())
            .or_default()
            .insert(key.name.clone());
        self.blueprints.insert(key, blueprint);
        Ok(())
    }
}

/// Thread-safe in-memory blueprint repository
#[derive(Debug, Default)]
pub struct InMemoryBlueprintStore {
    state: RwLock<StoreState>,
}

impl InMemoryBlueprintStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the built-in sample blueprints
    pub fn with_default_seed() -> Self {
        let store = Self::new();
        {
            let mut state = store.state.write();
            for blueprint in default_seed() {
                // Sample keys are distinct, so this cannot collide on an empty store
                let _ = state.insert(blueprint);
            }
        }
        tracing::info!("Seeded store with {} sample blueprints", store.len());
        store
    }

    /// Build a store from configuration: samples first, then seed paths in order
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        let store = if config.seed_defaults {
            Self::with_default_seed()
        } else {
            Self::new()
        };

        for path in &config.seed_paths {
            if path.is_dir() {
                store.load_directory(path)?;
            } else {
                store.load_file(path)?;
            }
        }

        tracing::info!("Store ready with {} blueprints", store.len());
        Ok(store)
    }

    /// Import every blueprint from a TOML seed file, returning how many were saved.
    ///
    /// Records before the first failing one stay in the store.
    pub fn load_file(&self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)?;
        let file: SeedFile = toml::from_str(&content)
            .map_err(|e| StoreError::Parse(format!("{}: {}", path.display(), e)))?;

        let count = file.blueprints.len();
        for blueprint in file.blueprints {
            self.save(blueprint)?;
        }

        tracing::info!("Loaded {} blueprints from {}", count, path.display());
        Ok(count)
    }

    /// Load all .toml files from a directory recursively, in path order
    pub fn load_directory(&self, path: &Path) -> Result<usize> {
        let mut files = Vec::new();
        collect_toml_files(path, &mut files)?;
        files.sort();

        let mut total = 0;
        for file in &files {
            total += self.load_file(file)?;
        }
        Ok(total)
    }

    /// Check whether a blueprint is stored under `(author, name)`
    pub fn contains(&self, author: &str, name: &str) -> bool {
        self.state
            .read()
            .by_author
            .get(author)
            .map_or(false, |names| names.contains(name))
    }

    /// Distinct authors, sorted
    pub fn authors(&self) -> Vec<String> {
        let mut authors: Vec<String> = self.state.read().by_author.keys().cloned().collect();
        authors.sort();
        authors
    }

    /// Number of stored blueprints
    pub fn len(&self) -> usize {
        self.state.read().blueprints.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.state.read().blueprints.is_empty()
    }
}

impl BlueprintPersistence for InMemoryBlueprintStore {
    fn save(&self, blueprint: Blueprint) -> Result<()> {
        if blueprint.author().is_empty() || blueprint.name().is_empty() {
            return Err(StoreError::InvalidBlueprint(format!(
                "author and name must be non-empty: {}",
                blueprint
            )));
        }

        let key = blueprint.key();
        match self.state.write().insert(blueprint) {
            Ok(()) => {
                tracing::debug!("Saved blueprint {}", key);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Rejected duplicate blueprint {}", key);
                Err(e)
            }
        }
    }

    fn get(&self, author: &str, name: &str) -> Result<Blueprint> {
        let key = BlueprintKey::new(author, name);
        let found = self.state.read().blueprints.get(&key).cloned();
        found.ok_or_else(|| {
            tracing::debug!("Blueprint lookup missed {}", key);
            StoreError::BlueprintNotFound {
                author: key.author,
                name: key.name,
            }
        })
    }

    fn get_all(&self) -> AHashSet<Blueprint> {
        self.state.read().blueprints.values().cloned().collect()
    }

    fn get_by_author(&self, author: &str) -> Result<AHashSet<Blueprint>> {
        let state = self.state.read();
        let result: AHashSet<Blueprint> = state
            .by_author
            .get(author)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| {
                        state
                            .blueprints
                            .get(&BlueprintKey::new(author, name.as_str()))
                            .cloned()
                    })
                    .collect()
            })
            .unwrap_or_default();

        if result.is_empty() {
            tracing::debug!("No blueprints for author {}", author);
            return Err(StoreError::AuthorNotFound(author.to_string()));
        }
        Ok(result)
    }
}

fn collect_toml_files(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let entry_path = entry.path();

        if entry_path.is_dir() {
            collect_toml_files(&entry_path, files)?;
        } else if entry_path.extension().map_or(false, |ext| ext == "toml") {
            files.push(entry_path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprints::schema::Point;

    fn sorted_names(set: &AHashSet<Blueprint>) -> Vec<String> {
        let mut names: Vec<String> = set.iter().map(|bp| bp.name().to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_save_and_get() {
        let store = InMemoryBlueprintStore::new();
        store
            .save(Blueprint::new("Ana", "House", vec![Point::new(1, 1)]))
            .unwrap();

        let bp = store.get("Ana", "House").unwrap();
        assert_eq!(bp.author(), "Ana");
        assert_eq!(bp.points(), &[Point::new(1, 1)]);
        assert!(store.contains("Ana", "House"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected_without_overwrite() {
        let store = InMemoryBlueprintStore::new();
        store
            .save(Blueprint::new("Ana", "House", vec![Point::new(1, 1)]))
            .unwrap();

        let err = store
            .save(Blueprint::new("Ana", "House", vec![Point::new(7, 7)]))
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert!(err.to_string().contains("author=Ana"));

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("Ana", "House").unwrap().points(),
            &[Point::new(1, 1)]
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let store = InMemoryBlueprintStore::new();
        assert!(matches!(
            store.save(Blueprint::new("", "House", vec![])),
            Err(StoreError::InvalidBlueprint(_))
        ));
        assert!(matches!(
            store.save(Blueprint::new("Ana", "", vec![])),
            Err(StoreError::InvalidBlueprint(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_miss_is_not_found() {
        let store = InMemoryBlueprintStore::with_default_seed();
        match store.get("Sebastian", "Plano9") {
            Err(StoreError::BlueprintNotFound { author, name }) => {
                assert_eq!(author, "Sebastian");
                assert_eq!(name, "Plano9");
            }
            other => panic!("expected BlueprintNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_default_seed_contents() {
        let store = InMemoryBlueprintStore::with_default_seed();
        assert_eq!(store.get_all().len(), 4);

        let sebastian = store.get_by_author("Sebastian").unwrap();
        assert_eq!(sorted_names(&sebastian), vec!["Plano1", "Plano2"]);

        assert!(store.get("_authorname_", "_bpname_ ").is_ok());
        assert!(store.get("_authorname_", "_bpname_").is_err());
        assert_eq!(
            store.get("Vegueta", "Plano3").unwrap().points(),
            &[Point::new(100, 50), Point::new(120, 80), Point::new(140, 100)]
        );
    }

    #[test]
    fn test_get_by_author_exact_match() {
        let store = InMemoryBlueprintStore::with_default_seed();
        assert!(matches!(
            store.get_by_author("sebastian"),
            Err(StoreError::AuthorNotFound(_))
        ));
        assert!(matches!(
            store.get_by_author("Ana"),
            Err(StoreError::AuthorNotFound(_))
        ));
    }

    #[test]
    fn test_authors_sorted() {
        let store = InMemoryBlueprintStore::with_default_seed();
        assert_eq!(
            store.authors(),
            vec!["Sebastian", "Vegueta", "_authorname_"]
        );
    }

    #[test]
    fn test_from_config_without_samples() {
        let config = StoreConfig {
            seed_defaults: false,
            ..StoreConfig::default()
        };
        let store = InMemoryBlueprintStore::from_config(&config).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.toml");
        std::fs::write(
            &path,
            r#"
[[blueprints]]
author = "Ana"
name = "House"
points = [{ x = 1, y = 1 }]
"#,
        )
        .unwrap();

        let store = InMemoryBlueprintStore::with_default_seed();
        assert_eq!(store.load_file(&path).unwrap(), 1);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_load_file_parse_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[[blueprints]]\nauthor = 3\n").unwrap();

        let store = InMemoryBlueprintStore::new();
        match store.load_file(&path) {
            Err(StoreError::Parse(msg)) => assert!(msg.contains("broken.toml")),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_directory_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            dir.path().join("a.toml"),
            "[[blueprints]]\nauthor = \"Ana\"\nname = \"A\"\n",
        )
        .unwrap();
        std::fs::write(
            nested.join("b.toml"),
            "[[blueprints]]\nauthor = \"Ana\"\nname = \"B\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = InMemoryBlueprintStore::new();
        assert_eq!(store.load_directory(dir.path()).unwrap(), 2);
        assert_eq!(
            sorted_names(&store.get_by_author("Ana").unwrap()),
            vec!["A", "B"]
        );
    }
}
