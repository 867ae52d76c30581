use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::index::{keywords, KeywordIndex};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
}

/// Products plus a keyword index over their names.
#[derive(Debug, Default)]
pub struct Catalog {
    items: Vec<Item>,
    index: KeywordIndex,
}

impl Catalog {
    pub async fn load(path: &Path) -> Result<Catalog, CatalogError> {
        let raw = tokio::fs::read(path).await.map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let items: Vec<Item> = serde_json::from_slice(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Catalog::from_items(items);
        info!(
            "loaded {} items with {} keywords from {:?}",
            catalog.len(),
            catalog.index.len(),
            path
        );
        Ok(catalog)
    }

    pub fn from_items(items: Vec<Item>) -> Catalog {
        let mut index = KeywordIndex::default();
        for (position, item) in items.iter().enumerate() {
            for keyword in keywords(&item.name) {
                index.insert(keyword, position);
            }
        }
        Catalog { items, index }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn keyword_positions(&self, word: &str) -> BTreeSet<usize> {
        let word = word.to_lowercase();
        self.index.prefixed(&word).collect()
    }

    fn collect(&self, positions: BTreeSet<usize>) -> Vec<Item> {
        let mut items: Vec<Item> = positions
            .into_iter()
            .map(|position| self.items[position].clone())
            .collect();
        items.sort_by_key(|item| item.id);
        items
    }

    /// Items with at least one keyword starting with `word`.
    pub fn query_keyword(&self, word: &str) -> Vec<Item> {
        self.collect(self.keyword_positions(word))
    }

    /// Items matching any of the space separated words.
    pub fn query_any(&self, query: &str) -> Vec<Item> {
        let positions = query
            .split(' ')
            .flat_map(|word| self.keyword_positions(word))
            .collect();
        self.collect(positions)
    }

    /// Items matching every space separated word.
    pub fn query_all(&self, query: &str) -> Vec<Item> {
        let mut matching: Option<BTreeSet<usize>> = None;
        for word in query.split(' ') {
            let current = self.keyword_positions(word);
            matching = Some(match matching {
                None => current,
                Some(previous) => previous.intersection(&current).copied().collect(),
            });
        }
        let matching = matching.unwrap_or_default();
        debug!("{} items match all of {:?}", matching.len(), query);
        self.collect(matching)
    }
}
