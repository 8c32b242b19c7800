//! Collection registry contract
//!
//! Leaf validators hold only a pool name (`item`, `block`, `$tag/item`, ...)
//! and resolve membership through a [`Collections`] source at validation
//! time. Pools prefixed with `$` are backed by whatever data pack is loaded;
//! a pool the source does not know is treated as "not loaded" and accepts
//! any identifier.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Declared block-state properties of one block: property name -> values
pub type BlockProperties = BTreeMap<String, Vec<String>>;

/// Read-only source of identifier pools
pub trait Collections: Send + Sync {
    /// Identifiers of a pool, in declaration order
    fn get(&self, pool: &str) -> Option<&[String]>;

    /// Whether `id` is a member of `pool`
    fn has(&self, pool: &str, id: &str) -> bool {
        self.get(pool)
            .is_some_and(|ids| ids.iter().any(|candidate| candidate == id))
    }

    /// Whether the pool is loaded with at least one id
    ///
    /// An empty pool counts as not loaded, so membership is not checked.
    fn knows(&self, pool: &str) -> bool {
        self.get(pool).is_some_and(|ids| !ids.is_empty())
    }

    /// Declared state properties of a block, when known
    fn block_properties(&self, _block: &str) -> Option<&BlockProperties> {
        None
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
struct Pool {
    ids: Vec<String>,
    index: HashSet<String>,
}

impl From<Vec<String>> for Pool {
    fn from(ids: Vec<String>) -> Self {
        let mut pool = Pool::default();
        for id in ids {
            pool.insert(id);
        }
        pool
    }
}

impl From<Pool> for Vec<String> {
    fn from(pool: Pool) -> Self {
        pool.ids
    }
}

impl Pool {
    fn insert(&mut self, id: String) {
        if self.index.insert(id.clone()) {
            self.ids.push(id);
        }
    }
}

/// In-memory [`Collections`] populated once at startup
///
/// Deserializes from documents shaped like
/// `{ "pools": { "block": ["minecraft:stone"] }, "blocks": { "minecraft:furnace": { "lit": ["true", "false"] } } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionRegistry {
    pools: HashMap<String, Pool>,
    blocks: HashMap<String, BlockProperties>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add identifiers to a pool, creating it if needed; duplicates are ignored
    pub fn register<I, S>(&mut self, pool: &str, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.pools.entry(pool.to_string()).or_default();
        for id in ids {
            entry.insert(id.into());
        }
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_pool<I, S>(mut self, pool: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register(pool, ids);
        self
    }

    /// Declare the state properties of a block
    pub fn register_block(&mut self, block: &str, properties: BlockProperties) {
        self.blocks.insert(block.to_string(), properties);
    }

    pub fn with_block<P, V>(mut self, block: &str, properties: P) -> Self
    where
        P: IntoIterator<Item = (&'static str, V)>,
        V: IntoIterator<Item = &'static str>,
    {
        let properties = properties
            .into_iter()
            .map(|(name, values)| {
                (
                    name.to_string(),
                    values.into_iter().map(str::to_string).collect(),
                )
            })
            .collect();
        self.register_block(block, properties);
        self
    }

    /// Names of all loaded pools
    pub fn pools(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }
}

impl Collections for CollectionRegistry {
    fn get(&self, pool: &str) -> Option<&[String]> {
        self.pools.get(pool).map(|p| p.ids.as_slice())
    }

    fn has(&self, pool: &str, id: &str) -> bool {
        self.pools.get(pool).is_some_and(|p| p.index.contains(id))
    }

    fn block_properties(&self, block: &str) -> Option<&BlockProperties> {
        self.blocks.get(block)
    }
}
