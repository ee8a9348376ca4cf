//! Game registry: catalog metadata and variant construction.
//!
//! The registry maps a [`GameId`] to its catalog entry (category, level and
//! life counts) and a factory for the rules implementor. Sessions resolve
//! their variant here instead of matching on the id, so the catalog stays
//! one table.

use rustc_hash::FxHashMap;

use crate::core::{Category, GameId};

use super::arithmetic::ArithmeticGame;
use super::memory_pairs::MemoryPairsGame;
use super::sequence_recall::SequenceRecallGame;
use super::stroop::StroopGame;
use super::GameRules;

/// Catalog entry for one game.
#[derive(Clone)]
pub struct GameEntry {
    /// Game this entry describes.
    pub id: GameId,
    /// Catalog grouping stamped into results.
    pub category: Category,
    /// Number of levels.
    pub max_level: u32,
    /// Starting lives.
    pub max_lives: u32,
    factory: fn() -> Box<dyn GameRules>,
}

impl GameEntry {
    /// Create an entry.
    #[must_use]
    pub fn new(
        id: GameId,
        category: Category,
        max_level: u32,
        max_lives: u32,
        factory: fn() -> Box<dyn GameRules>,
    ) -> Self {
        Self {
            id,
            category,
            max_level,
            max_lives,
            factory,
        }
    }

    /// Construct the rules implementor for this game.
    #[must_use]
    pub fn create(&self) -> Box<dyn GameRules> {
        (self.factory)()
    }
}

/// Registry of playable games.
///
/// ## Example
///
/// ```
/// use brainplay::games::GameRegistry;
/// use brainplay::GameId;
///
/// let registry = GameRegistry::standard();
/// let entry = registry.get(GameId::Arithmetic).unwrap();
/// assert_eq!(entry.max_level, 10);
/// ```
#[derive(Clone, Default)]
pub struct GameRegistry {
    entries: FxHashMap<GameId, GameEntry>,
}

impl GameRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The four shipped games.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(GameEntry::new(GameId::Arithmetic, Category::Math, 10, 3, || {
            Box::new(ArithmeticGame::new())
        }));
        registry.register(GameEntry::new(GameId::Stroop, Category::Attention, 10, 3, || {
            Box::new(StroopGame::new())
        }));
        registry.register(GameEntry::new(GameId::MemoryPairs, Category::Memory, 8, 3, || {
            Box::new(MemoryPairsGame::new())
        }));
        registry.register(GameEntry::new(
            GameId::SequenceRecall,
            Category::Memory,
            10,
            3,
            || Box::new(SequenceRecallGame::new()),
        ));
        registry
    }

    /// Register an entry, replacing any existing entry for the same id.
    pub fn register(&mut self, entry: GameEntry) {
        self.entries.insert(entry.id, entry);
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, id: GameId) -> Option<&GameEntry> {
        self.entries.get(&id)
    }

    /// Whether an id is registered.
    #[must_use]
    pub fn contains(&self, id: GameId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of registered games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the catalog.
    pub fn iter(&self) -> impl Iterator<Item = &GameEntry> {
        self.entries.values()
    }
}
