//! The fixed level catalog.
//!
//! Levels are indexed by id. Some words repeat under different ids with
//! different clues; the data is kept as shipped.

use log::debug;
use std::slice;
use thiserror::Error;

use super::entities::{LevelDefinition, LevelId};

#[derive(Debug, Eq, Error, PartialEq)]
pub enum CatalogError {
    #[error("catalog has no levels")]
    Empty,
    #[error("level at index {index} has id {id}")]
    IdMismatch { index: usize, id: LevelId },
    #[error("level {id} has an invalid word {word:?} (need uppercase A-Z)")]
    InvalidWord { id: LevelId, word: String },
}

pub const STANDARD_LEVELS: [LevelDefinition; 50] = [
    LevelDefinition::new(0, "CAT", "Who says 'meow'?"),
    LevelDefinition::new(1, "DOG", "Man's best friend."),
    LevelDefinition::new(2, "BIRD", "It flies and sings in the trees."),
    LevelDefinition::new(3, "TREE", "It grows in the forest and has leaves and branches."),
    LevelDefinition::new(4, "BOOK", "It has many pages and stories inside."),
    LevelDefinition::new(5, "APPLE", "A red or green fruit that falls from a tree."),
    LevelDefinition::new(6, "HOUSE", "People live in it."),
    LevelDefinition::new(7, "GARDEN", "A place where flowers and vegetables grow."),
    LevelDefinition::new(8, "PENCIL", "You write or draw with it, and you can erase it."),
    LevelDefinition::new(9, "TIGER", "A big striped cat from the jungle."),
    LevelDefinition::new(10, "MONKEY", "Loves bananas and climbs trees."),
    LevelDefinition::new(11, "ELEPHANT", "The largest land animal with a trunk."),
    LevelDefinition::new(12, "COMPUTER", "An electronic device for work and play."),
    LevelDefinition::new(13, "MOUNTAIN", "A very high part of the earth, hard to climb."),
    LevelDefinition::new(14, "RAINBOW", "Appears in the sky after rain and has many colors."),
    LevelDefinition::new(15, "BANANA", "A long yellow fruit, monkeys love it."),
    LevelDefinition::new(16, "CAR", "You drive it on the road."),
    LevelDefinition::new(17, "FISH", "Lives in water and swims."),
    LevelDefinition::new(18, "SUN", "The star at the center of our solar system."),
    LevelDefinition::new(19, "MOON", "It shines at night and orbits the Earth."),
    LevelDefinition::new(20, "CHAIR", "You sit on it."),
    LevelDefinition::new(21, "TABLE", "You eat or work at it."),
    LevelDefinition::new(22, "PHONE", "You use it to call and text people."),
    LevelDefinition::new(23, "WATCH", "You wear it on your wrist to tell time."),
    LevelDefinition::new(24, "SHOE", "You wear it on your foot."),
    LevelDefinition::new(25, "BREAD", "You eat it, often with butter or jam."),
    LevelDefinition::new(26, "PLANE", "It flies in the sky and carries people."),
    LevelDefinition::new(27, "DOOR", "You open and close it to enter a room."),
    LevelDefinition::new(28, "CLOUD", "White and fluffy, floats in the sky."),
    LevelDefinition::new(29, "STAR", "A bright point of light in the night sky."),
    LevelDefinition::new(30, "RIVER", "A long stream of water that flows to the sea."),
    LevelDefinition::new(31, "HORSE", "A strong animal you can ride."),
    LevelDefinition::new(32, "BREAD", "A basic food, often used for sandwiches."),
    LevelDefinition::new(33, "CANDLE", "It gives light when you light it."),
    LevelDefinition::new(34, "PILLOW", "You rest your head on it when you sleep."),
    LevelDefinition::new(35, "SNAKE", "A long, legless reptile."),
    LevelDefinition::new(36, "FROG", "A green animal that jumps and croaks."),
    LevelDefinition::new(37, "SPOON", "You use it to eat soup."),
    LevelDefinition::new(38, "TRAIN", "A long vehicle that runs on tracks."),
    LevelDefinition::new(39, "CROWN", "A king or queen wears it on their head."),
    LevelDefinition::new(40, "BEE", "A small insect that makes honey."),
    LevelDefinition::new(41, "LION", "The king of the jungle."),
    LevelDefinition::new(42, "SHEEP", "A farm animal with wool."),
    LevelDefinition::new(43, "DUCK", "A bird that swims and quacks."),
    LevelDefinition::new(44, "LEMON", "A sour yellow fruit."),
    LevelDefinition::new(45, "CHAIR", "You sit on it."),
    LevelDefinition::new(46, "BREAD", "A basic food, often used for sandwiches."),
    LevelDefinition::new(47, "CUP", "You drink tea or coffee from it."),
    LevelDefinition::new(48, "PIZZA", "A popular Italian dish with cheese and tomato."),
    LevelDefinition::new(49, "ROBOT", "A machine that can do tasks automatically."),
];

/// Ordered, validated list of levels.
#[derive(Clone, Debug)]
pub struct Catalog {
    levels: Vec<LevelDefinition>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// The 50 built-in levels.
    pub fn standard() -> Self {
        Self {
            levels: STANDARD_LEVELS.to_vec(),
        }
    }

    /// Builds a catalog from custom levels. Ids must match positions and
    /// words must be non-empty uppercase ASCII.
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, level) in levels.iter().enumerate() {
            if level.id != index {
                return Err(CatalogError::IdMismatch {
                    index,
                    id: level.id,
                });
            }

            if level.word.is_empty() || !level.word.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(CatalogError::InvalidWord {
                    id: level.id,
                    word: level.word.to_string(),
                });
            }
        }

        debug!("Loaded catalog with {} levels", levels.len());
        Ok(Self { levels })
    }

    pub fn get(&self, id: LevelId) -> Option<&LevelDefinition> {
        self.levels.get(id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }

    pub fn iter(&self) -> slice::Iter<'_, LevelDefinition> {
        self.levels.iter()
    }
}
