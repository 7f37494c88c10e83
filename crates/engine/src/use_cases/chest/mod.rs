//! Chest opening pipeline.

pub mod error;
pub mod open_chest;
pub mod roller;

pub use error::ChestError;
pub use open_chest::ChestResolver;
pub use roller::{ChestRoll, RewardRoller};
