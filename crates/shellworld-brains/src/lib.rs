//! Reference policies for Shellworld shells.
//!
//! - [`RandomWalker`] -- turns a quarter left or right, then steps.
//! - [`HunterCritter`] -- courts its own kind with a mating call, eats
//!   anything else within reach, and chases or wanders otherwise.
//! - [`CoinSeeker`] -- heads for the nearest coin and mines it.
//!
//! Every policy draws randomness from the world's seeded generator via
//! [`PolicyContext`](shellworld_core::PolicyContext), so runs replay.

pub mod hunter;
pub mod seeker;
pub mod steering;
pub mod walker;

pub use hunter::{HunterCritter, MatingCall};
pub use seeker::CoinSeeker;
pub use walker::RandomWalker;
