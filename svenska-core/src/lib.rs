//! svenska-core: the quiz session engine.
//!
//! Strategies turn vocabulary into questions and grade answers, the
//! [`QuizManager`] walks the question sequence, and the two controllers
//! publish observable session states for a UI to render.

pub mod classification;
pub mod compare;
pub mod errors;
pub mod input;
pub mod manager;
pub mod models;
pub mod question;
pub mod random;
pub mod repo;
pub mod session;
pub mod strategy;

pub use classification::*;
pub use compare::*;
pub use errors::*;
pub use input::*;
pub use manager::*;
pub use models::*;
pub use question::*;
pub use random::*;
pub use repo::memory::{MemorySessionStore, MemoryVocabularyRepo};
pub use repo::{FavoriteToggleService, SessionStore, VocabularySource, WithEndingsOnly};
pub use session::*;
pub use strategy::*;
