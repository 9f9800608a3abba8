//! flashdeck-core — Study-state engine, data model, and persistence.
//!
//! This crate derives the filtered view of a vocabulary catalog, keeps
//! learning progress and group selection durable, and owns the cursor into
//! the view. Catalog sources and the CLI build on top of it.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod registry;
pub mod store;
pub mod traits;
pub mod view;

pub use engine::{CardView, Command, Direction, Snapshot, StudySession, StudyState};
pub use error::{StoreError, StudyError};
pub use model::{LearningStatus, Mark, Progress, VocabularyEntry};
pub use registry::{GroupOption, GroupRegistry};
pub use view::Summary;
