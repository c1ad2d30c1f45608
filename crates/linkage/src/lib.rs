//! `twinmap-linkage`: links a paper's twin-pair roster to the user registry.
//!
//! Pure engine crate: parses CSV text, joins on hashed identifiers, reshapes,
//! and renders CSV into any writer. No filesystem access.

pub mod config;
pub mod engine;
pub mod error;
pub mod hash;
pub mod join;
pub mod load;
pub mod model;
pub mod reshape;
pub mod summary;
pub mod write;

pub use config::LinkageConfig;
pub use engine::run;
pub use error::LinkageError;
pub use model::{LinkageInput, LinkageOutput, LinkageSummary, LongRow, PaperEntry, UserRecord, WideRow};
