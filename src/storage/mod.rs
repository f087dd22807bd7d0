//! File system storage management
//!
//! Confines every file operation to one storage root: path resolution,
//! file naming, the operations themselves and the listing projection.

pub mod filesystem;
pub mod naming;
pub mod operations;
pub mod results;
pub mod validation;

pub use naming::{inherit_extension, normalize_filename};
pub use operations::FileStore;
pub use results::{Entry, RenameResult, RetrieveResult, StoreResult};
pub use validation::{resolve_path, resolve_target};
