/// Core functionality modules
///
/// Contains the search engine runner, the mtime fallback, and the note and
/// task pipelines built on top of them.

pub mod executor;
pub mod fallback;
pub mod notes;
pub mod tasks;

pub use executor::{SearchExecutor, SearchFlag};
pub use notes::NoteSearch;
pub use tasks::{TaskRecord, TaskSearch};
