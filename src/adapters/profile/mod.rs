//! Profile store adapters.

mod file_store;
mod in_memory;

pub use file_store::FileProfileStore;
pub use in_memory::InMemoryProfileStore;
