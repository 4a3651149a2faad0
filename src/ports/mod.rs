//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionClient` - the remote text-generation capability
//! - `ProfileStore` - persistence of the local user profile

mod completion;
mod profile_store;

pub use completion::{
    CompletionClient, CompletionFailure, CompletionRequest, CompletionResult, ProviderInfo,
};
pub use profile_store::{ProfileStore, ProfileStoreError};
