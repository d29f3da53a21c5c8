pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{DocumentRegistry, RegistryError};
pub use domain::{Document, DocumentType, Recommendation};
pub use infrastructure::store::{DocumentStore, SqliteStore};
