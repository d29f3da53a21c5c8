mod document;
mod recommendation;

pub use document::{Document, DocumentType};
pub use recommendation::Recommendation;
