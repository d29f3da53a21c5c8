use crate::domain::{Document, DocumentType};
use crate::infrastructure::store::{DocumentStore, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Student id cannot be empty")]
    EmptyStudentId,

    #[error("Document name cannot be empty")]
    EmptyName,

    #[error("File content cannot be empty")]
    EmptyContent,

    #[error("Document not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The document registry for student applications.
///
/// Holds the single in-memory store instance for the process. Operations
/// are asynchronous in contract; calls are atomic at the granularity of
/// one operation, and state lives only as long as the process.
pub struct DocumentRegistry {
    store: Box<dyn DocumentStore>,
}

impl DocumentRegistry {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All documents uploaded for a student, in upload order. Total;
    /// an unknown student id yields an empty listing.
    pub async fn list_by_student(&self, student_id: &str) -> Result<Vec<Document>, RegistryError> {
        Ok(self.store.list_by_student(student_id)?)
    }

    /// Store an uploaded file and return its new record.
    ///
    /// Assigns a fresh id and timestamp and mints the `file_url` locator.
    /// The locator resolves through [`DocumentRegistry::fetch_file`] only,
    /// and only for the lifetime of this registry.
    pub async fn upload(
        &self,
        student_id: &str,
        name: &str,
        doc_type: DocumentType,
        content: &[u8],
    ) -> Result<Document, RegistryError> {
        // Validate inputs
        if student_id.trim().is_empty() {
            return Err(RegistryError::EmptyStudentId);
        }

        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        if content.is_empty() {
            return Err(RegistryError::EmptyContent);
        }

        let document = Document::new(student_id, name, doc_type);

        self.store.save_document(&document, content)?;

        Ok(document)
    }

    /// Delete a document. Absent ids succeed silently; callers cannot
    /// observe whether anything was deleted.
    pub async fn remove(&self, document_id: &str) -> Result<(), RegistryError> {
        Ok(self.store.delete_document(document_id)?)
    }

    /// Mark a document as verified and return the updated record.
    ///
    /// The flag only ever moves from unverified to verified, so repeated
    /// calls are harmless. Fails with `NotFound` for an unknown id and
    /// leaves the registry untouched in that case.
    pub async fn verify(&self, document_id: &str) -> Result<Document, RegistryError> {
        let mut document = match self.store.find_by_id(document_id)? {
            Some(doc) => doc,
            None => return Err(RegistryError::NotFound),
        };

        self.store.set_verified(&document.id)?;
        document.verified = true;

        Ok(document)
    }

    /// Resolve a `file_url` locator minted by [`DocumentRegistry::upload`].
    pub async fn fetch_file(&self, file_url: &str) -> Result<Vec<u8>, RegistryError> {
        self.store
            .load_content(file_url)?
            .ok_or(RegistryError::NotFound)
    }
}
