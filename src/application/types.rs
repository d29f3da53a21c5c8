use crate::domain::{Document, DocumentType, Recommendation};
use serde::{Deserialize, Serialize};

/// Request to upload a document for a student's application
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadRequest {
    pub student_id: String,
    /// Display label shown in the document list
    pub name: String,
    pub doc_type: DocumentType,
    /// Base64-encoded file content
    pub content: String,
}

/// Request to list a student's documents
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListRequest {
    pub student_id: String,
}

/// Request to delete a document by id
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoveRequest {
    pub document_id: String,
}

/// Request to mark a document as verified
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyRequest {
    pub document_id: String,
}

/// Request to resolve a file locator minted by an upload
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchRequest {
    pub file_url: String,
}

/// Action envelope the portal pages post to the service
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PortalAction {
    /// Store a new document (state-changing operation)
    Upload { data: UploadRequest },

    /// List a student's documents
    List { data: ListRequest },

    /// Delete a document; silently succeeds for absent ids
    Remove { data: RemoveRequest },

    /// Mark a document as verified
    Verify { data: VerifyRequest },

    /// Retrieve the bytes behind a file locator
    Fetch { data: FetchRequest },

    /// Forward a recommendation comment to the upstream portal backend
    Recommend { data: Recommendation },
}

/// Response carrying a single document record
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    #[serde(rename = "type")]
    pub response_type: String,
    pub document: Document,
}

impl DocumentResponse {
    pub fn new(document: Document) -> Self {
        Self {
            response_type: "document".to_string(),
            document,
        }
    }
}

/// Response carrying a student's document listing
#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    #[serde(rename = "type")]
    pub response_type: String,
    pub documents: Vec<Document>,
}

impl DocumentListResponse {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            response_type: "document_list".to_string(),
            documents,
        }
    }
}

/// Response carrying resolved file content
#[derive(Debug, Serialize)]
pub struct FileResponse {
    #[serde(rename = "type")]
    pub response_type: String,
    /// Base64-encoded file content
    pub content: String,
}

impl FileResponse {
    pub fn new(content: String) -> Self {
        Self {
            response_type: "file".to_string(),
            content,
        }
    }
}

/// Bare acknowledgement for operations that return no record
#[derive(Debug, Serialize)]
pub struct AckResponse {
    #[serde(rename = "type")]
    pub response_type: String,
}

impl AckResponse {
    pub fn removed() -> Self {
        Self {
            response_type: "document_removed".to_string(),
        }
    }

    pub fn recommendation_sent() -> Self {
        Self {
            response_type: "recommendation_sent".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}
