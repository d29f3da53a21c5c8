use serde::{Deserialize, Serialize};

/// Category of an uploaded application document.
///
/// `Other` is the catch-all bucket for categories the consuming UI may
/// add without a registry change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Transcript,
    Certificate,
    Identification,
    Other,
}

impl DocumentType {
    pub fn as_tag(&self) -> &'static str {
        match self {
            DocumentType::Transcript => "transcript",
            DocumentType::Certificate => "certificate",
            DocumentType::Identification => "identification",
            DocumentType::Other => "other",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "transcript" => Some(DocumentType::Transcript),
            "certificate" => Some(DocumentType::Certificate),
            "identification" => Some(DocumentType::Identification),
            "other" => Some(DocumentType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub student_id: String,
    pub name: String,
    pub doc_type: DocumentType,
    /// Locator for the uploaded bytes. Resolvable only through the
    /// registry that minted it, for the lifetime of the process.
    pub file_url: String,
    pub upload_date: i64,
    pub verified: bool,
}

impl Document {
    /// Create a fresh record for an upload. Everything except `verified`
    /// is immutable from here on.
    pub fn new(student_id: &str, name: &str, doc_type: DocumentType) -> Self {
        // Generate unique ID
        let id = uuid::Uuid::new_v4().to_string();

        // The locator is derived from the id, so it inherits uniqueness
        let file_url = format!("memory://documents/{}", id);

        // Get current timestamp
        let upload_date = chrono::Utc::now().timestamp();

        Self {
            id,
            student_id: student_id.to_string(),
            name: name.to_string(),
            doc_type,
            file_url,
            upload_date,
            verified: false,
        }
    }
}
