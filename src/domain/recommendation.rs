use serde::{Deserialize, Serialize};

/// Recommendation-letter comment a professor submits for an application.
///
/// This is the exact payload the upstream portal backend accepts at
/// `/student/addcomment`; the registry does not own or store it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub author_id: String,
    pub application_id: String,
    pub comment: String,
}

impl Recommendation {
    pub fn new(author_id: String, application_id: String, comment: String) -> Self {
        let id = uuid::Uuid::new_v4().to_string();

        Self {
            id,
            author_id,
            application_id,
            comment,
        }
    }
}
