use std::sync::Mutex;

use crate::domain::{Document, DocumentType};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Storage seam for the document registry.
///
/// `Send + Sync` so a single instance can be shared behind the server's mutex.
pub trait DocumentStore: Send + Sync {
    fn save_document(&self, doc: &Document, content: &[u8]) -> Result<(), StoreError>;
    fn list_by_student(&self, student_id: &str) -> Result<Vec<Document>, StoreError>;
    fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError>;
    fn delete_document(&self, id: &str) -> Result<(), StoreError>;
    fn set_verified(&self, id: &str) -> Result<(), StoreError>;
    fn load_content(&self, file_url: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn count_documents(&self) -> Result<usize, StoreError>;
}

/// In-memory SQLite store. State lives for the lifetime of the
/// connection only; nothing is ever written to disk.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                student_id TEXT NOT NULL,
                name TEXT NOT NULL,
                doc_type TEXT NOT NULL,
                file_url TEXT UNIQUE NOT NULL,
                upload_date INTEGER NOT NULL,
                verified INTEGER NOT NULL DEFAULT 0,
                content BLOB NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_student_id ON documents(student_id)",
            [],
        )?;

        Ok(())
    }

    fn row_to_document(row: &rusqlite::Row) -> Result<Document, rusqlite::Error> {
        let tag: String = row.get(3)?;
        let doc_type = DocumentType::from_tag(&tag).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                format!("unknown document type tag: {}", tag).into(),
            )
        })?;

        Ok(Document {
            id: row.get(0)?,
            student_id: row.get(1)?,
            name: row.get(2)?,
            doc_type,
            file_url: row.get(4)?,
            upload_date: row.get(5)?,
            verified: row.get(6)?,
        })
    }
}

impl DocumentStore for SqliteStore {
    fn save_document(&self, doc: &Document, content: &[u8]) -> Result<(), StoreError> {
        self.conn.lock().unwrap().execute(
            "INSERT INTO documents (id, student_id, name, doc_type, file_url, upload_date, verified, content)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &doc.id,
                &doc.student_id,
                &doc.name,
                doc.doc_type.as_tag(),
                &doc.file_url,
                &doc.upload_date,
                &doc.verified,
                content
            ],
        )?;

        Ok(())
    }

    fn list_by_student(&self, student_id: &str) -> Result<Vec<Document>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, student_id, name, doc_type, file_url, upload_date, verified
             FROM documents
             WHERE student_id = ?1
             ORDER BY rowid",
        )?;

        // rowid ordering keeps the listing in insertion order
        let docs = stmt
            .query_map(params![student_id], Self::row_to_document)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(docs)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let doc = self
            .conn
            .lock()
            .unwrap()
            .query_row(
                "SELECT id, student_id, name, doc_type, file_url, upload_date, verified
                 FROM documents
                 WHERE id = ?1",
                params![id],
                Self::row_to_document,
            )
            .optional()?;

        Ok(doc)
    }

    fn delete_document(&self, id: &str) -> Result<(), StoreError> {
        // Zero affected rows is fine; deleting an absent id is a no-op
        self.conn
            .lock()
            .unwrap()
            .execute("DELETE FROM documents WHERE id = ?1", params![id])?;

        Ok(())
    }

    fn set_verified(&self, id: &str) -> Result<(), StoreError> {
        self.conn.lock().unwrap().execute(
            "UPDATE documents SET verified = 1 WHERE id = ?1",
            params![id],
        )?;

        Ok(())
    }

    fn load_content(&self, file_url: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let content = self
            .conn
            .lock()
            .unwrap()
            .query_row(
                "SELECT content FROM documents WHERE file_url = ?1",
                params![file_url],
                |row| row.get(0),
            )
            .optional()?;

        Ok(content)
    }

    fn count_documents(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}
