//! Wire types for the document service endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope the gateway wraps JSON responses in. `data` is absent on
/// business-level failures (non-zero `code`).
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the envelope, turning a non-zero code or missing payload into
    /// [`crate::Error::Api`].
    pub fn into_data(self) -> crate::Result<T> {
        if self.code != 0 {
            return Err(crate::Error::Api {
                code: self.code,
                msg: self.msg,
            });
        }
        self.data.ok_or_else(|| crate::Error::Api {
            code: self.code,
            msg: "response envelope carried no data".to_string(),
        })
    }
}

/// Paged list wrapper inside the envelope of the conversations listing.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub data: Vec<T>,
}

/// One row of the conversation listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: String,
    pub title: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    DocumentOutline,
    FinalDocument,
}

/// One message in a conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub content_type: ContentType,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDetail {
    pub conversation_id: String,
    pub title: String,
    pub history: Vec<Message>,
}

/// A finished document as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalDocument {
    pub id: String,
    pub content: String,
    pub created_at: String,
}

/// Response of the final-document fetch. `documents` is null when a
/// generation was interrupted before anything was persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentResponse {
    pub conversation_id: String,
    #[serde(default)]
    pub documents: Option<Vec<FinalDocument>>,
}

/// AI revision request for `/chat/edit`.
#[derive(Debug, Clone, Serialize)]
pub struct EditRequest {
    pub conversation_id: String,
    pub message_id: String,
    pub prompt: String,
    pub use_knowledge_base: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base_id: Option<String>,
}

/// Manual save request for `/chat/update`. `prompt` carries the full document
/// content, not an instruction.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest {
    pub conversation_id: String,
    pub message_id: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub success: bool,
}

/// Request for `/chat/resume`: continue an interrupted workflow with the
/// user-confirmed outline content.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeRequest {
    pub conversation_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFileReference {
    pub file_id: String,
    pub filename: String,
}

/// First-page intake record of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryDataItem {
    pub id: String,
    pub documenttype: String,
    pub information: String,
    pub requests: String,
    pub created_at: String,
    #[serde(default)]
    pub references: Vec<HistoryFileReference>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryDataResponse {
    pub conversation_id: String,
    #[serde(default)]
    pub items: Vec<HistoryDataItem>,
}

/// Terminal output of a collected generation stream.
///
/// Only produced when the stream both accumulated text and saw the end marker;
/// `created_at` is stamped client-side when the stream resolves.
#[derive(Debug, Clone, Serialize)]
pub struct StreamResult {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<StreamResult> for FinalDocument {
    fn from(r: StreamResult) -> Self {
        FinalDocument {
            id: r.id,
            content: r.content,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}
