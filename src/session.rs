//! Consumer-side session state for one conversation's document.
//!
//! The stock frontend keeps a reactive store with the current document and the
//! live streaming text. This is its Rust rendition: the live text is published
//! through a `watch` channel so any number of observers (a TUI, a websocket
//! fanout) can follow a generation in progress, while the session itself owns
//! the current-document bookkeeping across revisions and saves.

use crate::client::DocClient;
use crate::types::{EditRequest, FinalDocument, Message, ResumeRequest, UpdateRequest};
use crate::{Error, Result};
use chrono::Utc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Stateful wrapper around [`DocClient`] for a single conversation.
pub struct DocumentSession {
    client: DocClient,
    conversation_id: String,
    current: Option<FinalDocument>,
    streaming: watch::Sender<String>,
}

impl DocumentSession {
    pub fn new(client: DocClient, conversation_id: impl Into<String>) -> Self {
        let (streaming, _) = watch::channel(String::new());
        Self {
            client,
            conversation_id: conversation_id.into(),
            current: None,
            streaming,
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// The last fetched or generated document, if any.
    pub fn current_document(&self) -> Option<&FinalDocument> {
        self.current.as_ref()
    }

    /// Subscribe to the live streaming text. Each generation publishes the
    /// full accumulated document after every received chunk.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.streaming.subscribe()
    }

    /// Current snapshot of the live streaming text.
    pub fn streaming_text(&self) -> String {
        self.streaming.borrow().clone()
    }

    /// Fetch the conversation's finished document into the session.
    pub async fn load_final_document(&mut self) -> Result<&FinalDocument> {
        let doc = self.client.final_document(&self.conversation_id).await?;
        Ok(self.current.insert(doc))
    }

    /// The revision exchange of this conversation: user prompts and the
    /// assistant replies they produced.
    pub async fn revision_history(&self) -> Result<Vec<Message>> {
        let detail = self.client.conversation_detail(&self.conversation_id).await?;
        Ok(detail.history)
    }

    /// Revise the current document with an AI instruction.
    ///
    /// The live text is seeded with the document being revised, then follows
    /// the stream. On success the current document takes the revised content
    /// and the new server-assigned id. On failure the session keeps both the
    /// previous document and whatever partial text was already published, so a
    /// consumer can show what arrived before the stream broke.
    pub async fn revise_with_ai(
        &mut self,
        prompt: impl Into<String>,
        cancel: &CancellationToken,
    ) -> Result<&FinalDocument> {
        let current = self.current.as_ref().ok_or(Error::DocumentMissing)?;
        self.streaming.send_replace(current.content.clone());

        let request = EditRequest {
            conversation_id: self.conversation_id.clone(),
            message_id: current.id.clone(),
            prompt: prompt.into(),
            use_knowledge_base: false,
            knowledge_base_id: None,
        };

        let streaming = &self.streaming;
        let result = self
            .client
            .edit_document(&request, cancel, |text| {
                streaming.send_replace(text.to_string());
            })
            .await?;

        Ok(self.current.insert(result.into()))
    }

    /// Resume an interrupted workflow, generating the final document from the
    /// confirmed outline content.
    pub async fn generate_from_checklist(
        &mut self,
        content: impl Into<String>,
        template_id: Option<String>,
        cancel: &CancellationToken,
    ) -> Result<Option<&FinalDocument>> {
        self.streaming.send_replace(String::new());
        self.current = None;

        let request = ResumeRequest {
            conversation_id: self.conversation_id.clone(),
            content: content.into(),
            template_id,
        };

        let streaming = &self.streaming;
        let mut generated: Option<FinalDocument> = None;
        self.client
            .resume_generation(
                &request,
                cancel,
                |text| {
                    streaming.send_replace(text.to_string());
                },
                |end| {
                    generated = Some(FinalDocument {
                        id: end.message_id.clone(),
                        content: streaming.borrow().clone(),
                        created_at: Utc::now().to_rfc3339(),
                    });
                },
            )
            .await?;

        self.current = generated;
        Ok(self.current.as_ref())
    }

    /// Persist a manual edit, keeping the document id and timestamp unchanged.
    pub async fn save_changes(&mut self, content: impl Into<String>) -> Result<()> {
        let current = self.current.as_mut().ok_or(Error::DocumentMissing)?;
        let content = content.into();

        let request = UpdateRequest {
            conversation_id: self.conversation_id.clone(),
            message_id: current.id.clone(),
            prompt: content.clone(),
        };
        self.client.update_document(&request).await?;

        current.content = content;
        Ok(())
    }
}
