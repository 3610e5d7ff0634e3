//! High-level document operations.

use crate::auth::TokenProvider;
use crate::config::ClientConfig;
use crate::stream::{self, EndPayload};
use crate::transport::HttpTransport;
use crate::types::{
    ApiEnvelope, ConversationDetail, ConversationSummary, DocumentResponse, EditRequest,
    FinalDocument, HistoryDataResponse, Page, ResumeRequest, StreamResult, UpdateRequest,
    UpdateResponse,
};
use crate::{Error, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Client for the document service.
///
/// Cheap to clone; all operations resolve the bearer token up front and fail
/// with [`Error::Auth`] before any request leaves the process when no token is
/// available. Streaming operations own their parser state per call, so one
/// client can run any number of concurrent streams.
#[derive(Clone)]
pub struct DocClient {
    transport: Arc<HttpTransport>,
    config: ClientConfig,
    tokens: Arc<dyn TokenProvider>,
}

impl DocClient {
    pub fn builder() -> DocClientBuilder {
        DocClientBuilder::new()
    }

    fn bearer(&self) -> Result<String> {
        self.tokens.token().ok_or(Error::Auth)
    }

    /// List the user's conversations, newest first as the server orders them.
    pub async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        let token = self.bearer()?;
        let url = self.config.endpoint("/conversations");
        let envelope: ApiEnvelope<Page<ConversationSummary>> =
            self.transport.get_json(&url, &token).await?;
        Ok(envelope.into_data()?.data)
    }

    /// Fetch the full message history of one conversation.
    pub async fn conversation_detail(&self, conversation_id: &str) -> Result<ConversationDetail> {
        let token = self.bearer()?;
        let url = self
            .config
            .endpoint(&format!("/conversations/{conversation_id}"));
        let envelope: ApiEnvelope<ConversationDetail> =
            self.transport.get_json(&url, &token).await?;
        envelope.into_data()
    }

    /// Fetch the finished document of a conversation.
    ///
    /// The server answers with a (possibly null) document list; an interrupted
    /// generation leaves nothing persisted, surfaced here as
    /// [`Error::DocumentMissing`].
    pub async fn final_document(&self, conversation_id: &str) -> Result<FinalDocument> {
        let token = self.bearer()?;
        let url = self.config.endpoint(&format!("/documents/{conversation_id}"));
        let response: DocumentResponse = self.transport.get_json(&url, &token).await?;
        response
            .documents
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(Error::DocumentMissing)
    }

    /// Fetch the intake record (first-page form data) of a conversation.
    pub async fn history_data(&self, conversation_id: &str) -> Result<HistoryDataResponse> {
        let token = self.bearer()?;
        let url = self
            .config
            .endpoint(&format!("/historydatas/{conversation_id}"));
        self.transport.get_json(&url, &token).await
    }

    /// Persist a manual edit of the document.
    pub async fn update_document(&self, request: &UpdateRequest) -> Result<()> {
        let token = self.bearer()?;
        let url = self.config.endpoint("/chat/update");
        let response: UpdateResponse = self.transport.post_json(&url, &token, request).await?;
        if !response.success {
            return Err(Error::Api {
                code: -1,
                msg: "failed to save document on the server".to_string(),
            });
        }
        Ok(())
    }

    /// Run an AI revision and collect the revised document.
    ///
    /// `on_update` receives the full revised text accumulated so far, once per
    /// content event, on the same task that read the frame. Resolves only when
    /// the server both streamed text and sent its end marker; a stream that
    /// closes without either fails with [`Error::EmptyStream`], leaving
    /// whatever was already delivered through `on_update` untouched.
    pub async fn edit_document<F>(
        &self,
        request: &EditRequest,
        cancel: &CancellationToken,
        on_update: F,
    ) -> Result<StreamResult>
    where
        F: FnMut(&str),
    {
        let token = self.bearer()?;
        let url = self.config.endpoint("/chat/edit");
        let bytes = self.transport.post_stream(&url, &token, request).await?;

        let doc = stream::drive(bytes, cancel, on_update, |_| {}).await?;
        let (id, content) = match stream::require_complete(doc) {
            Ok(pair) => pair,
            Err(e) => {
                warn!(conversation = %request.conversation_id, "revision stream ended without usable data");
                return Err(e);
            }
        };

        Ok(StreamResult {
            id,
            content,
            created_at: Utc::now(),
        })
    }

    /// Resume an interrupted workflow and stream the final document.
    ///
    /// Fire-and-continue variant: resolves once the transport ends, whether or
    /// not an end event was seen. The outcome travels through the callbacks -
    /// `on_update` with each accumulated snapshot, `on_end` with the server's
    /// terminal payload.
    pub async fn resume_generation<F, G>(
        &self,
        request: &ResumeRequest,
        cancel: &CancellationToken,
        on_update: F,
        on_end: G,
    ) -> Result<()>
    where
        F: FnMut(&str),
        G: FnMut(&EndPayload),
    {
        let token = self.bearer()?;
        let url = self.config.endpoint("/chat/resume");
        let bytes = self.transport.post_stream(&url, &token, request).await?;

        stream::drive(bytes, cancel, on_update, on_end).await?;
        Ok(())
    }
}

/// Builder for [`DocClient`].
pub struct DocClientBuilder {
    config: Option<ClientConfig>,
    tokens: Option<Arc<dyn TokenProvider>>,
    request_timeout: Option<Duration>,
}

impl DocClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            tokens: None,
            request_timeout: None,
        }
    }

    /// Point the client at the gateway origin, using the default service
    /// prefixes for both the document service and the user-center.
    pub fn origin(mut self, origin: &str) -> Result<Self> {
        self.config = Some(ClientConfig::from_origin(origin)?);
        Ok(self)
    }

    /// Set the document-service base URL directly (mock servers, nonstandard
    /// gateways). The auth base is derived from the same host.
    pub fn base_url(mut self, base_url: &str) -> Result<Self> {
        self.config = Some(ClientConfig::new(base_url, base_url)?);
        Ok(self)
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.tokens = Some(Arc::new(provider));
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<DocClient> {
        let mut config = self
            .config
            .ok_or_else(|| Error::Configuration("base url is required".to_string()))?;
        if let Some(timeout) = self.request_timeout {
            config = config.with_request_timeout(timeout);
        }
        let tokens = self
            .tokens
            .ok_or_else(|| Error::Configuration("token provider is required".to_string()))?;
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(DocClient {
            transport,
            config,
            tokens,
        })
    }
}

impl Default for DocClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
