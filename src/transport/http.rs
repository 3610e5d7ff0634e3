use crate::config::ClientConfig;
use crate::{BoxStream, Error, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Thin wrapper around a shared `reqwest::Client`.
///
/// Owns status checking and the conversion from an HTTP response into either
/// parsed JSON or an incrementally readable byte stream. It does not know what
/// the bytes mean; the streaming core does.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(Error::Http)?;
        Ok(Self { client })
    }

    /// GET a JSON endpoint.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<T> {
        let req = self.client.get(url).bearer_auth(token);
        let resp = Self::checked(req).await?;
        Ok(resp.json().await?)
    }

    /// POST a JSON body and parse a JSON response.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
        body: &B,
    ) -> Result<T> {
        let req = self.client.post(url).bearer_auth(token).json(body);
        let resp = Self::checked(req).await?;
        Ok(resp.json().await?)
    }

    /// POST a JSON body without authentication (login/register).
    pub async fn post_json_unauthenticated<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let req = self.client.post(url).json(body);
        let resp = Self::checked(req).await?;
        Ok(resp.json().await?)
    }

    /// POST a JSON body and hand back the response body as a byte stream.
    ///
    /// Fails fast on a non-success status, capturing the raw error body text.
    /// The request carries an `accept: text/event-stream` header and a fresh
    /// `x-request-id` so server logs can be correlated with client traces.
    pub async fn post_stream<B: Serialize>(
        &self,
        url: &str,
        token: &str,
        body: &B,
    ) -> Result<BoxStream<'static, Bytes>> {
        let request_id = Uuid::new_v4().to_string();
        debug!(%url, %request_id, "opening stream");

        let req = self
            .client
            .post(url)
            .bearer_auth(token)
            .header("accept", "text/event-stream")
            .header("x-request-id", &request_id)
            .json(body);
        let resp = Self::checked(req).await?;

        let bytes = resp.bytes_stream().map_err(Error::Http);
        Ok(Box::pin(bytes))
    }

    /// Send and translate non-success statuses into [`Error::Transport`] with
    /// whatever error body the server produced.
    async fn checked(req: RequestBuilder) -> Result<Response> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Transport {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}
