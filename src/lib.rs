//! # llmcenter-client
//!
//! Async client runtime for the LLMCenter document authoring service.
//!
//! ## Overview
//!
//! LLMCenter generates and revises long-form documents with an LLM backend. Its
//! generation endpoints answer with a chunked `text/event-stream` body: discrete
//! frames separated by a blank line, each carrying an `event:` name and a `data:`
//! JSON payload. This crate owns the client side of that protocol: issuing the
//! request, reassembling frames out of arbitrary network chunking, folding the
//! decoded events into a growing document, and resolving a terminal result once
//! the server marks the stream finished.
//!
//! ## Key Features
//!
//! - **Streaming core**: [`stream`] reassembles partial frames, decodes events and
//!   accumulates document text with strict ordering guarantees
//! - **Typed operations**: [`DocClient`] covers conversation listing, document
//!   fetch/save and the two streaming generation flows (edit, resume)
//! - **Auth boundary**: bearer tokens resolved through a [`auth::TokenProvider`],
//!   with a keyring-backed store for interactive use
//! - **Cancellation**: every streaming call takes a `CancellationToken` checked on
//!   each read, so a stream can be abandoned without leaking the transport
//! - **Session state**: [`session::DocumentSession`] mirrors the consumer side -
//!   live streaming text published through a watch channel, current document kept
//!   across revisions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llmcenter_client::{DocClient, auth::StaticToken, types::EditRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> llmcenter_client::Result<()> {
//!     let client = DocClient::builder()
//!         .base_url("https://example.com/llmcenter/v1")?
//!         .token_provider(StaticToken::new("my-token"))
//!         .build()?;
//!
//!     let request = EditRequest {
//!         conversation_id: "c-42".into(),
//!         message_id: "m-7".into(),
//!         prompt: "tighten the executive summary".into(),
//!         use_knowledge_base: false,
//!         knowledge_base_id: None,
//!     };
//!
//!     let result = client
//!         .edit_document(&request, &CancellationToken::new(), |text| {
//!             println!("so far: {} chars", text.len());
//!         })
//!         .await?;
//!
//!     println!("final document {}: {} chars", result.id, result.content.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`stream`] | Frame buffer, event decoder, reducer and drive loop |
//! | [`client`] | High-level document operations ([`DocClient`]) |
//! | [`transport`] | HTTP transport over reqwest |
//! | [`auth`] | Token provider boundary and login/register calls |
//! | [`session`] | Consumer-side document session state |
//! | [`types`] | Wire types for all endpoints |
//! | [`config`] | Client configuration |

pub mod auth;
pub mod client;
pub mod config;
pub mod session;
pub mod stream;
pub mod transport;
pub mod types;

pub mod error;
pub use error::Error;

pub use client::{DocClient, DocClientBuilder};
pub use config::ClientConfig;
pub use stream::{AccumulatedDocument, StreamEvent};
pub use types::StreamResult;

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;
