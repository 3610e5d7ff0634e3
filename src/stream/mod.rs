//! Streaming response core: frame reassembly, event decoding and accumulation.
//!
//! The generation endpoints answer with a chunked body of blank-line-separated
//! frames. Network reads can cut a frame anywhere, including inside a multi-byte
//! UTF-8 sequence, so raw chunks pass through four stages:
//!
//! ```text
//! transport bytes -> FrameBuffer -> complete frames -> decode_frame -> events
//!                                                          |
//!                                        Reducer <---------+
//!                                (running document + callbacks)
//! ```
//!
//! Stages are private to one stream invocation; nothing is shared across
//! concurrent streams. Malformed frames and unknown event names are dropped and
//! logged, never fatal. Only transport failures and cancellation abort a stream.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`FrameBuffer`] | Splits the chunked byte stream into complete frames |
//! | [`decode_frame`] | Parses one frame into a typed [`StreamEvent`] |
//! | [`Reducer`] | Folds events into an [`AccumulatedDocument`] |
//! | [`drive`] | Read loop tying the stages together |

mod decode;
mod driver;
mod frame;
mod reduce;


pub use decode::decode_frame;
pub use driver::drive;
pub(crate) use driver::require_complete;
pub use frame::FrameBuffer;
pub use reduce::{AccumulatedDocument, Applied, Reducer};

use serde::{Deserialize, Serialize};

/// One decoded streaming event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A fragment of generated text to append.
    Content { chunk: String },
    /// Terminal marker with the server-assigned id of the finished generation.
    End(EndPayload),
}

/// Payload of the `end` event. The revision endpoint sends only `message_id`;
/// the resumption endpoint also names the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndPayload {
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}
