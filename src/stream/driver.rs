use crate::stream::{decode_frame, AccumulatedDocument, Applied, EndPayload, FrameBuffer, Reducer};
use crate::{BoxStream, Error, Result};
use bytes::Bytes;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Drive one streaming response to completion.
///
/// Pulls chunks from `bytes`, reassembles frames, decodes events and folds
/// them into an [`AccumulatedDocument`]. `on_update` fires synchronously with
/// the full accumulated text after every content event; `on_end` fires once if
/// the server sends its end marker. Neither is ever deferred or batched.
///
/// Returns whatever was accumulated when the transport reports end-of-data.
/// The caller decides terminal semantics: the collect variant demands a
/// complete, non-empty document, while the fire-and-continue variant accepts
/// any outcome. Errors on the byte stream abort immediately; cancellation is
/// checked on every iteration and surfaces [`Error::Cancelled`]. The transport
/// stream is dropped on all exit paths.
pub async fn drive<F, G>(
    mut bytes: BoxStream<'_, Bytes>,
    cancel: &CancellationToken,
    mut on_update: F,
    mut on_end: G,
) -> Result<AccumulatedDocument>
where
    F: FnMut(&str),
    G: FnMut(&EndPayload),
{
    let mut buffer = FrameBuffer::new();
    let mut reducer = Reducer::new();

    loop {
        let chunk = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            chunk = bytes.next() => chunk,
        };

        match chunk {
            Some(Ok(chunk)) => {
                for frame in buffer.feed(&chunk) {
                    let Some(event) = decode_frame(&frame) else {
                        continue;
                    };
                    match reducer.apply(event) {
                        Applied::Updated(text) => on_update(text),
                        Applied::Completed(end) => on_end(end),
                        Applied::Ignored => {}
                    }
                }
            }
            Some(Err(e)) => return Err(e),
            None => break,
        }
    }

    if !buffer.pending().is_empty() {
        // A frame the server never finished; nothing useful can be in it.
        debug!(bytes = buffer.pending().len(), "discarding partial trailing frame");
    }

    Ok(reducer.into_document())
}

/// Terminal check for the collect variant: a usable result needs both the end
/// marker and non-empty text.
pub(crate) fn require_complete(doc: AccumulatedDocument) -> Result<(String, String)> {
    match doc.final_id {
        Some(id) if !doc.text.is_empty() => Ok((id, doc.text)),
        _ => Err(Error::EmptyStream),
    }
}
