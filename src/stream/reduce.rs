use crate::stream::{EndPayload, StreamEvent};
use tracing::debug;

/// The running value a stream folds into.
///
/// `text` only ever grows by appending, until an end event freezes it.
/// `final_id` is set at most once, by the end event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccumulatedDocument {
    pub text: String,
    pub final_id: Option<String>,
}

impl AccumulatedDocument {
    /// True once an end event has supplied the server-assigned id.
    pub fn is_complete(&self) -> bool {
        self.final_id.is_some()
    }
}

/// What applying one event changed, so the driver knows which observer
/// callback to fire. Borrows from the reducer to avoid copying the full
/// accumulated text on every chunk.
#[derive(Debug, PartialEq, Eq)]
pub enum Applied<'a> {
    /// Text grew; carries the full accumulated text so far. Consumers render
    /// the whole document, not a diff.
    Updated(&'a str),
    /// The end event arrived; the stream is semantically finished.
    Completed(&'a EndPayload),
    /// Nothing observable happened (event after completion).
    Ignored,
}

/// Two-phase state machine folding decoded events into a document.
///
/// While accumulating, content appends and reports each new snapshot; the
/// first end event completes the stream, after which every further event is
/// ignored.
#[derive(Debug, Default)]
pub struct Reducer {
    doc: AccumulatedDocument,
    end: Option<EndPayload>,
}

impl Reducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &AccumulatedDocument {
        &self.doc
    }

    pub fn into_document(self) -> AccumulatedDocument {
        self.doc
    }

    pub fn apply(&mut self, event: StreamEvent) -> Applied<'_> {
        if self.end.is_some() {
            debug!(?event, "ignoring event after stream end");
            return Applied::Ignored;
        }
        match event {
            StreamEvent::Content { chunk } => {
                self.doc.text.push_str(&chunk);
                Applied::Updated(&self.doc.text)
            }
            StreamEvent::End(end) => {
                self.doc.final_id = Some(end.message_id.clone());
                Applied::Completed(self.end.insert(end))
            }
        }
    }
}
