use crate::stream::{EndPayload, StreamEvent};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Deserialize)]
struct ContentPayload {
    #[serde(default)]
    chunk: String,
}

/// Decode one complete frame into a typed event.
///
/// A frame is a handful of lines; the `event:` and `data:` lines may appear in
/// either order and anything else (comments, ids) is ignored. Returns `None`
/// for frames this client has no use for: missing lines, unparsable payloads,
/// unknown event names. Pure and stateless, so re-decoding a frame always
/// yields the same result.
pub fn decode_frame(frame: &str) -> Option<StreamEvent> {
    let mut event_name: Option<&str> = None;
    let mut data: Option<&str> = None;

    for line in frame.lines() {
        if let Some(name) = line.strip_prefix("event: ") {
            event_name.get_or_insert(name);
        } else if let Some(payload) = line.strip_prefix("data: ") {
            data.get_or_insert(payload);
        }
    }

    let (name, payload) = match (event_name, data) {
        (Some(n), Some(p)) => (n, p),
        _ => {
            debug!("dropping frame without event/data lines");
            return None;
        }
    };

    match name {
        "message" => match serde_json::from_str::<ContentPayload>(payload) {
            Ok(p) => Some(StreamEvent::Content { chunk: p.chunk }),
            Err(e) => {
                warn!(error = %e, "dropping message frame with bad payload");
                None
            }
        },
        "end" => match serde_json::from_str::<EndPayload>(payload) {
            Ok(p) => Some(StreamEvent::End(p)),
            Err(e) => {
                warn!(error = %e, "dropping end frame with bad payload");
                None
            }
        },
        other => {
            debug!(event = other, "ignoring unknown event");
            None
        }
    }
}
