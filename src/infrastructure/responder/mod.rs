//! Chat model adapters that play the interviewer
//!
//! Both providers stream their reply as server-sent events. The text is
//! forwarded to the chunk callback as it arrives and returned once the
//! stream ends.

mod gemini;
mod openai;
mod sse;

pub use gemini::GeminiResponder;
pub use openai::OpenAiResponder;
pub use sse::SseDecoder;

use futures::StreamExt;
use tracing::trace;

use super::http::HttpFailure;
use crate::application::ports::{ChunkCallback, ResponderError};

/// What one SSE payload contributed to the reply
#[derive(Debug)]
pub(crate) enum StreamItem {
    Text(String),
    Skip,
    Done,
}

/// Drain an SSE response body into the assembled reply text.
pub(crate) async fn read_event_stream<F>(
    response: reqwest::Response,
    on_chunk: Option<ChunkCallback>,
    mut parse: F,
) -> Result<String, ResponderError>
where
    F: FnMut(&str) -> Result<StreamItem, ResponderError> + Send,
{
    let mut body = Box::pin(response.bytes_stream());
    let mut decoder = SseDecoder::new();
    let mut reply = String::new();
    let mut done = false;

    let mut accept = |payload: &str, reply: &mut String| -> Result<bool, ResponderError> {
        match parse(payload)? {
            StreamItem::Text(text) if !text.is_empty() => {
                if let Some(cb) = &on_chunk {
                    cb(&text);
                }
                reply.push_str(&text);
                Ok(false)
            }
            StreamItem::Text(_) | StreamItem::Skip => Ok(false),
            StreamItem::Done => Ok(true),
        }
    };

    'read: while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| ResponderError::from(HttpFailure::from_transport(e)))?;
        trace!(bytes = chunk.len(), "stream chunk");
        for payload in decoder.push(&chunk) {
            if accept(&payload, &mut reply)? {
                done = true;
                break 'read;
            }
        }
    }

    if !done {
        if let Some(payload) = decoder.finish() {
            accept(&payload, &mut reply)?;
        }
    }

    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return Err(ResponderError::EmptyResponse);
    }
    Ok(trimmed.to_string())
}
