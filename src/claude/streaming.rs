//! Server-Sent Events (SSE) handling for streamed generations
//!
//! A full mock test is a long generation, so the client streams it and
//! reports progress while the text accumulates.

use futures_util::StreamExt;
use reqwest::Response;
use tokio::sync::mpsc;

use super::error::ClaudeError;

/// Events received from Claude's streaming API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Text chunk
    Delta(String),
    /// Stop reason reported in the final message delta
    Stop(Option<String>),
    /// Error from API
    Error(String),
    /// Anything that carries no text
    Other,
}

/// Read an SSE response to completion and return the generated text
///
/// The accumulated length in characters is sent on `progress` after each
/// chunk; a dropped receiver is ignored.
pub async fn collect_text(
    response: Response,
    progress: Option<mpsc::UnboundedSender<usize>>,
) -> Result<String, ClaudeError> {
    let mut stream = response.bytes_stream();
    // bytes, not text: a chunk may end inside a multi-byte character
    let mut buffer: Vec<u8> = Vec::new();
    let mut event_type = String::new();
    let mut text = Accumulated::default();

    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);

        while let Some(newline_pos) = buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = buffer.drain(..=newline_pos).collect();
            let line = String::from_utf8_lossy(&raw).trim_end().to_string();

            if let Some(name) = line.strip_prefix("event: ") {
                event_type = name.to_string();
            } else if let Some(data) = line.strip_prefix("data: ") {
                match parse_event(&event_type, data) {
                    StreamEvent::Delta(delta) => {
                        let chars = text.push(&delta);
                        if let Some(tx) = &progress {
                            let _ = tx.send(chars);
                        }
                    }
                    StreamEvent::Stop(Some(reason)) if reason == "max_tokens" => {
                        tracing::warn!("Generation hit the token limit; output may be truncated");
                    }
                    StreamEvent::Error(message) => {
                        return Err(ClaudeError::ApiError { status: 500, message });
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(text.text)
}

/// Streamed text plus its running character count
#[derive(Debug, Default)]
struct Accumulated {
    text: String,
    chars: usize,
}

impl Accumulated {
    /// Append a delta and return the total characters so far
    fn push(&mut self, delta: &str) -> usize {
        self.text.push_str(delta);
        self.chars += delta.chars().count();
        self.chars
    }
}

/// Parse a single SSE event from event type and data
fn parse_event(event_type: &str, data: &str) -> StreamEvent {
    let parsed = || serde_json::from_str::<serde_json::Value>(data).ok();

    match event_type {
        "content_block_delta" => parsed()
            .and_then(|v| v["delta"]["text"].as_str().map(|s| StreamEvent::Delta(s.to_string())))
            .unwrap_or(StreamEvent::Other),

        "message_delta" => StreamEvent::Stop(
            parsed().and_then(|v| v["delta"]["stop_reason"].as_str().map(|s| s.to_string())),
        ),

        "error" => StreamEvent::Error(
            parsed()
                .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
                .unwrap_or_else(|| "Unknown error".to_string()),
        ),

        "message_start" | "content_block_start" | "content_block_stop" | "message_stop"
        | "ping" => StreamEvent::Other,

        _ => {
            tracing::debug!("Unknown SSE event type: {}", event_type);
            StreamEvent::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_count_tracks_characters_not_bytes() {
        let mut acc = Accumulated::default();
        assert_eq!(acc.push("[{\"q\":"), 6);
        assert_eq!(acc.push("\"Δx → 0\""), 14);
        assert_eq!(acc.push(""), 14);
        assert_eq!(acc.chars, acc.text.chars().count());
    }

    #[test]
    fn parse_content_block_delta() {
        let data = r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hello"}}"#;
        assert_eq!(parse_event("content_block_delta", data), StreamEvent::Delta("Hello".into()));
    }

    #[test]
    fn parse_message_delta_stop_reason() {
        let data = r#"{"type":"message_delta","delta":{"stop_reason":"max_tokens"}}"#;
        assert_eq!(parse_event("message_delta", data), StreamEvent::Stop(Some("max_tokens".into())));
    }

    #[test]
    fn parse_error() {
        let data =
            r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(parse_event("error", data), StreamEvent::Error("Overloaded".into()));
    }

    #[test]
    fn ping_and_unknown_events_carry_nothing() {
        assert_eq!(parse_event("ping", "{}"), StreamEvent::Other);
        assert_eq!(parse_event("mystery", "{}"), StreamEvent::Other);
    }
}
