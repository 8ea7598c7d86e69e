use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures_util::stream::{self, Stream, StreamExt};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub thread_id: Option<String>,
}

/// Chat assistant proxy
///
/// Forwards the message to the configured assistant and relays its text
/// deltas to the browser as SSE `data:` events, ending with `[DONE]`.
/// Upstream failures mid-stream surface as an `error` event.
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidInput("Message is required".to_string()));
    }

    let deltas = state
        .assistant
        .stream_reply(payload.message.trim(), payload.thread_id.as_deref())
        .await?;

    let events = deltas
        .map(|delta| match delta {
            Ok(text) => Ok(Event::default().data(text)),
            Err(e) => {
                tracing::error!("Assistant stream error: {}", e);
                Ok(Event::default().event("error").data("assistant unavailable"))
            }
        })
        .chain(stream::once(async { Ok(Event::default().data("[DONE]")) }));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
