// Chunked NDJSON streaming utilities
use crate::application::streaming_service::StreamMessage;
use crate::infrastructure::figure_mapper::panel_to_json;
use axum::body::Body;
use axum::http::{Response, StatusCode, header};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::Stream;
use serde_json::{Value, json};

pub const CONTENT_TYPE_NDJSON: &str = "application/x-ndjson";

pub fn stream_message_to_json(msg: &StreamMessage) -> Value {
    match msg {
        StreamMessage::Skeleton { title, slots } => {
            let slots: Vec<Value> = slots
                .iter()
                .map(|s| {
                    json!({
                        "dataset": s.dataset,
                        "title": s.title,
                        "row": s.row,
                        "column": s.column,
                    })
                })
                .collect();
            json!({"type": "skeleton", "title": title, "slots": slots})
        }
        StreamMessage::Panel(panel) => json!({"type": "panel", "panel": panel_to_json(panel)}),
        StreamMessage::Complete {
            panels,
            duration_ms,
        } => json!({"type": "complete", "panels": panels, "duration_ms": duration_ms}),
    }
}

/// Serialize one message as a newline-terminated JSON line.
fn serialize_chunk(msg: &StreamMessage) -> Result<Bytes, std::io::Error> {
    let line = serde_json::to_vec(&stream_message_to_json(msg))?;
    let mut chunk = BytesMut::with_capacity(line.len() + 1);
    chunk.put_slice(&line);
    chunk.put_u8(b'\n');
    Ok(chunk.freeze())
}

pub fn chunked_json_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = StreamMessage> + Send + 'static,
{
    let byte_stream = stream.map(|msg| serialize_chunk(&msg));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, CONTENT_TYPE_NDJSON)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Helper to create a streaming response from a receiver
pub fn stream_from_receiver(mut rx: tokio::sync::mpsc::Receiver<StreamMessage>) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(msg) = rx.recv().await {
            yield msg;
        }
    };

    match chunked_json_stream(stream) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::streaming_service::PanelSlot;
    use crate::domain::dataset::DatasetName;

    #[test]
    fn test_chunk_is_one_json_line() {
        let msg = StreamMessage::Complete {
            panels: 6,
            duration_ms: 42,
        };

        let chunk = serialize_chunk(&msg).unwrap();

        assert_eq!(chunk.last(), Some(&b'\n'));
        let value: Value = serde_json::from_slice(&chunk[..chunk.len() - 1]).unwrap();
        assert_eq!(value, json!({"type": "complete", "panels": 6, "duration_ms": 42}));
    }

    #[test]
    fn test_skeleton_message() {
        let msg = StreamMessage::Skeleton {
            title: "Retail".to_string(),
            slots: vec![PanelSlot {
                dataset: DatasetName::MonthlySalesTrends,
                title: "Monthly Sales Trends",
                row: 1,
                column: 1,
            }],
        };

        let value = stream_message_to_json(&msg);
        assert_eq!(value["type"], "skeleton");
        assert_eq!(value["slots"][0]["dataset"], "MonthlySalesTrends");
        assert_eq!(value["slots"][0]["row"], 1);
    }
}
