//! In-process stand-in for the inference service's `POST /check`.

#![allow(dead_code)]

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::routing::post;
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ReceivedPart {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

#[derive(Clone)]
struct Shared {
    status: StatusCode,
    body: String,
    hits: Arc<AtomicUsize>,
    parts: Arc<Mutex<Vec<ReceivedPart>>>,
}

pub struct MockServer {
    pub endpoint: String,
    shared: Shared,
}

impl MockServer {
    /// Serves `body` with `status` for every request to `/check`.
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let shared = Shared {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
            hits: Arc::new(AtomicUsize::new(0)),
            parts: Arc::new(Mutex::new(Vec::new())),
        };

        let router = Router::new()
            .route("/check", post(check))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            endpoint: format!("http://{}/check", addr),
            shared,
        }
    }

    pub async fn json(prediction: &str, message: &str) -> Self {
        let body = serde_json::json!({
            "prediction": prediction,
            "sensitive_response": message,
        });
        Self::start(200, body.to_string()).await
    }

    pub fn hits(&self) -> usize {
        self.shared.hits.load(Ordering::SeqCst)
    }

    pub fn parts(&self) -> Vec<ReceivedPart> {
        self.shared.parts.lock().unwrap().clone()
    }
}

async fn check(
    State(shared): State<Shared>,
    mut multipart: Multipart,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    shared.hits.fetch_add(1, Ordering::SeqCst);

    let mut received = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap().to_vec();
        received.push(ReceivedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }
    shared.parts.lock().unwrap().extend(received);

    (
        shared.status,
        [(header::CONTENT_TYPE, "application/json")],
        shared.body.clone(),
    )
}

/// Writes a small JPEG to stand in for a capture.
pub fn write_photo(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("mole-scan-1.jpg");
    image::RgbImage::from_pixel(16, 16, image::Rgb([180, 120, 90]))
        .save(&path)
        .unwrap();
    path
}
