//! Game-over screenshot upload
//!
//! The image is POSTed as `{ "data": "<data url>" }` to an image host
//! passthrough, which answers with `{ "data": <id or url> }`. Uploads are
//! fire-and-forget: failures are logged and never reach the game.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid image data url: {0}")]
    InvalidImage(String),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("network error: {0}")]
    Network(String),
    #[error("upload rejected with HTTP {0}")]
    Status(u16),
}

/// A `data:<mime>;base64,<payload>` image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime: String,
    /// Decoded size in bytes
    pub len: usize,
    data_url: String,
}

impl ImagePayload {
    /// Validate a data URL and check that its payload decodes
    pub fn from_data_url(data_url: &str) -> Result<Self, UploadError> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| UploadError::InvalidImage("missing data: scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| UploadError::InvalidImage("missing payload".to_string()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| UploadError::InvalidImage("payload is not base64".to_string()))?;
        if mime.is_empty() {
            return Err(UploadError::InvalidImage("empty mime type".to_string()));
        }

        let len = STANDARD.decode(payload)?.len();
        if len == 0 {
            return Err(UploadError::InvalidImage("empty payload".to_string()));
        }

        Ok(Self {
            mime: mime.to_string(),
            len,
            data_url: data_url.to_string(),
        })
    }

    pub fn as_data_url(&self) -> &str {
        &self.data_url
    }
}

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub data: String,
}

impl UploadRequest {
    pub fn new(image: &ImagePayload) -> Self {
        Self {
            data: image.as_data_url().to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, UploadError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Response body; `data` identifies the stored image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub data: serde_json::Value,
}

impl UploadResponse {
    pub fn from_json(body: &str) -> Result<Self, UploadError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Build the JSON body for a screenshot
pub fn request_body(data_url: &str) -> Result<String, UploadError> {
    let image = ImagePayload::from_data_url(data_url)?;
    log::debug!("Uploading {} image ({} bytes)", image.mime, image.len);
    UploadRequest::new(&image).to_json()
}

/// POST a screenshot and return the host's response
#[cfg(target_arch = "wasm32")]
pub async fn upload_image(endpoint: &str, data_url: &str) -> Result<UploadResponse, UploadError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    fn js_err(e: JsValue) -> UploadError {
        UploadError::Network(format!("{:?}", e))
    }

    let body = request_body(data_url)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(endpoint, &opts).map_err(js_err)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_err)?;

    let window =
        web_sys::window().ok_or_else(|| UploadError::Network("no window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;

    if !response.ok() {
        return Err(UploadError::Status(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .unwrap_or_default();
    UploadResponse::from_json(&text)
}

/// Start an upload without waiting for it; the outcome is only logged
#[cfg(target_arch = "wasm32")]
pub fn spawn_upload(endpoint: String, data_url: String) {
    wasm_bindgen_futures::spawn_local(async move {
        match upload_image(&endpoint, &data_url).await {
            Ok(response) => log::info!("Score screenshot stored: {}", response.data),
            Err(e) => log::error!("Screenshot upload failed: {}", e),
        }
    });
}
