// src/core/types.rs — Domain types: images and outfit analysis

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Per-garment free-text description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutfitBreakdown {
    pub top: String,
    pub bottom: String,
    pub footwear: String,
    pub accessories: String,
}

impl OutfitBreakdown {
    /// `(label, value)` pairs in display order.
    pub fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Top", self.top.as_str()),
            ("Bottom", self.bottom.as_str()),
            ("Footwear", self.footwear.as_str()),
            ("Accessories", self.accessories.as_str()),
        ]
    }
}

/// Structured result of the analysis call. Every field is required on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutfitAnalysis {
    pub breakdown: OutfitBreakdown,
    /// Rendering order is significant.
    pub color_palette: Vec<String>,
    pub style_category: String,
    pub material_highlights: Vec<String>,
    pub aesthetic_vibe: String,
    pub recreation_prompt: String,
}

impl OutfitAnalysis {
    /// Parse the JSON text returned by the analysis model.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text.trim())
    }
}

/// The uploaded photo. Bytes are shared so the workflow can hand them to the
/// analyzer while the session keeps them for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    mime_type: String,
    data: Arc<[u8]>,
}

impl SourceImage {
    /// Wrap encoded image bytes, sniffing the MIME type from the header.
    pub fn from_bytes(data: impl Into<Arc<[u8]>>) -> Self {
        let data = data.into();
        Self {
            mime_type: sniff_mime_type(&data).to_string(),
            data,
        }
    }

    pub async fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.data)
    }
}

/// Image returned by the synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl GeneratedImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// `data:` URL suitable for direct display.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            BASE64_STANDARD.encode(&self.data)
        )
    }

    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

/// MIME type from magic bytes. Unknown formats go out as JPEG.
fn sniff_mime_type(data: &[u8]) -> &'static str {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        "image/gif"
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/jpeg"
    }
}
