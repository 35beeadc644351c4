//! Image payloads for the vision-language runtime.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use image::ImageFormat;

use crate::error::ImageInputError;

/// A decoded-and-verified image, kept in its original encoding.
#[derive(Debug, Clone)]
pub struct ImageInput {
    data: Bytes,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl ImageInput {
    /// Verify that `data` is an image in a supported format.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self, ImageInputError> {
        let data = data.into();
        let format = image::guess_format(&data)?;
        let decoded = image::load_from_memory_with_format(&data, format)?;
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            data,
            format,
        })
    }

    /// Decode a bare base64 payload or a `data:<mime>;base64,<payload>` URL.
    pub fn from_base64(payload: &str) -> Result<Self, ImageInputError> {
        let encoded = match payload.strip_prefix("data:") {
            Some(rest) => {
                let (meta, data) = rest
                    .split_once(',')
                    .ok_or_else(|| ImageInputError::DataUrl("missing ',' separator".into()))?;
                if !meta.ends_with(";base64") {
                    return Err(ImageInputError::DataUrl(
                        "only base64 data URLs are supported".into(),
                    ));
                }
                data
            }
            None => payload,
        };
        let bytes = STANDARD.decode(encoded.trim())?;
        Self::from_bytes(bytes)
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), self.to_base64())
    }
}
