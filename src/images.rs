//! Storage of base64-embedded recipe images.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image payload is empty")]
    Empty,
    #[error("image payload is not valid base64")]
    InvalidEncoding,
    #[error("image type could not be determined, expected jpeg, png or gif")]
    UnsupportedFormat,
    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// Raster formats accepted for recipe images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    /// Sniff the format from the leading magic bytes.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
        }
    }
}

/// Decode a base64 payload, optionally prefixed with a `data:<mime>;base64,` header.
pub fn decode_image(payload: &str) -> Result<(ImageFormat, Vec<u8>), ImageError> {
    let encoded = match payload.split_once(";base64,") {
        Some((_, data)) => data,
        None => payload,
    };
    let encoded: String = encoded.chars().filter(|ch| !ch.is_whitespace()).collect();
    if encoded.is_empty() {
        return Err(ImageError::Empty);
    }

    let bytes = STANDARD
        .decode(encoded.as_bytes())
        .map_err(|_| ImageError::InvalidEncoding)?;
    let format = ImageFormat::detect(&bytes).ok_or(ImageError::UnsupportedFormat)?;

    Ok((format, bytes))
}

/// Persists decoded images and hands back the reference stored on the recipe.
pub trait ImageStore {
    fn store(&self, payload: &str) -> Result<String, ImageError>;

    /// Drops a previously stored image. References this store did not issue are ignored.
    fn remove(&self, reference: &str) -> Result<(), ImageError>;
}

/// Writes images under `<root>/recipes/` and returns `<url_prefix>/recipes/<file>`.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
    url_prefix: String,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }
}

impl ImageStore for FsImageStore {
    fn store(&self, payload: &str) -> Result<String, ImageError> {
        let (format, bytes) = decode_image(payload)?;

        let directory = self.root.join("recipes");
        fs::create_dir_all(&directory)?;

        let file_name = format!("{}.{}", Uuid::new_v4(), format.extension());
        fs::write(directory.join(&file_name), bytes)?;

        Ok(format!("{}/recipes/{file_name}", self.url_prefix))
    }

    fn remove(&self, reference: &str) -> Result<(), ImageError> {
        let prefix = format!("{}/recipes/", self.url_prefix);
        let Some(file_name) = reference.strip_prefix(prefix.as_str()) else {
            return Ok(());
        };
        if file_name.is_empty() || file_name.starts_with('.') || file_name.contains(['/', '\\']) {
            return Ok(());
        }

        match fs::remove_file(self.root.join("recipes").join(file_name)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}
