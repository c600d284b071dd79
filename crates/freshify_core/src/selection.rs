//! Image acquisition: reading a chosen or dropped file and decoding a preview.

use crate::error::LoadError;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extensions offered by the file dialog. Drops are not filtered.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Longest edge of the decoded preview; larger images are downscaled.
pub const PREVIEW_MAX_EDGE: u32 = 1024;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file the user picked or dropped, held in memory until replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    /// Source on disk, absent for drops that only carry bytes.
    pub path: Option<PathBuf>,
    pub file_name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedImage {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let mut selected = Self::from_bytes(file_name, bytes);
        selected.path = Some(path.to_path_buf());
        Ok(selected)
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let file_name = file_name.into();
        let bytes = bytes.into();
        let mime = guess_mime(&file_name, &bytes);
        Self {
            path: None,
            file_name,
            mime,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the bytes into an RGBA preview no larger than `PREVIEW_MAX_EDGE`.
    pub fn decode_preview(&self) -> Result<Preview, LoadError> {
        let img = image::load_from_memory(&self.bytes).map_err(|source| LoadError::Decode {
            name: self.file_name.clone(),
            source,
        })?;
        // `DynamicImage::thumbnail` fits within the bounds and keeps the aspect ratio.
        let rgba = if img.width() > PREVIEW_MAX_EDGE || img.height() > PREVIEW_MAX_EDGE {
            img.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE).to_rgba8()
        } else {
            img.to_rgba8()
        };
        let (width, height) = rgba.dimensions();
        Ok(Preview {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

/// Decoded pixels ready to be uploaded as a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    /// Unmultiplied RGBA, row-major.
    pub rgba: Vec<u8>,
}

/// An image together with its decoded preview.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: SelectedImage,
    pub preview: Preview,
}

impl LoadedImage {
    pub fn from_selected(image: SelectedImage) -> Result<Self, LoadError> {
        let preview = image.decode_preview()?;
        Ok(Self { image, preview })
    }
}

/// Source of a selection as reported by the picker or a drop.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes { name: String, bytes: Arc<[u8]> },
}

impl ImageSource {
    pub fn display_name(&self) -> String {
        match self {
            ImageSource::Path(p) => p.display().to_string(),
            ImageSource::Bytes { name, .. } => name.clone(),
        }
    }

    /// Read (if needed) and decode.
    pub fn load(self) -> Result<LoadedImage, LoadError> {
        let selected = match self {
            ImageSource::Path(path) => SelectedImage::from_path(path)?,
            ImageSource::Bytes { name, bytes } => SelectedImage::from_bytes(name, bytes),
        };
        LoadedImage::from_selected(selected)
    }
}

fn guess_mime(file_name: &str, bytes: &[u8]) -> String {
    ImageFormat::from_path(file_name)
        .ok()
        .or_else(|| image::guess_format(bytes).ok())
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_else(|| FALLBACK_MIME.to_string())
}
