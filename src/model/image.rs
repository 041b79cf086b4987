//! Embedding of uploaded images into recipes.
//!
//! Recipes carry their image inline as a `data:` URL so the whole collection
//! stays a single self-contained JSON document.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Errors that can occur when embedding an image.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(Utf8PathBuf),
}

/// Returns the mime type for a supported image file, based on its extension.
///
/// Supported extensions: jpg, jpeg, png, webp, gif (case-insensitive)
pub fn mime_for_path(path: &Utf8Path) -> Option<&'static str> {
    let ext = path.extension()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Encodes raw image bytes as a `data:` URL.
pub fn encode_image_bytes(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Reads an image file and returns it as a `data:` URL ready to be stored in
/// [`Recipe::image`](crate::Recipe::image).
///
/// # Errors
///
/// Returns `ImageError::UnsupportedFormat` for unknown extensions (checked
/// before touching the filesystem) and `ImageError::IoError` if the file
/// cannot be read.
pub fn encode_image_file(path: &Utf8Path) -> Result<String, ImageError> {
    let mime =
        mime_for_path(path).ok_or_else(|| ImageError::UnsupportedFormat(path.to_path_buf()))?;
    let bytes = std::fs::read(path)?;
    Ok(encode_image_bytes(&bytes, mime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Utf8Path::new("a/cake.JPG")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Utf8Path::new("cake.webp")), Some("image/webp"));
        assert_eq!(mime_for_path(Utf8Path::new("cake.txt")), None);
        assert_eq!(mime_for_path(Utf8Path::new("cake")), None);
    }

    #[test]
    fn test_encode_image_bytes() {
        assert_eq!(
            encode_image_bytes(b"hi", "image/png"),
            "data:image/png;base64,aGk="
        );
    }

    #[test]
    fn test_encode_image_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();
        let path = dir.join("cake.png");
        fs::write(&path, b"hi").unwrap();

        let url = encode_image_file(&path).unwrap();
        assert_eq!(url, "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_encode_image_file_errors() {
        let result = encode_image_file(Utf8Path::new("notes.txt"));
        assert!(matches!(result, Err(ImageError::UnsupportedFormat(_))));

        let result = encode_image_file(Utf8Path::new("/nonexistent/cake.png"));
        assert!(matches!(result, Err(ImageError::IoError(_))));
    }
}
