//! Logo files as embeddable data URLs

use base64::Engine;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logo file is empty: {0}")]
    Empty(String),
}

/// `data:<mime>;base64,<payload>`
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

/// Read an image file and encode it as a data URL.
///
/// The mime type is guessed from the extension.
pub fn load_logo(path: &Path) -> Result<String, LogoError> {
    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Err(LogoError::Empty(path.display().to_string()));
    }
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(to_data_url(mime.essence_str(), &bytes))
}
