/// Result-screen entry gate
///
/// Decides what happens when the result screen receives (or fails to
/// receive) an image reference: normalize it, confirm the upload file is on
/// disk, and only then allow a network request.
use crate::normalize;
use std::path::{Path, PathBuf};

/// Outcome of preparing an image for upload
#[derive(Debug)]
pub enum Analysis {
    /// No image reference was handed over
    MissingImage,
    /// Normalization failed; the message is shown to the user verbatim
    Failed(String),
    /// The normalized file exists on disk and may be uploaded
    Ready(PathBuf),
}

/// Prepare an image for upload. No network request is ever issued for
/// `MissingImage` or `Failed`.
pub fn begin(image: Option<&Path>) -> Analysis {
    let Some(image) = image else {
        return Analysis::MissingImage;
    };

    match normalize::normalize_image(image) {
        Ok(upload) if upload.exists() => Analysis::Ready(upload),
        Ok(_) => Analysis::Failed("Invalid image file!".to_string()),
        Err(e) => Analysis::Failed(e.to_string()),
    }
}
