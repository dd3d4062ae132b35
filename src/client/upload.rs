use std::path::Path;

use crate::client::error::ClientError;

/// Raster formats accepted for upload. Anything else is rejected before a
/// decode is attempted.
pub const ACCEPTED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// Check a file against the allow-list and hand back its content type.
pub fn check_upload(path: &Path) -> Result<&'static str, ClientError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    ACCEPTED_IMAGE_TYPES
        .iter()
        .find(|(accepted, _)| *accepted == extension)
        .map(|(_, content_type)| *content_type)
        .ok_or_else(|| {
            ClientError::BadUpload(format!(
                "Unsupported file type \"{}\". Use one of: jpg, jpeg, png, gif, webp, bmp, tif, tiff",
                extension
            ))
        })
}
