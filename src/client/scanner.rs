use std::path::{Path, PathBuf};

use crate::client::api::{ApiClient, CreatedItem};
use crate::client::decode::{decode_image, DecodeOutcome};
use crate::client::error::ClientError;
use crate::client::upload::check_upload;

/// Categories offered by the capture form. The server stores whatever it is
/// given; this set is a client-side convention only.
pub const CATEGORIES: &[&str] = &["brakes", "frame", "tires", "drivetrain", "other"];

/// An item being put together before submission.
#[derive(Debug, Default, Clone)]
pub struct ItemDraft {
    pub title: Option<String>,
    pub gtin: String,
    pub category: String,
    pub image: Option<PathBuf>,
}

impl ItemDraft {
    /// Attach a photo and try to read a barcode out of it. A file outside
    /// the allow-list is rejected outright; a failed decode clears the gtin
    /// and reports `NotFound` so the caller can tell the user. Submission
    /// stays possible either way.
    pub fn attach_image(&mut self, path: &Path) -> Result<DecodeOutcome, ClientError> {
        check_upload(path)?;
        self.image = Some(path.to_path_buf());

        let outcome = decode_image(path);
        match &outcome {
            DecodeOutcome::Found(decoded) => self.gtin = decoded.text.clone(),
            DecodeOutcome::NotFound => self.gtin.clear(),
        }

        Ok(outcome)
    }

    /// Submit the draft and hand back the id the server assigned.
    pub async fn submit(&self, api: &ApiClient) -> Result<CreatedItem, ClientError> {
        api.add_item(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_file_type_leaves_the_draft_untouched() {
        let mut draft = ItemDraft {
            gtin: "012345678905".to_string(),
            ..ItemDraft::default()
        };

        let result = draft.attach_image(Path::new("manual.pdf"));

        assert!(matches!(result, Err(ClientError::BadUpload(_))));
        assert!(draft.image.is_none());
        assert_eq!(draft.gtin, "012345678905");
    }

    #[test]
    fn failed_decode_clears_the_gtin_but_keeps_the_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.png");
        // A flat white image that cannot contain a barcode.
        image::RgbImage::from_pixel(64, 64, image::Rgb([255, 255, 255]))
            .save(&path)
            .unwrap();

        let mut draft = ItemDraft {
            gtin: "stale".to_string(),
            ..ItemDraft::default()
        };

        let outcome = draft.attach_image(&path).unwrap();

        assert_eq!(outcome, DecodeOutcome::NotFound);
        assert_eq!(draft.gtin, "");
        assert_eq!(draft.image.as_deref(), Some(path.as_path()));
    }
}
