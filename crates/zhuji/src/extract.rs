//! Text sources other than raw strings.
//!
//! OCR itself is an external collaborator; this crate only defines the seam.

use std::path::Path;

use crate::errors::ExtractionError;

/// Extracts text from an image (OCR or any other recogniser).
pub trait TextExtractor: Send + Sync {
  /// Returns the recognised text of the image at `image`.
  fn extract_text(&self, image: &Path) -> Result<String, ExtractionError>;
}

impl<F> TextExtractor for F
where
  F: Fn(&Path) -> Result<String, ExtractionError> + Send + Sync,
{
  fn extract_text(&self, image: &Path) -> Result<String, ExtractionError> {
    self(image)
  }
}
