//! Payloads exchanged with the submission and generation collaborators.

use crate::export::{ExportError, data_url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A labelled handwriting sample bound for a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// What was drawn. Any non-empty string; length policy belongs to the backend.
    pub label: String,
    /// `data:image/png;base64,...` export of the surface
    pub image: String,
    /// Contributor name
    pub user: String,
}

impl TrainingSample {
    /// Checks the request the way the storage endpoint does before accepting it.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.label.is_empty() {
            return Err(ServiceError::MissingField("label"));
        }
        if self.image.is_empty() {
            return Err(ServiceError::MissingField("image"));
        }
        if self.user.is_empty() {
            return Err(ServiceError::MissingField("user"));
        }
        if !data_url::is_png_data_url(&self.image) {
            return Err(ServiceError::InvalidImage(
                "image is not a PNG data URL".to_string(),
            ));
        }
        Ok(())
    }

    /// Decodes the embedded PNG.
    pub fn png_bytes(&self) -> Result<Vec<u8>, ServiceError> {
        Ok(data_url::decode_png(&self.image)?)
    }
}

/// Acknowledgement returned by a sink after storing a sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Backend identifier of the stored file
    #[serde(rename = "fileId")]
    pub file_id: String,
}

/// Request for a generated image of one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub character: String,
}

/// Successful generation response carrying a raw base64 PNG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(alias = "image_base64")]
    pub image: String,
}

/// Error body returned by either collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(alias = "error")]
    pub detail: String,
}

/// Errors surfaced to the host when talking to a collaborator.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Nothing has been drawn yet")]
    EmptyDrawing,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("{detail}")]
    Rejected { detail: String },

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ErrorDetail> for ServiceError {
    fn from(error: ErrorDetail) -> Self {
        ServiceError::Rejected {
            detail: error.detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrainingSample {
        TrainingSample {
            label: "a".into(),
            image: "data:image/png;base64,AAAA".into(),
            user: "sam".into(),
        }
    }

    #[test]
    fn complete_sample_validates() {
        sample().validate().unwrap();
    }

    #[test]
    fn each_missing_field_is_named() {
        for (field, mutate) in [
            ("label", (|s: &mut TrainingSample| s.label.clear()) as fn(&mut TrainingSample)),
            ("image", |s| s.image.clear()),
            ("user", |s| s.user.clear()),
        ] {
            let mut s = sample();
            mutate(&mut s);
            match s.validate() {
                Err(ServiceError::MissingField(name)) => assert_eq!(name, field),
                other => panic!("expected missing {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_png_image_is_rejected() {
        let mut s = sample();
        s.image = "data:image/jpeg;base64,AAAA".into();
        assert!(matches!(s.validate(), Err(ServiceError::InvalidImage(_))));
    }

    #[test]
    fn multi_character_labels_are_allowed() {
        let mut s = sample();
        s.label = "th".into();
        s.validate().unwrap();
    }

    #[test]
    fn payloads_use_wire_names() {
        let receipt = serde_json::to_value(SubmissionReceipt {
            file_id: "42".into(),
        })
        .unwrap();
        assert_eq!(receipt, serde_json::json!({ "fileId": "42" }));

        let response: GenerateResponse =
            serde_json::from_str(r#"{"image_base64":"QUJD"}"#).unwrap();
        assert_eq!(response.image, "QUJD");

        let detail: ErrorDetail = serde_json::from_str(r#"{"error":"quota"}"#).unwrap();
        assert_eq!(ServiceError::from(detail).to_string(), "quota");
    }
}
