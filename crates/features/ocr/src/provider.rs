use crate::error::OcrError;
use crate::model::OcrResult;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// OCR engines selectable through `OCR_PROVIDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrProvider {
    Tesseract,
    GoogleVision,
    AwsTextract,
}

impl OcrProvider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tesseract => "tesseract",
            Self::GoogleVision => "google_vision",
            Self::AwsTextract => "aws_textract",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Tesseract => "Tesseract",
            Self::GoogleVision => "Google Vision",
            Self::AwsTextract => "AWS Textract",
        }
    }

    /// Cloud engines authenticate with `OCR_API_KEY`.
    #[must_use]
    pub const fn is_cloud(self) -> bool {
        !matches!(self, Self::Tesseract)
    }

    #[must_use]
    pub const fn confidence(self) -> f64 {
        match self {
            Self::Tesseract => 0.95,
            Self::GoogleVision => 0.98,
            Self::AwsTextract => 0.97,
        }
    }

    /// Runs the (placeholder) recognition for this provider.
    #[must_use]
    pub fn recognize(self, image: &[u8]) -> OcrResult {
        info!(provider = self.as_str(), bytes = image.len(), "Processing OCR");
        warn!("{} OCR is a placeholder; no text is extracted", self.label());

        let text = match self {
            Self::Tesseract => "Placeholder OCR text - implement actual OCR processing",
            Self::GoogleVision => "Placeholder OCR text - implement actual Google Vision processing",
            Self::AwsTextract => "Placeholder OCR text - implement actual AWS Textract processing",
        };

        OcrResult {
            text: text.to_owned(),
            confidence: self.confidence(),
            provider: self.as_str().to_owned(),
        }
    }
}

impl FromStr for OcrProvider {
    type Err = OcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "tesseract" => Ok(Self::Tesseract),
            "google_vision" => Ok(Self::GoogleVision),
            "aws_textract" => Ok(Self::AwsTextract),
            _ => Err(OcrError::UnknownProvider { name: s.to_owned() }),
        }
    }
}

impl fmt::Display for OcrProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
