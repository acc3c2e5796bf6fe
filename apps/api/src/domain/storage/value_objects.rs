use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use lazy_static::lazy_static;

use super::errors::StorageError;

/// Padding optional, stray trailing bits ignored.
const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

lazy_static! {
    static ref DATA_URL_REGEX: regex::Regex = regex::Regex::new(
        r"^data:([A-Za-z0-9!#$&^_.+\-]+(?:/[A-Za-z0-9!#$&^_.+\-]+)?);base64,(.+)$"
    )
    .unwrap();
}

/// Content type stored when the caller does not supply one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded file body, classified once at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePayload {
    /// Bare base64 text.
    RawBase64(String),
    /// `data:<mime>;base64,<data>`. The MIME type is kept for reference but
    /// is not applied to the stored object.
    DataUrl { mime: String, data: String },
}

impl FilePayload {
    /// Classifies an inbound payload string.
    ///
    /// Anything starting with `data:` must be a well-formed base64 data URL;
    /// everything else is taken as raw base64.
    pub fn parse(input: &str) -> Result<Self, StorageError> {
        if !input.starts_with("data:") {
            return Ok(Self::RawBase64(input.to_string()));
        }

        let captures = DATA_URL_REGEX
            .captures(input)
            .ok_or_else(|| StorageError::InvalidData("Invalid data format".into()))?;

        Ok(Self::DataUrl {
            mime: captures[1].to_string(),
            data: captures[2].to_string(),
        })
    }

    pub fn base64(&self) -> &str {
        match self {
            Self::RawBase64(data) => data,
            Self::DataUrl { data, .. } => data,
        }
    }

    pub fn mime(&self) -> Option<&str> {
        match self {
            Self::RawBase64(_) => None,
            Self::DataUrl { mime, .. } => Some(mime),
        }
    }

    /// Decodes the base64 body into raw bytes.
    ///
    /// ASCII whitespace is ignored, padding is optional and the URL-safe
    /// alphabet is accepted as well as the standard one.
    pub fn decode(&self) -> Result<Vec<u8>, StorageError> {
        let encoded = self.base64();
        let compact: String;
        let encoded = if encoded.bytes().any(|b| b.is_ascii_whitespace()) {
            compact = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            compact.as_str()
        } else {
            encoded
        };

        STANDARD_LENIENT
            .decode(encoded)
            .or_else(|e| URL_SAFE_LENIENT.decode(encoded).map_err(|_| e))
            .map_err(|e| StorageError::InvalidData(format!("Invalid base64 payload: {}", e)))
    }
}

/// Picks the stored content type: the caller's value, or the default when
/// it is missing or empty.
pub fn effective_content_type(content_type: Option<&str>) -> &str {
    content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
