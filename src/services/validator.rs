use thiserror::Error;

use crate::models::UploadCandidate;

pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

const ALLOWED_MIME_TYPES: [&str; 4] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "application/pdf",
];

/// Why a candidate was refused. Messages are shown to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("Please select a valid file type (JPG, PNG, or PDF)")]
    UnsupportedType,
    #[error("File size must be less than 16MB")]
    TooLarge,
}

/// Accept or reject a candidate before any network call. Pure and total:
/// the size cap is checked first, so an oversized file is `TooLarge` no
/// matter its type.
pub fn validate(candidate: &UploadCandidate) -> Result<(), RejectionReason> {
    if candidate.size_bytes > MAX_UPLOAD_BYTES {
        return Err(RejectionReason::TooLarge);
    }
    if !ALLOWED_MIME_TYPES.contains(&candidate.mime_type.as_str()) {
        return Err(RejectionReason::UnsupportedType);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(mime_type: &str, size_bytes: u64) -> UploadCandidate {
        UploadCandidate {
            file_name: "doc".to_string(),
            mime_type: mime_type.to_string(),
            size_bytes,
        }
    }

    #[test]
    fn accepts_every_supported_type_at_the_cap() {
        for mime in ALLOWED_MIME_TYPES {
            assert_eq!(validate(&candidate(mime, MAX_UPLOAD_BYTES)), Ok(()));
        }
    }

    #[test]
    fn oversized_files_reject_too_large_regardless_of_type() {
        for mime in ["image/png", "application/pdf", "text/plain", "video/mp4"] {
            assert_eq!(
                validate(&candidate(mime, MAX_UPLOAD_BYTES + 1)),
                Err(RejectionReason::TooLarge)
            );
        }
    }

    #[test]
    fn unsupported_types_reject() {
        for mime in ["text/plain", "image/gif", "application/zip", "application/octet-stream"] {
            assert_eq!(
                validate(&candidate(mime, 1024)),
                Err(RejectionReason::UnsupportedType)
            );
        }
    }

    #[test]
    fn empty_file_of_supported_type_is_accepted() {
        assert_eq!(validate(&candidate("image/jpeg", 0)), Ok(()));
    }
}
