use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single `(state, size)` generation or of persisting its bytes.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Canvas side length outside the supported domain.
    #[error("invalid icon size {size}: must be between {min} and {max}", min = crate::geometry::MIN_SIZE, max = crate::geometry::MAX_SIZE)]
    InvalidSize { size: u32 },

    /// Pixel buffer and declared dimensions disagree, or the codec itself failed.
    #[error("failed to encode {size}x{size} icon: {reason}")]
    Encoding { size: u32, reason: String },

    /// State name that cannot be used as a single directory name.
    #[error("invalid state name '{name}': only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidState { name: String },

    #[error("failed to decode icon")]
    Decode(#[from] image::ImageError),

    #[error("failed to write icon to {}", path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub(crate) fn encoding(size: u32, reason: impl ToString) -> Self {
        Self::Encoding {
            size,
            reason: reason.to_string(),
        }
    }
}
