use std::path::{Path, PathBuf};

use image::ImageError;

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("failed to encode '{}' as ICO: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

impl ConversionError {
    /// The source image the failure belongs to.
    pub fn path(&self) -> &Path {
        match self {
            ConversionError::Decode { path, .. } | ConversionError::Encode { path, .. } => path,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurationError {
    #[error("Please select a destination folder first.")]
    NoDestination,
    #[error("No images to convert. Please drag and drop files.")]
    NoFiles,
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
}
