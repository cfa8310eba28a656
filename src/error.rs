use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// A sample image could not be read from disk.
    ImageRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A sample image was read but could not be decoded for embedding.
    ImageDecode { name: String, reason: String },
    /// A page referenced an image slot that was never loaded.
    MissingImage { page: u32, file: String },
    Zip(zip::result::ZipError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::ImageRead { path, source } => {
                write!(f, "cannot read image {}: {source}", path.display())
            }
            Error::ImageDecode { name, reason } => {
                write!(f, "cannot decode image {name}: {reason}")
            }
            Error::MissingImage { page, file } => {
                write!(f, "page {page} references image {file}, which is not loaded")
            }
            Error::Zip(e) => write!(f, "DOCX packaging error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::ImageRead { source, .. } => Some(source),
            Error::Zip(e) => Some(e),
            Error::ImageDecode { .. } | Error::MissingImage { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Zip(e)
    }
}
