use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// Metadata or options rejected before rendering starts.
    Validation(String),
    UnknownBlock(String),
    InvalidBlock(String),
    /// Any failure from the encoder, wrapped once.
    Export(String),
    Zip(zip::result::ZipError),
    Xml(quick_xml::Error),
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Validation(msg) => write!(f, "Invalid document: {msg}"),
            Error::UnknownBlock(id) => write!(f, "No block with id {id}"),
            Error::InvalidBlock(msg) => write!(f, "Invalid block: {msg}"),
            Error::Export(msg) => write!(f, "Export failed: {msg}"),
            Error::Zip(e) => write!(f, "ZIP error: {e}"),
            Error::Xml(e) => write!(f, "XML error: {e}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Zip(e) => Some(e),
            Error::Xml(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
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

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::Xml(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
