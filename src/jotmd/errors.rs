use std::fmt;
use std::convert::From;
use std::error::Error as StdError;
use std::io::Error as IoError;
use std::path::Path;
use std::time::SystemTimeError;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug)]
pub enum ErrorKind {
    /// date argument matched none of the accepted formats
    InvalidDate,
    FileSystem(IoError),
    /// the year file changed on disk between read and write
    ConcurrentModification,
    Generic,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub desc: String,
    pub detail: Option<String>,
}

impl Error {
    pub fn invalid_date(input: &str) -> Error {
        Error {
            kind: ErrorKind::InvalidDate,
            desc: format!("Invalid date '{}'. Use YYYY-MM-DD, MM/DD/YYYY, or MMDDYYYY.",
                          input),
            detail: None,
        }
    }

    /// wrap an io error with the path it happened on
    pub fn file_system<P: AsRef<Path>>(err: IoError, action: &str, path: P) -> Error {
        Error {
            desc: format!("failed to {} {}", action, path.as_ref().display()),
            detail: Some(err.to_string()),
            kind: ErrorKind::FileSystem(err),
        }
    }

    pub fn concurrent_modification<P: AsRef<Path>>(path: P) -> Error {
        Error {
            kind: ErrorKind::ConcurrentModification,
            desc: format!("{} was modified on disk while writing; nothing was written",
                          path.as_ref().display()),
            detail: None,
        }
    }

    pub fn is_invalid_date(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidDate)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.detail {
            Some(ref detail) => write!(f, "{}: {}", &self.desc, detail),
            None => write!(f, "{}", &self.desc),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.kind {
            ErrorKind::FileSystem(ref e) => Some(e),
            _ => None,
        }
    }
}

#[macro_export]
macro_rules! specific_fail {
    ($short:expr) => {{
        use $crate::errors::{Error, ErrorKind};
        Err(::std::convert::From::from(
            Error {
                kind: ErrorKind::Generic,
                desc: $short,
                detail: None
            }
        ))
    }}
}

#[macro_export]
macro_rules! specific_fail_str {
    ($s:expr) => {
        $crate::specific_fail!($s.to_string())
    }
}

impl From<IoError> for Error {
    fn from(err: IoError) -> Error {
        Error {
            desc: err.to_string(),
            detail: None,
            kind: ErrorKind::FileSystem(err),
        }
    }
}

impl From<SystemTimeError> for Error {
    fn from(err: SystemTimeError) -> Error {
        Error {
            kind: ErrorKind::Generic,
            desc: err.to_string(),
            detail: None,
        }
    }
}
