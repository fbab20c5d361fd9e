//! Parsing of output destination codes.
//!
//! A destination is written as a short, case-sensitive code: `D` (download),
//! `F` (file), `I` (inline) or `S` (string). `F` may be combined with exactly
//! one of the other codes, in which case the file is written first and the
//! other code is dispatched afterwards.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Code for sending the document as an attachment.
pub const DOWNLOAD: char = 'D';
/// Code for writing the document to `path/name`.
pub const FILE: char = 'F';
/// Code for sending the document for inline display.
pub const INLINE: char = 'I';
/// Code for returning the document bytes.
pub const STRING: char = 'S';

/// Delivery performed after the optional file write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Download,
    Inline,
    String,
}

impl Dispatch {
    fn from_code(code: char) -> Option<Self> {
        match code {
            DOWNLOAD => Some(Self::Download),
            INLINE => Some(Self::Inline),
            STRING => Some(Self::String),
            _ => None,
        }
    }

    fn code(self) -> char {
        match self {
            Self::Download => DOWNLOAD,
            Self::Inline => INLINE,
            Self::String => STRING,
        }
    }
}

/// A parsed destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Destination {
    write_file: bool,
    dispatch: Option<Dispatch>,
}

impl Destination {
    /// Destination that writes a file and optionally dispatches afterwards.
    pub fn file(dispatch: Option<Dispatch>) -> Self {
        Self {
            write_file: true,
            dispatch,
        }
    }

    /// Destination that only dispatches.
    pub fn dispatch(dispatch: Dispatch) -> Self {
        Self {
            write_file: false,
            dispatch: Some(dispatch),
        }
    }

    /// Whether the document is written to disk.
    pub fn writes_file(&self) -> bool {
        self.write_file
    }

    /// The delivery performed after the file write, if any.
    pub fn dispatch_kind(&self) -> Option<Dispatch> {
        self.dispatch
    }

    /// Whether resolving this destination requires a document name.
    pub fn requires_name(&self) -> bool {
        self.write_file || matches!(self.dispatch, Some(Dispatch::Download | Dispatch::Inline))
    }

    /// Whether nothing at all happens for this destination.
    pub fn is_empty(&self) -> bool {
        !self.write_file && self.dispatch.is_none()
    }
}

impl FromStr for Destination {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidDestination(code.to_owned());

        let mut write_file = false;
        let mut dispatch = None;
        for ch in code.chars() {
            if ch == FILE {
                if write_file {
                    return Err(invalid());
                }
                write_file = true;
            } else {
                let kind = Dispatch::from_code(ch).ok_or_else(invalid)?;
                if dispatch.replace(kind).is_some() {
                    return Err(invalid());
                }
            }
        }

        Ok(Self {
            write_file,
            dispatch,
        })
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.write_file {
            write!(f, "{FILE}")?;
        }
        if let Some(dispatch) = self.dispatch {
            write!(f, "{}", dispatch.code())?;
        }
        Ok(())
    }
}
