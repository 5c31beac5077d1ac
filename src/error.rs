//! Error type.

use glutin;
use std::{error, ffi, fmt};

/// Unrecoverable startup and presentation failures.
#[derive(Debug)]
pub enum Error {
    /// The window or its OpenGL context could not be created.
    Creation(glutin::CreationError),

    /// The context could not be made current or its buffers swapped.
    Context(glutin::ContextError),

    /// Shader source text contained an interior NUL byte.
    Source(ffi::NulError),

    /// A GLSL identifier was not a NUL-terminated C string.
    Name(ffi::FromBytesWithNulError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Creation(ref err) => write!(f, "failed to create OpenGL context: {}", err),
            Error::Context(ref err) => write!(f, "OpenGL context error: {}", err),
            Error::Source(ref err) => write!(f, "invalid shader source: {}", err),
            Error::Name(ref err) => write!(f, "invalid GLSL identifier: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Creation(ref err) => Some(err),
            Error::Context(ref err) => Some(err),
            Error::Source(ref err) => Some(err),
            Error::Name(ref err) => Some(err),
        }
    }
}

impl From<glutin::CreationError> for Error {
    fn from(err: glutin::CreationError) -> Self {
        Error::Creation(err)
    }
}

impl From<glutin::ContextError> for Error {
    fn from(err: glutin::ContextError) -> Self {
        Error::Context(err)
    }
}

impl From<ffi::NulError> for Error {
    fn from(err: ffi::NulError) -> Self {
        Error::Source(err)
    }
}

impl From<ffi::FromBytesWithNulError> for Error {
    fn from(err: ffi::FromBytesWithNulError) -> Self {
        Error::Name(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::ffi::CString;

    #[test]
    fn nul_error_converts_and_keeps_its_source() {
        let err: Error = CString::new("a\0b").unwrap_err().into();
        assert!(err.to_string().starts_with("invalid shader source"));
        assert!(err.source().is_some());
    }

    #[test]
    fn unterminated_name_converts() {
        let err: Error = ffi::CStr::from_bytes_with_nul(b"color").unwrap_err().into();
        assert!(err.to_string().starts_with("invalid GLSL identifier"));
    }
}
