use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn buffer_too_small(required: usize, actual: usize) -> Error {
        Error(ErrorKind::BufferTooSmall { required, actual }.into())
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("word buffer is too small: {required} words required, {actual} provided")]
    BufferTooSmall { required: usize, actual: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_roundtrip() {
        let err = Error::invalid_arg("field_width", "1 <= field_width <= 64");
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
        assert_eq!(
            err.to_string(),
            "invalid argument field_width: 1 <= field_width <= 64"
        );
        match err.into_kind() {
            ErrorKind::InvalidArgument { name, .. } => assert_eq!(name, "field_width"),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_buffer_too_small_message() {
        let err = Error::buffer_too_small(7, 3);
        assert_eq!(
            err.to_string(),
            "word buffer is too small: 7 words required, 3 provided"
        );
    }
}
