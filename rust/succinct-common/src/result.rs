pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

/// Returns a `BufferTooSmall` error from the enclosing function unless the
/// word buffer `$words` holds at least `$required` words.
#[macro_export]
macro_rules! verify_buffer {
    ($words:expr, $required:expr) => {{
        let required: usize = $required;
        $crate::result::verify_buffer(required, $words.len())?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[inline]
pub fn verify_buffer(required: usize, actual: usize) -> Result<()> {
    if actual >= required {
        Ok(())
    } else {
        Err(crate::error::Error::buffer_too_small(required, actual))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn check_width(field_width: usize) -> crate::Result<usize> {
        verify_arg!(field_width, (1..=64).contains(&field_width));
        Ok(field_width)
    }

    #[test]
    fn test_verify_arg_macro() {
        assert_eq!(check_width(13).unwrap(), 13);
        let err = check_width(0).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "field_width");
                assert!(message.contains("contains"));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    fn check_buffer(words: &[u64], required: usize) -> crate::Result<()> {
        verify_buffer!(words, required);
        Ok(())
    }

    #[test]
    fn test_verify_buffer_macro() {
        let words = [0u64; 4];
        assert!(check_buffer(&words, 0).is_ok());
        assert!(check_buffer(&words, 4).is_ok());
        assert!(check_buffer(&words[..2], 4).is_err());
        match check_buffer(&words, 5).unwrap_err().into_kind() {
            ErrorKind::BufferTooSmall { required, actual } => {
                assert_eq!(required, 5);
                assert_eq!(actual, 4);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }
}
