//! Result type alias for geobundle
//!
//! This module provides a convenient Result type alias that uses BundleError
//! as the error type.

use super::errors::BundleError;

/// Result type alias for geobundle operations
///
/// # Examples
///
/// ```
/// use geobundle::domain::result::Result;
/// use geobundle::domain::errors::BundleError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(BundleError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BundleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
