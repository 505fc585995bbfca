use crate::error::ApiError;

/// Existence guard: narrows an optional lookup result to "definitely
/// present", failing with a 404 naming the resource otherwise.
pub fn found<T>(value: Option<T>, resource: &str) -> Result<T, ApiError> {
    found_or(value, resource, "not found")
}

/// Variant with a custom message suffix, e.g. `found_or(user, "User",
/// "email is invalid")` on the login path.
pub fn found_or<T>(value: Option<T>, resource: &str, message: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::NotFound(format!("{resource} {message}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_value_fails_with_labelled_404() {
        let err = found::<()>(None, "Place").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "Place not found");
    }

    #[test]
    fn custom_suffix_is_embedded() {
        let err = found_or::<()>(None, "User", "email is invalid").unwrap_err();
        assert_eq!(err.to_string(), "User email is invalid");
    }

    #[test]
    fn present_value_is_narrowed() {
        assert_eq!(found(Some(7), "Event").unwrap(), 7);
    }
}
