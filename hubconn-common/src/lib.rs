//! Common utilities for the hubconn connection builder

pub mod error;

pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use crate::Error;

    #[test]
    fn test_not_found_mentions_the_missing_code() {
        let err = Error::NotFound("XYZ".to_string());
        assert!(err.to_string().contains("XYZ"));
    }
}
