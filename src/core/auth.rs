use crate::core::providers::FetchError;

/// Read the API token from the environment variable `env_name`.
///
/// A missing or blank variable is a credential error, recorded in the report
/// like any other fetch failure.
pub fn read_token(env_name: &str) -> Result<String, FetchError> {
    match std::env::var(env_name) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(FetchError::CredentialMissing(env_name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn read_token_from_env() {
        std::env::set_var("DOCOST_TEST_TOKEN", "dop_v1_abc\n");
        let token = read_token("DOCOST_TEST_TOKEN");
        std::env::remove_var("DOCOST_TEST_TOKEN");
        assert_eq!(token.unwrap(), "dop_v1_abc");
    }

    #[test]
    #[serial]
    fn read_token_missing() {
        std::env::remove_var("DOCOST_TEST_TOKEN_MISSING");
        let err = read_token("DOCOST_TEST_TOKEN_MISSING").unwrap_err();
        assert!(matches!(err, FetchError::CredentialMissing(_)));
        assert!(err.to_string().contains("DOCOST_TEST_TOKEN_MISSING"));
    }

    #[test]
    #[serial]
    fn read_token_blank_is_missing() {
        std::env::set_var("DOCOST_TEST_TOKEN_BLANK", "   ");
        let err = read_token("DOCOST_TEST_TOKEN_BLANK").unwrap_err();
        std::env::remove_var("DOCOST_TEST_TOKEN_BLANK");
        assert!(matches!(err, FetchError::CredentialMissing(_)));
    }
}
