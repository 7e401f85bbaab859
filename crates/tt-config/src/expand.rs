//! Environment variable expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(
            expand_env("https://techtext.dev/", "site.website").unwrap(),
            "https://techtext.dev/"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        let value = expand_env(
            "${TT_CONFIG_TEST_SURELY_UNSET:-https://fallback.dev/}",
            "site.website",
        )
        .unwrap();
        assert_eq!(value, "https://fallback.dev/");
    }

    #[test]
    fn test_unset_variable_errors() {
        let err = expand_env("${TT_CONFIG_TEST_SURELY_UNSET}", "site.website").unwrap_err();
        match err {
            ConfigError::EnvVar { field, message } => {
                assert_eq!(field, "site.website");
                assert!(message.contains("TT_CONFIG_TEST_SURELY_UNSET"));
            }
            other => panic!("expected EnvVar error, got {other:?}"),
        }
    }
}
