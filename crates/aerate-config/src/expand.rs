//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the config field in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_env_default_used() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("AERATE_EXPAND_UNSET");
        }
        assert_eq!(
            expand_env("${AERATE_EXPAND_UNSET:-build/xml}", "input.xml_dir").unwrap(),
            "build/xml"
        );
    }

    #[test]
    fn test_expand_env_set() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("AERATE_EXPAND_SET", "/tmp/xml");
        }
        assert_eq!(
            expand_env("${AERATE_EXPAND_SET}/sub", "input.xml_dir").unwrap(),
            "/tmp/xml/sub"
        );
        unsafe {
            std::env::remove_var("AERATE_EXPAND_SET");
        }
    }

    #[test]
    fn test_expand_env_missing() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("AERATE_EXPAND_MISSING");
        }
        let err = expand_env("${AERATE_EXPAND_MISSING}", "output.dir").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in output.dir: ${AERATE_EXPAND_MISSING} not set"
        );
    }
}
