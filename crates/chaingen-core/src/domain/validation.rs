use crate::domain::error::DomainError;
use crate::domain::variables::Variables;

/// Characters that would break out of a `set(...)` or `$<...>` expression.
const FORBIDDEN_IN_NAME: &[char] = &['(', ')', '"', '$', '{', '}', '#', ';', '<', '>', '\\'];

/// Centralized domain validation.
///
/// Names end up verbatim inside generated CMake, so they are checked here
/// once, before any rendering.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_variable_name(name: &str) -> Result<(), DomainError> {
        let reason = if name.is_empty() {
            Some("name is empty".to_string())
        } else if name.chars().any(char::is_whitespace) {
            Some("contains whitespace".to_string())
        } else {
            name.chars()
                .find(|c| FORBIDDEN_IN_NAME.contains(c))
                .map(|c| format!("contains '{c}'"))
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidVariableName {
                name: name.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Configuration names go into `$<CONFIG:name>`.
    pub fn validate_configuration_name(name: &str) -> Result<(), DomainError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidConfiguration {
                name: name.to_string(),
            })
        }
    }

    /// Every name and configuration of a store.
    pub fn validate_variables(variables: &Variables) -> Result<(), DomainError> {
        for (name, _) in variables.global() {
            Self::validate_variable_name(name)?;
        }
        for configuration in variables.configurations() {
            Self::validate_configuration_name(configuration)?;
        }
        for name in variables.reverse_index().keys() {
            Self::validate_variable_name(name)?;
        }
        Ok(())
    }
}
