use cardsmith_core::{name_len, normalize_name};
use cardsmith_settings::NameSettings;

use crate::error::ValidationError;

/// Trim `raw` and check it against the configured length limits.
pub fn validate_name<'a>(raw: &'a str, settings: &NameSettings) -> Result<&'a str, ValidationError> {
    let name = normalize_name(raw);
    let len = name_len(name);
    if len == 0 {
        Err(ValidationError::Empty)
    } else if len < settings.min_check_chars {
        Err(ValidationError::TooShort {
            min: settings.min_check_chars,
        })
    } else if len > settings.max_chars {
        Err(ValidationError::TooLong {
            max: settings.max_chars,
        })
    } else {
        Ok(name)
    }
}
