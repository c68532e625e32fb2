//! Bridge between `validator` derive output and [`CoreError`].

use validator::Validate;

use crate::error::CoreError;

/// Run the derived field validations of `record`.
pub fn validate_record<T: Validate>(record: &T) -> Result<(), CoreError> {
    record
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}
