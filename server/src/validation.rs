use validator::Validate;

use crate::error::{ServiceError, ServiceResult};

#[derive(Validate)]
struct UsernameValidator {
    #[validate(length(min = 1, message = "username must not be blank"))]
    username: String,
}

/// Trims `username` and rejects it when nothing is left.
pub fn validate_username(username: &str) -> ServiceResult<String> {
    let validator = UsernameValidator {
        username: username.trim().to_string(),
    };
    if let Err(e) = validator.validate() {
        return ServiceError::bad_request(format!("Invalid username: {}", e));
    }
    Ok(validator.username)
}
