use super::ApiError;
use crate::constants::paging::MAX_PAGE_SIZE;
use crate::constants::staff::MAX_NAME_LENGTH;
use crate::services::{CreateAssetRequest, CreateCategoryRequest, RegisterUserRequest};

/// Pushes an error for a blank or over-long required text field.
fn check_required(errors: &mut Vec<String>, field: &str, value: &str, max_len: usize) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(format!("{field} is required"));
    } else if value.chars().count() > max_len {
        errors.push(format!("{field} must be {max_len} characters or less"));
    }
}

fn into_result(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::InvalidData(errors))
    }
}

pub fn validate_register_request(request: &RegisterUserRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    check_required(&mut errors, "FirstName", &request.first_name, MAX_NAME_LENGTH);
    check_required(&mut errors, "LastName", &request.last_name, MAX_NAME_LENGTH);
    into_result(errors)
}

pub fn validate_category_request(request: &CreateCategoryRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    check_required(&mut errors, "Name", &request.name, MAX_NAME_LENGTH);
    check_required(&mut errors, "Code", &request.code, 4);
    if !request.code.trim().chars().all(|c| c.is_ascii_alphabetic()) {
        errors.push("Code can only contain letters".to_string());
    }
    into_result(errors)
}

pub fn validate_asset_request(request: &CreateAssetRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    check_required(&mut errors, "AssetCode", &request.asset_code, 20);
    check_required(&mut errors, "AssetName", &request.asset_name, 100);
    into_result(errors)
}

pub fn validate_page_size(page_size: u64) -> Result<u64, ApiError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::validation(format!(
            "Invalid page size: {page_size}. Page size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(page_size)
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::enums::Gender;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn register(first: &str, last: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 4, 7).unwrap(),
            date_joined: NaiveDate::from_ymd_opt(2024, 6, 17).unwrap(),
            gender: Gender::Male,
            role_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_validate_register_request() {
        assert!(validate_register_request(&register("John", "Doe")).is_ok());

        let Err(ApiError::InvalidData(errors)) = validate_register_request(&register("  ", "Doe"))
        else {
            panic!("blank first name accepted");
        };
        assert_eq!(errors, vec!["FirstName is required".to_string()]);

        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_register_request(&register("John", &long)).is_err());
        let exact = "x".repeat(MAX_NAME_LENGTH);
        assert!(validate_register_request(&register(&exact, "Doe")).is_ok());
    }

    #[test]
    fn test_validate_category_request() {
        let ok = CreateCategoryRequest {
            name: "Laptop".to_string(),
            code: "LA".to_string(),
        };
        assert!(validate_category_request(&ok).is_ok());

        let bad = CreateCategoryRequest {
            name: String::new(),
            code: "L4".to_string(),
        };
        let Err(ApiError::InvalidData(errors)) = validate_category_request(&bad) else {
            panic!("invalid category accepted");
        };
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_page_size() {
        assert!(validate_page_size(1).is_ok());
        assert!(validate_page_size(MAX_PAGE_SIZE).is_ok());
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(MAX_PAGE_SIZE + 1).is_err());
    }

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("admin", "password").is_ok());
        assert!(validate_credentials(" ", "password").is_err());
        assert!(validate_credentials("admin", "").is_err());
    }
}
