// ABOUTME: Input validation utilities for API request handlers
// ABOUTME: Field-specific length and shape checks, rejected at the boundary

use crate::response::ApiError;

/// Maximum sizes for record fields (in characters)
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_CONTENT_LENGTH: usize = 50_000;
pub const MAX_TAGS: usize = 10;
pub const MAX_TAG_LENGTH: usize = 50;

/// Maximum sizes for category fields
pub const MAX_CATEGORY_NAME_LENGTH: usize = 50;
pub const MAX_CATEGORY_DESCRIPTION_LENGTH: usize = 200;
pub const MAX_ICON_LENGTH: usize = 50;

/// Maximum sizes for user fields
pub const MAX_USER_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Validate a record title
pub fn validate_title(title: &str) -> Result<String, ApiError> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err(ApiError::Validation("Title is required".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(ApiError::Validation(format!(
            "Title must be less than {} characters",
            MAX_TITLE_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}

/// Validate an optional record description
pub fn validate_description(description: Option<String>) -> Result<Option<String>, ApiError> {
    validate_optional_field(description, "Description", MAX_DESCRIPTION_LENGTH)
}

/// Validate optional record content
pub fn validate_content(content: Option<String>) -> Result<Option<String>, ApiError> {
    validate_optional_field(content, "Content", MAX_CONTENT_LENGTH)
}

/// Validate a tag list: at most MAX_TAGS entries, each non-empty and bounded
pub fn validate_tags(tags: Vec<String>) -> Result<Vec<String>, ApiError> {
    if tags.len() > MAX_TAGS {
        return Err(ApiError::Validation(format!(
            "At most {} tags are allowed",
            MAX_TAGS
        )));
    }

    let mut cleaned = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(ApiError::Validation("Tags cannot be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_TAG_LENGTH {
            return Err(ApiError::Validation(format!(
                "Tags must be less than {} characters",
                MAX_TAG_LENGTH
            )));
        }
        cleaned.push(trimmed.to_string());
    }

    Ok(cleaned)
}

/// Validate a category name
pub fn validate_category_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }
    if trimmed.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(ApiError::Validation(format!(
            "Name must be less than {} characters",
            MAX_CATEGORY_NAME_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}

/// Validate an optional category description
pub fn validate_category_description(
    description: Option<String>,
) -> Result<Option<String>, ApiError> {
    validate_optional_field(description, "Description", MAX_CATEGORY_DESCRIPTION_LENGTH)
}

/// Validate an optional category icon
pub fn validate_icon(icon: Option<String>) -> Result<Option<String>, ApiError> {
    validate_optional_field(icon, "Icon", MAX_ICON_LENGTH)
}

/// Validate a user's display name
pub fn validate_user_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }
    if trimmed.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(ApiError::Validation(format!(
            "Name must be less than {} characters",
            MAX_USER_NAME_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}

/// Validate an email address. Deliberately shallow: the mailbox either
/// receives the mail or it doesn't.
pub fn validate_email(email: &str) -> Result<String, ApiError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }
    if trimmed.chars().count() > MAX_EMAIL_LENGTH || !trimmed.contains('@') {
        return Err(ApiError::Validation("Invalid email address".to_string()));
    }

    Ok(trimmed.to_string())
}

fn validate_optional_field(
    value: Option<String>,
    field_name: &str,
    max_length: usize,
) -> Result<Option<String>, ApiError> {
    match value {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.chars().count() > max_length {
                return Err(ApiError::Validation(format!(
                    "{} must be less than {} characters",
                    field_name, max_length
                )));
            }
            Ok(Some(trimmed.to_string()))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("  My record  ").unwrap(), "My record");
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_optional_fields_blank_to_none() {
        assert_eq!(validate_description(None).unwrap(), None);
        assert_eq!(validate_description(Some("  ".to_string())).unwrap(), None);
        assert_eq!(
            validate_description(Some(" notes ".to_string())).unwrap(),
            Some("notes".to_string())
        );
    }

    #[test]
    fn test_validate_tags() {
        let tags = validate_tags(vec![" Work ".to_string(), "home".to_string()]).unwrap();
        assert_eq!(tags, vec!["Work", "home"]);

        assert!(validate_tags(vec!["".to_string()]).is_err());
        assert!(validate_tags(vec!["ok".to_string(); MAX_TAGS + 1]).is_err());
        assert!(validate_tags(vec!["x".repeat(MAX_TAG_LENGTH + 1)]).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(
            validate_email(" alice@example.com ").unwrap(),
            "alice@example.com"
        );
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
    }

    #[test]
    fn test_validate_category_name() {
        assert!(validate_category_name("Work").is_ok());
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name(&"x".repeat(MAX_CATEGORY_NAME_LENGTH + 1)).is_err());
    }
}
