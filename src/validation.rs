use crate::error::AppError;

pub fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

pub fn require_valid_id(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must be a valid ID")));
    }
    Ok(())
}

pub fn require_valid_url(field: &str, value: &str) -> Result<(), AppError> {
    url::Url::parse(value.trim())
        .map_err(|_| AppError::Validation(format!("{field} must be a valid URL")))?;
    Ok(())
}

/// Project labels: 2–64 chars, letters/digits/dot/dash/underscore.
/// Same rule the create-project form enforces.
pub fn require_valid_project_label(value: &str) -> Result<(), AppError> {
    let v = value.trim();
    if v.len() < 2 {
        return Err(AppError::Validation("project label is required".into()));
    }
    if v.len() > 64 {
        return Err(AppError::Validation("project label: max 64 characters".into()));
    }
    if !v
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(AppError::Validation(
            "project label: use letters, numbers, dot, dash or underscore".into(),
        ));
    }
    Ok(())
}
