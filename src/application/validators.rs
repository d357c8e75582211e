/// Minimal email check used for waitlist intake: non-blank and contains `@`.
///
/// Deliverability is not checked here; anything with an `@` is accepted.
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.contains('@')
}

/// Lower-case and trim an email so it can serve as the uniqueness key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim an optional text field. Blank or absent input becomes `None`, never `""`.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
