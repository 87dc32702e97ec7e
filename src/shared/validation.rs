//! Field validation rules
//!
//! Declarative checks applied to request bodies before anything is written.
//! Each validator returns the normalized value (trimmed, lowercased where the
//! rule says so) so handlers store exactly what was validated.

use crate::shared::error::SharedError;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 6;
pub const FULL_NAME_MAX: usize = 100;
pub const BIO_MAX: usize = 500;
pub const COMMUNITY_NAME_MIN: usize = 3;
pub const COMMUNITY_NAME_MAX: usize = 50;
pub const DESCRIPTION_MAX: usize = 1000;
pub const POST_CONTENT_MAX: usize = 2000;
pub const COMMENT_CONTENT_MAX: usize = 1000;

/// Usernames are 3-30 chars, start with a letter, and contain only
/// letters, digits and underscores.
pub fn username(raw: &str) -> Result<String, SharedError> {
    let value = raw.trim();
    let len = value.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(SharedError::validation(
            "username",
            format!("Username must be {USERNAME_MIN}-{USERNAME_MAX} characters"),
        ));
    }

    let mut chars = value.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SharedError::validation(
            "username",
            "Username must start with a letter and contain only letters, numbers, and underscores",
        ));
    }

    Ok(value.to_string())
}

/// Emails need a local part, an `@`, and a dotted domain. Stored lowercase.
pub fn email(raw: &str) -> Result<String, SharedError> {
    let value = raw.trim().to_lowercase();
    let invalid = || SharedError::validation("email", "Please provide a valid email address");

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(value),
        _ => Err(invalid()),
    }
}

pub fn password(raw: &str) -> Result<(), SharedError> {
    if raw.chars().count() < PASSWORD_MIN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {PASSWORD_MIN} characters"),
        ));
    }
    Ok(())
}

/// Optional free-text field with a maximum length. Blank input becomes `None`.
pub fn optional_text(
    field: &'static str,
    raw: Option<&str>,
    max: usize,
) -> Result<Option<String>, SharedError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > max {
        return Err(SharedError::validation(
            field,
            format!("{field} cannot exceed {max} characters"),
        ));
    }
    Ok(Some(value.to_string()))
}

/// Required free-text field: non-blank after trimming, at most `max` chars.
pub fn required_text(field: &'static str, raw: &str, max: usize) -> Result<String, SharedError> {
    optional_text(field, Some(raw), max)?
        .ok_or_else(|| SharedError::validation(field, format!("{field} is required")))
}

/// Post body: text, an image, or both. Image-only posts carry empty content.
pub fn post_body(
    content: Option<&str>,
    image_url: Option<&str>,
    image_url_max: usize,
) -> Result<(String, Option<String>), SharedError> {
    let content = optional_text("content", content, POST_CONTENT_MAX)?;
    let image_url = optional_text("image_url", image_url, image_url_max)?;
    if content.is_none() && image_url.is_none() {
        return Err(SharedError::validation(
            "content",
            "A post needs content or an image",
        ));
    }
    Ok((content.unwrap_or_default(), image_url))
}

pub fn community_name(raw: &str) -> Result<String, SharedError> {
    let value = raw.trim();
    let len = value.chars().count();
    if !(COMMUNITY_NAME_MIN..=COMMUNITY_NAME_MAX).contains(&len) {
        return Err(SharedError::validation(
            "name",
            format!(
                "Community name must be {COMMUNITY_NAME_MIN}-{COMMUNITY_NAME_MAX} characters"
            ),
        ));
    }
    Ok(value.to_string())
}
