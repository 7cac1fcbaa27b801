//! D-Bus name validation.
//!
//! Interface names:
//! - Must be at most 255 bytes long
//! - Must be composed of at least two elements separated by `.`
//! - Each element must be non-empty and must not begin with a digit
//! - Each element may only contain `[A-Za-z0-9_]`
//!
//! Member names (properties, methods, signals):
//! - Must be at most 255 bytes long and non-empty
//! - Must not contain `.` and must not begin with a digit
//! - May only contain `[A-Za-z0-9_]`
//!
//! These checks only run when [`GeneratorConfig::strict_names`] is set.
//!
//! [`GeneratorConfig::strict_names`]: crate::config::GeneratorConfig::strict_names

use crate::error::GenerationError;

/// Maximum length of any D-Bus name, in bytes.
pub const MAX_NAME_LENGTH: usize = 255;

/// Validate an interface name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use dcg_types::names::validate_interface_name;
///
/// assert!(validate_interface_name("org.freedesktop.DBus").is_ok());
/// assert!(validate_interface_name("com.example.Widget_2").is_ok());
/// assert!(validate_interface_name("Widget").is_err());
/// assert!(validate_interface_name("com..Widget").is_err());
/// ```
pub fn validate_interface_name(name: &str) -> Result<(), GenerationError> {
    check_length(name)?;

    let elements: Vec<&str> = name.split('.').collect();
    if elements.len() < 2 {
        return Err(invalid(name, "interface name must have at least two elements"));
    }

    for element in elements {
        check_element(name, element)?;
    }

    Ok(())
}

/// Validate a member name (the name of a property).
pub fn validate_member_name(name: &str) -> Result<(), GenerationError> {
    check_length(name)?;
    if name.contains('.') {
        return Err(invalid(name, "member name must not contain '.'"));
    }
    check_element(name, name)
}

fn check_length(name: &str) -> Result<(), GenerationError> {
    if name.is_empty() {
        return Err(invalid(name, "name must not be empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(invalid(
            name,
            &format!("name is {} bytes long, limit is {MAX_NAME_LENGTH}", name.len()),
        ));
    }
    Ok(())
}

fn check_element(name: &str, element: &str) -> Result<(), GenerationError> {
    let mut chars = element.chars();
    match chars.next() {
        None => return Err(invalid(name, "elements must not be empty")),
        Some(c) if c.is_ascii_digit() => {
            return Err(invalid(
                name,
                &format!("element must not start with a digit: {element:?}"),
            ));
        }
        Some(_) => {}
    }

    if let Some(bad) = element
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(invalid(name, &format!("contains forbidden character: {bad:?}")));
    }

    Ok(())
}

fn invalid(name: &str, reason: &str) -> GenerationError {
    GenerationError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
