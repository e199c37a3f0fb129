//! Resource name rules.
//!
//! Names are ASCII letters, digits and hyphens. They start with a letter, never end
//! with a hyphen and never contain two hyphens in a row.

use crate::error::{Error, Result};
use regex::Regex;

pub const MAX_NAME_LEN: usize = 64;

const NAME_RE: &str = r"^[A-Za-z](?:-?[A-Za-z0-9])*$";

pub fn validate_resource_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument("name", "resource name must not be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(Error::invalid_argument(
            "name",
            format!(
                "resource name '{}' is longer than {} characters",
                name, MAX_NAME_LEN
            ),
        ));
    }
    let re = Regex::new(NAME_RE).map_err(|e| Error::Pattern(e.to_string()))?;
    if !re.is_match(name) {
        return Err(Error::invalid_argument(
            "name",
            format!(
                "resource name '{}' must start with a letter and contain only letters, digits and single hyphens",
                name
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["api", "statestore", "web-frontend", "a1", "A-b-C"] {
            assert!(validate_resource_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_malformed_names() {
        for name in ["", "1api", "-api", "api-", "a--b", "has space", "dot.name", "snake_case"] {
            let err = validate_resource_name(name).unwrap_err();
            assert!(err.is_invalid_argument(), "{name}");
        }
    }

    #[test]
    fn rejects_overlong_names() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        assert!(validate_resource_name(&name).is_err());
        assert!(validate_resource_name(&"a".repeat(MAX_NAME_LEN)).is_ok());
    }
}
