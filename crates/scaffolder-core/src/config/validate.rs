//! Package identifier validation (npm naming rules)

use thiserror::Error;

/// Longest name the registry accepts
pub const MAX_NAME_LENGTH: usize = 214;

/// Names the registry refuses regardless of format
pub const RESERVED_NAMES: [&str; 2] = ["node_modules", "favicon.ico"];

/// Why a candidate package name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Package name cannot be empty")]
    Empty,

    #[error("Package name cannot be longer than {} characters", MAX_NAME_LENGTH)]
    TooLong,

    #[error("Package name must be lowercase")]
    Uppercase,

    #[error(
        "Package name may only contain lowercase letters, digits, '-', '_' and '.' (found '{0}')"
    )]
    InvalidCharacter(char),

    #[error("Package name cannot start with '.' or '_'")]
    LeadingPunctuation,

    #[error("Scoped package names must look like @scope/name")]
    InvalidScope,

    #[error("'{0}' is a reserved package name")]
    Reserved(String),
}

/// Validate a candidate package name, scoped or not.
pub fn validate_package_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(NameError::TooLong);
    }
    if name.chars().any(|c| c.is_uppercase()) {
        return Err(NameError::Uppercase);
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(NameError::Reserved(name.to_string()));
    }

    match name.strip_prefix('@') {
        Some(scoped) => {
            let (scope, bare) = scoped.split_once('/').ok_or(NameError::InvalidScope)?;
            if scope.is_empty() || bare.is_empty() {
                return Err(NameError::InvalidScope);
            }
            validate_segment(scope)?;
            validate_segment(bare)
        }
        None => validate_segment(name),
    }
}

fn validate_segment(segment: &str) -> Result<(), NameError> {
    if segment.starts_with('.') || segment.starts_with('_') {
        return Err(NameError::LeadingPunctuation);
    }
    match segment.chars().find(|c| !is_allowed(*c)) {
        Some(c) => Err(NameError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.')
}

/// Directory name for a package: the part after the scope, if any.
pub fn directory_name(package_name: &str) -> &str {
    package_name
        .rsplit_once('/')
        .map(|(_, bare)| bare)
        .unwrap_or(package_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_names() {
        for name in ["sample-lib", "a", "my_pkg", "pkg.js", "x1-2_3.4"] {
            assert_eq!(validate_package_name(name), Ok(()), "{}", name);
        }
    }

    #[test]
    fn test_accepts_scoped_names() {
        assert_eq!(validate_package_name("@acme/widgets"), Ok(()));
        assert_eq!(validate_package_name("@a-b.c/d_e"), Ok(()));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_package_name(""), Err(NameError::Empty));
    }

    #[test]
    fn test_length_ceiling_is_inclusive() {
        let at_limit = "a".repeat(MAX_NAME_LENGTH);
        let over_limit = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(validate_package_name(&at_limit), Ok(()));
        assert_eq!(validate_package_name(&over_limit), Err(NameError::TooLong));
    }

    #[test]
    fn test_rejects_uppercase() {
        assert_eq!(validate_package_name("MyLib"), Err(NameError::Uppercase));
        assert_eq!(validate_package_name("@Acme/lib"), Err(NameError::Uppercase));
    }

    #[test]
    fn test_rejects_disallowed_symbols() {
        assert_eq!(
            validate_package_name("my lib"),
            Err(NameError::InvalidCharacter(' '))
        );
        assert_eq!(
            validate_package_name("lib!"),
            Err(NameError::InvalidCharacter('!'))
        );
        assert_eq!(
            validate_package_name("a~b"),
            Err(NameError::InvalidCharacter('~'))
        );
    }

    #[test]
    fn test_rejects_reserved_names() {
        for name in RESERVED_NAMES {
            assert_eq!(
                validate_package_name(name),
                Err(NameError::Reserved(name.to_string()))
            );
        }
    }

    #[test]
    fn test_rejects_leading_dot_or_underscore() {
        assert_eq!(
            validate_package_name(".hidden"),
            Err(NameError::LeadingPunctuation)
        );
        assert_eq!(
            validate_package_name("_private"),
            Err(NameError::LeadingPunctuation)
        );
    }

    #[test]
    fn test_rejects_malformed_scopes() {
        assert_eq!(validate_package_name("@acme"), Err(NameError::InvalidScope));
        assert_eq!(validate_package_name("@/lib"), Err(NameError::InvalidScope));
        assert_eq!(validate_package_name("@acme/"), Err(NameError::InvalidScope));
        assert_eq!(
            validate_package_name("@acme/a/b"),
            Err(NameError::InvalidCharacter('/'))
        );
    }

    #[test]
    fn test_spaced_mixed_case_name_mentions_lowercase() {
        let err = validate_package_name("My Package!").unwrap_err();
        assert!(err.to_string().contains("lowercase"));
    }

    #[test]
    fn test_directory_name_strips_scope() {
        assert_eq!(directory_name("@acme/widgets"), "widgets");
        assert_eq!(directory_name("sample-lib"), "sample-lib");
    }
}
