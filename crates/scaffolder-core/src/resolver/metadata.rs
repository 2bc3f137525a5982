//! Where author metadata comes from
//!
//! A saved profile is used as-is. Otherwise a git identity is offered once;
//! otherwise the fields are asked for blank.

use crate::config::Metadata;
use crate::profile::UserProfile;
use crate::runtime::GitIdentity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// Saved profile, used without prompting
    Profile(UserProfile),
    /// Git identity, offered for acceptance
    Git(GitIdentity),
    /// Nothing known
    Blank,
}

pub fn metadata_source(profile: Option<UserProfile>, identity: GitIdentity) -> MetadataSource {
    match profile {
        Some(profile) => MetadataSource::Profile(profile),
        None if !identity.is_empty() => MetadataSource::Git(identity),
        None => MetadataSource::Blank,
    }
}

impl MetadataSource {
    /// Metadata without asking anything, used when prompts are skipped
    pub fn silent(&self) -> Metadata {
        match self {
            MetadataSource::Profile(profile) => from_profile(profile),
            MetadataSource::Git(identity) => Metadata {
                author_name: identity.name.clone(),
                author_email: identity.email.clone(),
                ..Default::default()
            },
            MetadataSource::Blank => Metadata::default(),
        }
    }

    pub fn is_profile(&self) -> bool {
        matches!(self, MetadataSource::Profile(_))
    }
}

pub fn from_profile(profile: &UserProfile) -> Metadata {
    Metadata {
        description: None,
        author_name: profile.author.clone(),
        author_email: profile.email.clone(),
        github_username: profile.github.clone(),
    }
}

/// Trim free text; empty input means the field is absent
pub fn optional_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// The save offer is made once, only for newly entered metadata
pub fn should_offer_save(source: &MetadataSource, no_save: bool, metadata: &Metadata) -> bool {
    !no_save && !source.is_profile() && !UserProfile::from_metadata(metadata).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> GitIdentity {
        GitIdentity {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            author: Some("Grace".to_string()),
            email: None,
            github: Some("grace".to_string()),
        }
    }

    #[test]
    fn test_profile_wins_over_git() {
        let source = metadata_source(Some(profile()), identity());
        assert!(source.is_profile());
        assert_eq!(source.silent().github_username.as_deref(), Some("grace"));
        assert_eq!(source.silent().author_email, None);
    }

    #[test]
    fn test_git_then_blank() {
        let source = metadata_source(None, identity());
        assert_eq!(source, MetadataSource::Git(identity()));
        assert_eq!(source.silent().author_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(source.silent().github_username, None);

        assert_eq!(
            metadata_source(None, GitIdentity::default()),
            MetadataSource::Blank
        );
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" ada "), Some("ada".to_string()));
    }

    #[test]
    fn test_save_offer() {
        let entered = MetadataSource::Blank.silent();
        assert!(!should_offer_save(&MetadataSource::Blank, false, &entered));

        let git = MetadataSource::Git(identity());
        let metadata = git.silent();
        assert!(should_offer_save(&git, false, &metadata));
        assert!(!should_offer_save(&git, true, &metadata));

        let saved = MetadataSource::Profile(profile());
        assert!(!should_offer_save(&saved, false, &saved.silent()));
    }
}
