use crate::error::{MirrorError, Result};
use std::fmt;

const GITHUB_HOST: &str = "github.com";
const MAX_OWNER_LEN: usize = 39;
const MAX_NAME_LEN: usize = 100;

/// A validated `owner/name` pair on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Accepts `owner/name`, `https://github.com/owner/name[.git][/...]`,
    /// `github.com/owner/name` and `git@github.com:owner/name.git`.
    pub fn parse(input: &str) -> Result<RepoId> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "identifier is empty"));
        }

        let path = if let Some(rest) = trimmed.strip_prefix("git@") {
            let (host, path) = rest
                .split_once(':')
                .ok_or_else(|| invalid(input, "ssh form must be git@host:owner/name"))?;
            ensure_github(input, host)?;
            path
        } else if let Some((scheme, rest)) = trimmed.split_once("://") {
            if !matches!(scheme.to_ascii_lowercase().as_str(), "http" | "https") {
                return Err(invalid(input, "only http(s) URLs are supported"));
            }
            let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
            ensure_github(input, host)?;
            path
        } else if let Some((first, rest)) = trimmed.split_once('/') {
            if first.contains('.') {
                ensure_github(input, first)?;
                rest
            } else {
                trimmed
            }
        } else {
            return Err(invalid(input, "expected owner/name"));
        };

        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        let owner = segments
            .next()
            .ok_or_else(|| invalid(input, "missing repository owner"))?;
        let name = segments
            .next()
            .ok_or_else(|| invalid(input, "missing repository name"))?;
        let name = name.strip_suffix(".git").unwrap_or(name);

        // a bare pair must be exactly two segments; URLs may point deeper
        if !trimmed.contains("://") && !trimmed.starts_with("git@") && segments.next().is_some() {
            let host_prefixed = trimmed
                .split_once('/')
                .map(|(first, _)| first.contains('.'))
                .unwrap_or(false);
            if !host_prefixed {
                return Err(invalid(input, "expected exactly owner/name"));
            }
        }

        validate_owner(input, owner)?;
        validate_name(input, name)?;

        Ok(RepoId {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn matches_full_name(&self, full_name: &str) -> bool {
        self.full_name().eq_ignore_ascii_case(full_name.trim())
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn invalid(input: &str, reason: &str) -> MirrorError {
    MirrorError::InvalidIdentifier(format!("{input:?}: {reason}"))
}

fn ensure_github(input: &str, host: &str) -> Result<()> {
    let host = host.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host != GITHUB_HOST {
        return Err(invalid(input, "only github.com repositories are supported"));
    }
    Ok(())
}

fn validate_owner(input: &str, owner: &str) -> Result<()> {
    if owner.len() > MAX_OWNER_LEN {
        return Err(invalid(input, "owner is too long"));
    }
    if owner.starts_with('-') || owner.ends_with('-') {
        return Err(invalid(input, "owner cannot start or end with '-'"));
    }
    if !owner
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    {
        return Err(invalid(input, "owner may only contain letters, digits and '-'"));
    }
    Ok(())
}

fn validate_name(input: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(input, "missing repository name"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(invalid(input, "repository name is too long"));
    }
    if name == "." || name == ".." {
        return Err(invalid(input, "repository name cannot be a relative path"));
    }
    if !name
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
    {
        return Err(invalid(
            input,
            "repository name may only contain letters, digits, '-', '_' and '.'",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> String {
        RepoId::parse(input)
            .unwrap_or_else(|err| panic!("{input} should parse: {err}"))
            .full_name()
    }

    #[test]
    fn parses_supported_forms() {
        assert_eq!(parsed("rust-lang/cargo"), "rust-lang/cargo");
        assert_eq!(parsed("https://github.com/rust-lang/cargo"), "rust-lang/cargo");
        assert_eq!(parsed("https://github.com/rust-lang/cargo.git"), "rust-lang/cargo");
        assert_eq!(
            parsed("https://www.github.com/rust-lang/cargo/tree/master/src"),
            "rust-lang/cargo"
        );
        assert_eq!(parsed("github.com/rust-lang/cargo/"), "rust-lang/cargo");
        assert_eq!(parsed("git@github.com:rust-lang/cargo.git"), "rust-lang/cargo");
        assert_eq!(parsed("  owner/my.repo_name  "), "owner/my.repo_name");
        assert_eq!(parsed("https://github.com/owner/name?tab=readme"), "owner/name");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for input in [
            "",
            "   ",
            "just-a-name",
            "owner/",
            "/name",
            "a/b/c",
            "https://gitlab.com/owner/name",
            "ftp://github.com/owner/name",
            "https://github.com/owner",
            "-owner/name",
            "own er/name",
            "owner/na me",
            "owner/..",
            "git@gitlab.com:owner/name.git",
        ] {
            let err = RepoId::parse(input).expect_err(&format!("{input:?} should be rejected"));
            assert!(matches!(err, MirrorError::InvalidIdentifier(_)), "{input:?}");
        }
    }

    #[test]
    fn full_name_comparison_ignores_case() {
        let id = RepoId::parse("Owner/Repo").expect("should parse");
        assert!(id.matches_full_name("owner/repo"));
        assert!(!id.matches_full_name("owner/other"));
    }
}
