//! Version rendering for manifest entries
//!
//! Composer shows dev packages checked out from a VCS as
//! `<pretty version> <source reference>`. The manifest keeps that pairing
//! but joins the two halves with a colon.

/// Source types whose reference is appended to dev versions
const REVISION_SOURCE_TYPES: &[&str] = &["git", "hg"];

/// Alias target Composer uses for the default branch
pub const DEFAULT_BRANCH_ALIAS: &str = "9999999-dev";

/// Replace every space with a colon.
///
/// ```
/// use composer_manifest::version::normalize_version;
///
/// assert_eq!(normalize_version("dev-main abc1234"), "dev-main:abc1234");
/// assert_eq!(normalize_version("2.3.1"), "2.3.1");
/// ```
pub fn normalize_version(pretty_version: &str) -> String {
    pretty_version.replace(' ', ":")
}

/// Whether a version string has `dev` stability
pub fn is_dev_version(version: &str) -> bool {
    let version = version.split('#').next().unwrap_or(version);
    version.starts_with("dev-") || version.ends_with("-dev")
}

/// Render a pretty version together with its source revision.
///
/// Only dev versions installed from git or hg carry the reference; every
/// other package keeps its pretty version as-is. The reference is never
/// truncated.
pub fn full_pretty_version(
    pretty_version: &str,
    is_dev: bool,
    source_type: Option<&str>,
    source_reference: Option<&str>,
) -> String {
    let tracks_revision = source_type.is_some_and(|kind| REVISION_SOURCE_TYPES.contains(&kind));
    if !is_dev || !tracks_revision {
        return pretty_version.to_string();
    }

    match source_reference {
        Some(reference) if !reference.is_empty() => format!("{pretty_version} {reference}"),
        _ => pretty_version.to_string(),
    }
}

/// Placeholder Composer substitutes for `x` in a normalized branch
const BRANCH_WILDCARD: &str = "9999999";

/// Normalize a branch name the way Composer does.
///
/// Numeric branches are padded to four segments with wildcards
/// (`6.4` -> `6.4.9999999.9999999-dev`). Anything else becomes
/// `dev-<name>`.
pub fn normalize_branch(name: &str) -> String {
    let name = name.trim();
    let numeric = name
        .strip_prefix(|c: char| c == 'v' || c == 'V')
        .unwrap_or(name);
    let segments: Vec<&str> = numeric.split('.').collect();

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let is_numeric_branch = segments.len() <= 4
        && segments.first().is_some_and(|&first| is_digits(first))
        && segments
            .iter()
            .skip(1)
            .all(|&s| is_digits(s) || matches!(s, "x" | "X" | "*"));
    if !is_numeric_branch {
        return format!("dev-{name}");
    }

    let padded: Vec<&str> = (0..4)
        .map(|i| match segments.get(i) {
            Some(&segment) if is_digits(segment) => segment,
            _ => BRANCH_WILDCARD,
        })
        .collect();
    format!("{}-dev", padded.join("."))
}

/// Pretty form of a normalized alias: each run of wildcard segments
/// collapses to a single `.x` (`6.4.9999999.9999999-dev` -> `6.4.x-dev`).
pub fn pretty_alias(normalized: &str) -> String {
    let (version, suffix) = match normalized.strip_suffix("-dev") {
        Some(version) => (version, "-dev"),
        None => (normalized, ""),
    };

    let mut pretty = String::with_capacity(normalized.len());
    let mut in_wildcard_run = false;
    for (i, segment) in version.split('.').enumerate() {
        if i > 0 && segment == BRANCH_WILDCARD {
            if !in_wildcard_run {
                pretty.push_str(".x");
                in_wildcard_run = true;
            }
            continue;
        }
        if i > 0 {
            pretty.push('.');
        }
        pretty.push_str(segment);
        in_wildcard_run = false;
    }
    pretty.push_str(suffix);
    pretty
}

/// Numeric prefix of a dev branch, with a trailing dot
/// (`1.x-dev` -> `1.`, `2.3-dev` -> `2.3.`). `None` for named branches.
pub fn numeric_alias_prefix(branch: &str) -> Option<String> {
    let lowered = branch.to_ascii_lowercase();
    let version = lowered.strip_suffix("-dev")?;
    let version = version.strip_suffix(".x").unwrap_or(version);
    let numeric = !version.is_empty()
        && version
            .split('.')
            .all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()));
    numeric.then(|| format!("{version}."))
}

/// Normalized alias for one `branch-alias` entry of a package at `version`.
///
/// `None` when the entry does not apply to this version or Composer
/// would reject the target.
pub fn branch_alias_target(version: &str, source_branch: &str, target: &str) -> Option<String> {
    let branch = target.strip_suffix("-dev")?;
    let normalized = if target == DEFAULT_BRANCH_ALIAS {
        DEFAULT_BRANCH_ALIAS.to_string()
    } else {
        normalize_branch(branch)
    };
    if !normalized.ends_with("-dev") || !version.eq_ignore_ascii_case(source_branch) {
        return None;
    }

    // A numeric branch may only be aliased to one of its own sub-versions
    if let (Some(source_prefix), Some(target_prefix)) = (
        numeric_alias_prefix(source_branch),
        numeric_alias_prefix(target),
    ) {
        if !target_prefix.starts_with(&source_prefix) {
            return None;
        }
    }
    Some(normalized)
}

/// Alias given to a package flagged as the repository's default branch.
///
/// Only named branches get it; `1.x-dev` already has a numeric version.
pub fn default_branch_alias(version: &str) -> Option<&'static str> {
    let version = version.strip_prefix('v').unwrap_or(version);
    numeric_alias_prefix(version)
        .is_none()
        .then_some(DEFAULT_BRANCH_ALIAS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_replaces_each_space() {
        let input = "dev-feature a b  c";
        let normalized = normalize_version(input);

        assert_eq!(normalized, "dev-feature:a:b::c");
        assert_eq!(
            input.matches(' ').count(),
            normalized.matches(':').count() - input.matches(':').count()
        );
        for (original, replaced) in input.chars().zip(normalized.chars()) {
            if original == ' ' {
                assert_eq!(replaced, ':');
            } else {
                assert_eq!(replaced, original);
            }
        }
    }

    #[test]
    fn test_normalize_keeps_existing_colons() {
        assert_eq!(normalize_version("dev-main:abc 123"), "dev-main:abc:123");
        assert_eq!(normalize_version(""), "");
    }

    #[test]
    fn test_dev_detection() {
        assert!(is_dev_version("dev-main"));
        assert!(is_dev_version("1.0.x-dev"));
        assert!(is_dev_version("1.0.9999999.9999999-dev"));
        assert!(is_dev_version("dev-main#abc123"));
        assert!(!is_dev_version("2.3.1"));
        assert!(!is_dev_version("1.0.0-beta1"));
        assert!(!is_dev_version("develop"));
    }

    #[test]
    fn test_full_pretty_version_dev_git() {
        let reference = "0123456789abcdef0123456789abcdef01234567";
        assert_eq!(
            full_pretty_version("dev-main", true, Some("git"), Some(reference)),
            format!("dev-main {reference}")
        );
        assert_eq!(
            full_pretty_version("1.x-dev", true, Some("hg"), Some("abc")),
            "1.x-dev abc"
        );
    }

    #[test]
    fn test_full_pretty_version_without_revision() {
        assert_eq!(
            full_pretty_version("2.3.1", false, Some("git"), Some("abc")),
            "2.3.1"
        );
        assert_eq!(
            full_pretty_version("dev-main", true, Some("path"), Some("abc")),
            "dev-main"
        );
        assert_eq!(full_pretty_version("dev-main", true, Some("git"), None), "dev-main");
        assert_eq!(full_pretty_version("dev-main", true, None, Some("abc")), "dev-main");
    }

    #[test]
    fn test_normalize_branch() {
        assert_eq!(normalize_branch("6.4"), "6.4.9999999.9999999-dev");
        assert_eq!(normalize_branch("v3.1"), "3.1.9999999.9999999-dev");
        assert_eq!(normalize_branch("1.0.X"), "1.0.9999999.9999999-dev");
        assert_eq!(normalize_branch("2.*"), "2.9999999.9999999.9999999-dev");
        assert_eq!(normalize_branch("1.2.3.4"), "1.2.3.4-dev");
        assert_eq!(normalize_branch("main"), "dev-main");
        assert_eq!(normalize_branch("1.2.3.4.5"), "dev-1.2.3.4.5");
    }

    #[test]
    fn test_pretty_alias_collapses_wildcards() {
        assert_eq!(pretty_alias("6.4.9999999.9999999-dev"), "6.4.x-dev");
        assert_eq!(pretty_alias("2.9999999.9999999.9999999-dev"), "2.x-dev");
        assert_eq!(pretty_alias("1.2.3.4-dev"), "1.2.3.4-dev");
        assert_eq!(pretty_alias("1.9999999.3.9999999-dev"), "1.x.3.x-dev");
        assert_eq!(pretty_alias(DEFAULT_BRANCH_ALIAS), "9999999-dev");
    }

    #[test]
    fn test_numeric_alias_prefix() {
        assert_eq!(numeric_alias_prefix("1.x-dev").as_deref(), Some("1."));
        assert_eq!(numeric_alias_prefix("2.3-DEV").as_deref(), Some("2.3."));
        assert_eq!(numeric_alias_prefix("dev-main"), None);
        assert_eq!(numeric_alias_prefix("1.x"), None);
        assert_eq!(numeric_alias_prefix("main-dev"), None);
    }

    #[test]
    fn test_branch_alias_target() {
        let alias = |version, source, target| {
            branch_alias_target(version, source, target).map(|a| pretty_alias(&a))
        };
        assert_eq!(alias("dev-main", "dev-main", "6.4-dev").as_deref(), Some("6.4.x-dev"));
        assert_eq!(alias("dev-main", "dev-main", "v3.1-dev").as_deref(), Some("3.1.x-dev"));
        assert_eq!(alias("dev-main", "DEV-MAIN", "1.0.X-dev").as_deref(), Some("1.0.x-dev"));
        assert_eq!(alias("dev-main", "dev-main", "9999999-dev").as_deref(), Some("9999999-dev"));
        assert_eq!(alias("1.x-dev", "1.x-dev", "1.2.x-dev").as_deref(), Some("1.2.x-dev"));

        assert_eq!(alias("1.x-dev", "1.x-dev", "2.0.x-dev"), None);
        assert_eq!(alias("dev-main", "dev-other", "2.x-dev"), None);
        assert_eq!(alias("dev-main", "dev-main", "1.0.x"), None);
        assert_eq!(alias("dev-main", "dev-main", "main-dev"), None);
        assert_eq!(alias("dev-main", "dev-main", "-dev"), None);
    }

    #[test]
    fn test_default_branch_alias() {
        assert_eq!(default_branch_alias("dev-main"), Some(DEFAULT_BRANCH_ALIAS));
        assert_eq!(default_branch_alias("1.x-dev"), None);
        assert_eq!(default_branch_alias("v2.0-dev"), None);
    }
}
