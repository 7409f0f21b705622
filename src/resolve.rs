//! Fuzzy worktree name resolution.
//!
//! Matching is case-insensitive and tiered: exact, then prefix, then
//! substring. The first tier with any candidate decides; more than one
//! candidate there is ambiguous.

use crate::error::{ArborError, Result};
use crate::model::{ActualState, WorktreeName};

/// Resolve `fragment` to exactly one worktree name in `actual`.
pub fn resolve(actual: &ActualState, fragment: &str) -> Result<WorktreeName> {
    resolve_name(actual.keys().map(String::as_str), fragment)
}

/// Resolve `fragment` against an arbitrary set of names.
pub fn resolve_name<'a>(
    names: impl IntoIterator<Item = &'a str>,
    fragment: &str,
) -> Result<WorktreeName> {
    let needle = fragment.to_lowercase();
    let folded: Vec<(&str, String)> = names
        .into_iter()
        .map(|name| (name, name.to_lowercase()))
        .collect();

    let tiers: [&dyn Fn(&str) -> bool; 3] = [
        &|name: &str| name == needle,
        &|name: &str| name.starts_with(needle.as_str()),
        &|name: &str| name.contains(needle.as_str()),
    ];

    for matches in tiers {
        let candidates: Vec<&str> = folded
            .iter()
            .filter(|(_, lower)| matches(lower.as_str()))
            .map(|(name, _)| *name)
            .collect();

        match candidates.as_slice() {
            [] => continue,
            [only] => return Ok(only.to_string()),
            many => {
                return Err(ArborError::NotFound {
                    fragment: fragment.to_string(),
                    candidates: many.iter().map(|n| n.to_string()).collect(),
                });
            }
        }
    }

    Err(ArborError::NotFound {
        fragment: fragment.to_string(),
        candidates: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 4] = ["main", "dev", "feat", "production"];

    fn resolve_in(names: &[&str], fragment: &str) -> Result<String> {
        resolve_name(names.iter().copied(), fragment)
    }

    #[test]
    fn exact_match_wins() {
        assert_eq!(resolve_in(&NAMES, "dev").unwrap(), "dev");
        assert_eq!(resolve_in(&["dev", "devops"], "dev").unwrap(), "dev");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(resolve_in(&NAMES, "MAIN").unwrap(), "main");
        assert_eq!(resolve_in(&["Production"], "prod").unwrap(), "Production");
    }

    #[test]
    fn unique_prefix_resolves() {
        assert_eq!(resolve_in(&NAMES, "fea").unwrap(), "feat");
        assert_eq!(resolve_in(&NAMES, "ma").unwrap(), "main");
    }

    #[test]
    fn prefix_preferred_over_substring() {
        let names = ["main", "manual"];
        assert_eq!(resolve_in(&names, "mai").unwrap(), "main");
        assert_eq!(resolve_in(&["domain", "mainline"], "main").unwrap(), "mainline");
    }

    #[test]
    fn ambiguous_prefix_is_not_found() {
        let err = resolve_in(&["main", "manual"], "ma").unwrap_err();
        match err {
            ArborError::NotFound { candidates, .. } => {
                assert_eq!(candidates, vec!["main", "manual"]);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn unique_substring_resolves() {
        assert_eq!(resolve_in(&NAMES, "duct").unwrap(), "production");
    }

    #[test]
    fn ambiguous_substring_is_not_found() {
        let err = resolve_in(&["api-dev", "web-dev"], "dev").unwrap_err();
        assert!(matches!(err, ArborError::NotFound { ref candidates, .. } if candidates.len() == 2));
    }

    #[test]
    fn no_match_is_not_found() {
        let err = resolve_in(&NAMES, "zzz").unwrap_err();
        assert!(matches!(err, ArborError::NotFound { ref candidates, .. } if candidates.is_empty()));
    }

    #[test]
    fn resolves_against_actual_state() {
        use crate::model::{ActualEntry, GitStatus};
        use std::path::PathBuf;

        let actual: ActualState = ["main", "feat"]
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    ActualEntry {
                        path: PathBuf::from("/repo/.worktrees").join(name),
                        current_branch: name.to_string(),
                        expected_branch: None,
                        git_status: GitStatus::default(),
                    },
                )
            })
            .collect();

        assert_eq!(resolve(&actual, "FE").unwrap(), "feat");
    }
}
