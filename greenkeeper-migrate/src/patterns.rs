//! Recognizes Greenkeeper markup and branch names, and produces their
//! Dependabot replacements.
//!
//! Everything here is pure text matching; nothing is fetched or validated
//! beyond the shape of the input.

use regex::Regex;
use std::sync::LazyLock;

/// Prefix Greenkeeper uses for the branches it pushes.
pub const LEGACY_BRANCH_PREFIX: &str = "greenkeeper";

/// Prefix Dependabot uses for npm/yarn update branches.
pub const DEPENDABOT_BRANCH_PREFIX: &str = "dependabot/npm_and_yarn";

/// `[![alt](https://badges.greenkeeper.io/...)](https://greenkeeper.io/)`
static BADGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[!\[[^\]]+\]\(https://badges\.greenkeeper\.io[^)]+\)\]\(https://greenkeeper\.io/?\)")
        .unwrap()
});

/// Returns true if `text` contains a linked Greenkeeper badge.
///
/// Both halves must match: the image has to be served from
/// `badges.greenkeeper.io` and the link has to point at the Greenkeeper
/// homepage.
#[must_use]
pub fn detect_legacy_badge(text: &str) -> bool {
    BADGE_REGEX.is_match(text)
}

/// Removes the first linked Greenkeeper badge from `text`.
///
/// Everything around the badge is returned byte for byte. Callers are
/// expected to run the result through [`crate::format::format_markdown`].
#[must_use]
pub fn strip_legacy_badge(text: &str) -> String {
    BADGE_REGEX.replace(text, "").into_owned()
}

/// Returns true if `name` is a Greenkeeper branch (or branch pattern).
#[must_use]
pub fn is_legacy_branch_name(name: &str) -> bool {
    name.starts_with(LEGACY_BRANCH_PREFIX)
}

/// Swaps the Greenkeeper prefix of `name` for the Dependabot one.
///
/// Names that do not start with the prefix are returned unchanged.
#[must_use]
pub fn rewrite_branch_name(name: &str) -> String {
    match name.strip_prefix(LEGACY_BRANCH_PREFIX) {
        Some(rest) => format!("{DEPENDABOT_BRANCH_PREFIX}{rest}"),
        None => name.to_string(),
    }
}
