//! Pull request status types.

/// Status of a migration pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrStatus {
    /// Pull request opened (or already open).
    Created {
        /// GitHub PR number.
        number: u64,
        /// GitHub PR URL.
        url: String,
        /// Whether the label was applied.
        labeled: bool,
    },

    /// Dry run: the change set was built but not submitted.
    Previewed,
}

impl PrStatus {
    /// Returns the status as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Previewed => "previewed",
        }
    }

    /// Returns the PR URL if created.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Created { url, .. } => Some(url),
            Self::Previewed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_url_of_created_pr() {
        let status = PrStatus::Created {
            number: 3,
            url: "https://github.com/octokit/app.js/pull/3".to_string(),
            labeled: true,
        };

        assert_eq!(status.as_str(), "created");
        assert_eq!(status.url(), Some("https://github.com/octokit/app.js/pull/3"));
        assert_eq!(PrStatus::Previewed.as_str(), "previewed");
        assert_eq!(PrStatus::Previewed.url(), None);
    }
}
