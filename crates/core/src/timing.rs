//! Git hook timings
//!
//! A [`Timing`] names the lifecycle event at which git runs a hook. The set is
//! closed: only these timings may be installed into or dispatched for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Lifecycle event at which git invokes a hook
///
/// # Examples
///
/// ```
/// use githook_core::Timing;
///
/// let timing: Timing = "pre-commit".parse().unwrap();
/// assert_eq!(timing, Timing::PreCommit);
/// assert_eq!(timing.as_str(), "pre-commit");
/// assert!("pre-comit".parse::<Timing>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timing {
    /// `applypatch-msg`, run by `git am` to check the proposed message
    ApplypatchMsg,
    /// `pre-applypatch`, run by `git am` before committing
    PreApplypatch,
    /// `post-applypatch`, run by `git am` after committing
    PostApplypatch,
    /// `pre-commit`, run before the commit message is requested
    PreCommit,
    /// `prepare-commit-msg`, run before the message editor starts
    PrepareCommitMsg,
    /// `commit-msg`, run to check the final commit message
    CommitMsg,
    /// `post-commit`, run after a commit is made
    PostCommit,
    /// `pre-rebase`, run before `git rebase` starts
    PreRebase,
    /// `post-checkout`, run after `git checkout` / `git switch`
    PostCheckout,
    /// `post-merge`, run after a successful merge
    PostMerge,
    /// `pre-push`, run before refs are pushed
    PrePush,
    /// `pre-receive`, run on the remote before any ref is updated
    PreReceive,
    /// `update`, run on the remote once per updated ref
    Update,
    /// `post-receive`, run on the remote after all refs are updated
    PostReceive,
    /// `post-update`, run on the remote after refs are updated
    PostUpdate,
    /// `pre-auto-gc`, run before `git gc --auto`
    PreAutoGc,
    /// `post-rewrite`, run after `git commit --amend` / `git rebase`
    PostRewrite,
}

impl Timing {
    /// All recognized timings in display order
    pub const ALL: [Timing; 17] = [
        Timing::ApplypatchMsg,
        Timing::PreApplypatch,
        Timing::PostApplypatch,
        Timing::PreCommit,
        Timing::PrepareCommitMsg,
        Timing::CommitMsg,
        Timing::PostCommit,
        Timing::PreRebase,
        Timing::PostCheckout,
        Timing::PostMerge,
        Timing::PrePush,
        Timing::PreReceive,
        Timing::Update,
        Timing::PostReceive,
        Timing::PostUpdate,
        Timing::PreAutoGc,
        Timing::PostRewrite,
    ];

    /// The hook file name git uses for this timing
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplypatchMsg => "applypatch-msg",
            Self::PreApplypatch => "pre-applypatch",
            Self::PostApplypatch => "post-applypatch",
            Self::PreCommit => "pre-commit",
            Self::PrepareCommitMsg => "prepare-commit-msg",
            Self::CommitMsg => "commit-msg",
            Self::PostCommit => "post-commit",
            Self::PreRebase => "pre-rebase",
            Self::PostCheckout => "post-checkout",
            Self::PostMerge => "post-merge",
            Self::PrePush => "pre-push",
            Self::PreReceive => "pre-receive",
            Self::Update => "update",
            Self::PostReceive => "post-receive",
            Self::PostUpdate => "post-update",
            Self::PreAutoGc => "pre-auto-gc",
            Self::PostRewrite => "post-rewrite",
        }
    }

    /// Names of all recognized timings
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }

    /// Whether git writes data to the hook's standard input
    ///
    /// Every hook of such a timing must see the same input, so the dispatcher
    /// buffers it once instead of letting the first hook consume it.
    #[must_use]
    pub const fn reads_stdin(self) -> bool {
        matches!(
            self,
            Self::PrePush | Self::PreReceive | Self::PostReceive | Self::PostRewrite
        )
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnrecognizedTiming {
                timing: s.to_string(),
            })
    }
}
