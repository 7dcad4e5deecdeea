//! Copy-to-clipboard fallback chain.

use crate::error::Result;

/// Result of a copy request, after every strategy was tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The asynchronous Clipboard API accepted the text.
    Clipboard,
    /// The selection + `execCommand("copy")` fallback succeeded.
    Legacy,
    /// Nothing worked.
    Failed,
}

impl CopyOutcome {
    /// Whether the text ended up on the clipboard.
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }

    /// Resolve the chain.
    ///
    /// `modern` is `None` when the Clipboard API is unavailable. The legacy
    /// strategy is only invoked if the modern one is missing or failed.
    pub fn resolve(modern: Option<Result<()>>, legacy: impl FnOnce() -> Result<()>) -> Self {
        match modern {
            Some(Ok(())) => return Self::Clipboard,
            Some(Err(e)) => log::debug!("clipboard API failed: {e}"),
            None => log::debug!("clipboard API unavailable"),
        }
        match legacy() {
            Ok(()) => Self::Legacy,
            Err(e) => {
                log::debug!("legacy copy failed: {e}");
                Self::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_modern_success_skips_legacy() {
        let called = Cell::new(false);
        let outcome = CopyOutcome::resolve(Some(Ok(())), || {
            called.set(true);
            Ok(())
        });
        assert_eq!(outcome, CopyOutcome::Clipboard);
        assert!(!called.get());
    }

    #[test]
    fn test_unavailable_falls_back() {
        let outcome = CopyOutcome::resolve(None, || Ok(()));
        assert_eq!(outcome, CopyOutcome::Legacy);
        assert!(outcome.is_success());
    }

    #[test]
    fn test_rejected_falls_back() {
        let outcome = CopyOutcome::resolve(Some(Err(CoreError::clipboard("denied"))), || Ok(()));
        assert_eq!(outcome, CopyOutcome::Legacy);
    }

    #[test]
    fn test_everything_fails() {
        let outcome = CopyOutcome::resolve(None, || {
            Err(CoreError::clipboard("execCommand copy failed"))
        });
        assert_eq!(outcome, CopyOutcome::Failed);
        assert!(!outcome.is_success());
    }
}
