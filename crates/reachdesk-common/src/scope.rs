//! View lifetime scoping for asynchronous work.
//!
//! Every network call made on behalf of a view runs inside that view's
//! [`ViewScope`]. When the view goes away the scope is cancelled and any
//! response still in flight is discarded instead of being applied.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::{ReachdeskError, Result};

#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self { token: CancellationToken::new() }
    }

    /// A scope that is cancelled together with this one.
    pub fn child(&self) -> Self {
        Self { token: self.token.child_token() }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `fut` unless the scope ends first.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.token.is_cancelled() {
            return Err(ReachdeskError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ReachdeskError::Cancelled),
            out = fut => {
                // A response that lands after teardown is still stale.
                if self.token.is_cancelled() {
                    Err(ReachdeskError::Cancelled)
                } else {
                    out
                }
            }
        }
    }

    /// Guard that cancels the scope when dropped, for owners that end with a view.
    pub fn drop_guard(&self) -> ScopeGuard {
        ScopeGuard { scope: self.clone() }
    }
}

#[derive(Debug)]
pub struct ScopeGuard {
    scope: ViewScope,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

/// The "loading" affordance of a view.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    inner: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    /// Raise the flag until the returned guard is dropped, whatever the outcome.
    pub fn raise(&self) -> BusyGuard {
        self.inner.store(true, Ordering::SeqCst);
        BusyGuard { inner: self.inner.clone() }
    }
}

#[derive(Debug)]
pub struct BusyGuard {
    inner: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes_when_live() {
        let scope = ViewScope::new();
        let out = scope.run(async { Ok(5) }).await.unwrap();
        assert_eq!(out, 5);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_in_flight() {
        let scope = ViewScope::new();
        let canceller = scope.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });
        let out: Result<()> = scope
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;
        assert!(out.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_child_follows_parent() {
        let parent = ViewScope::new();
        let child = parent.child();
        {
            let _guard = parent.drop_guard();
        }
        assert!(child.is_cancelled());
        let out: Result<u8> = child.run(async { Ok(1) }).await;
        assert!(out.is_err());
    }

    #[test]
    fn test_busy_flag_resets_on_drop() {
        let flag = BusyFlag::new();
        {
            let _busy = flag.raise();
            assert!(flag.is_busy());
        }
        assert!(!flag.is_busy());
    }
}
