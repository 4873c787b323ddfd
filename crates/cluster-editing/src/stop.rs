use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Read side of a cooperative cancellation flag.
///
/// The flag is set from outside the search, usually by a signal handler. The
/// search only polls it between node reassignments and between rounds, so a
/// reassignment that has started always completes.
///
/// The default token is never stopped.
#[derive(Clone, Debug, Default)]
pub struct StopToken {
    flag: Arc<AtomicBool>,
}

impl StopToken {
    /// Returns whether the search should stop as soon as possible.
    #[inline(always)]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl From<Arc<AtomicBool>> for StopToken {
    fn from(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use crate::StopToken;

    #[test]
    fn default_is_not_stopped() {
        assert!(!StopToken::default().is_stopped());
    }

    #[test]
    fn observes_shared_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let token = StopToken::from(Arc::clone(&flag));
        assert!(!token.is_stopped());
        flag.store(true, Ordering::Relaxed);
        assert!(token.is_stopped());
        assert!(token.clone().is_stopped());
    }
}
