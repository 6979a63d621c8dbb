//! Access guard for the dashboard.

use taskdeck_core::session::SessionStatus;

/// Outcome of guarding a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not yet resolved; show a placeholder, no redirect.
    Loading,
    /// No session; the guarded view is discarded.
    RedirectToLogin,
    /// Session active; render the view.
    Render,
}

/// Pure decision over the session status. Re-evaluated on every
/// session-status change; never has side effects.
pub fn decide(status: SessionStatus) -> GuardDecision {
    match status {
        SessionStatus::Unknown => GuardDecision::Loading,
        SessionStatus::Anonymous => GuardDecision::RedirectToLogin,
        SessionStatus::Authenticated => GuardDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_table() {
        assert_eq!(decide(SessionStatus::Unknown), GuardDecision::Loading);
        assert_eq!(
            decide(SessionStatus::Anonymous),
            GuardDecision::RedirectToLogin
        );
        assert_eq!(decide(SessionStatus::Authenticated), GuardDecision::Render);
    }
}
