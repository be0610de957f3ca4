//! Request-scoped trace identifier for correlation across logs and errors.
//!
//! The identifier lives in task-local storage so services and adapters can
//! read it without threading it through every signature. An upstream gateway
//! may supply its own identifier in the `trace-id` header; the middleware
//! adopts it when it parses as a UUID.
//!
//! Tokio task-locals are not inherited by spawned tasks. Wrap spawned work in
//! [`TraceId::scope`] to keep the identifier in view.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier exposed via task-local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random trace identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Adopt an identifier forwarded by an upstream hop.
    ///
    /// Blank or malformed values yield `None` so callers can fall back to
    /// [`TraceId::generate`].
    #[must_use]
    pub fn from_forwarded(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }

    /// Returns the current trace identifier if one is in scope.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Execute the provided future with the supplied trace identifier in scope.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn current_reflects_scope() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async move { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn current_is_none_out_of_scope() {
        assert!(TraceId::current().is_none());
    }

    #[rstest]
    #[case("6f1c1c4e-3a59-4b7a-9d1e-8c0e2f3a4b5c", true)]
    #[case("  6f1c1c4e-3a59-4b7a-9d1e-8c0e2f3a4b5c  ", true)]
    #[case("", false)]
    #[case("not-a-uuid", false)]
    fn forwarded_values_must_be_uuids(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(TraceId::from_forwarded(raw).is_some(), accepted);
    }

    #[rstest]
    fn display_matches_inner_uuid() {
        let trace_id = TraceId::generate();
        assert_eq!(trace_id.to_string(), trace_id.as_uuid().to_string());
    }
}
