use chrono::Utc;

/// Session-scoped token tagging all executions of one migration invocation.
///
/// Held by the reconciler, never ambient global state, so independent
/// sessions do not observe each other's identity. Explicit lifecycle:
/// [`Self::generate`] mints lazily and is idempotent, [`Self::reset`] clears
/// at session boundaries (the caller decides where those are).
#[derive(Debug, Clone, Default)]
pub struct DeploymentId {
    value: Option<String>,
}

impl DeploymentId {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints the identity on first use; later calls return the held value.
    ///
    /// The token is the current wall-clock epoch millis rendered as its last
    /// 10 decimal digits. Rapidly repeated sessions can theoretically
    /// collide; callers needing collision-free identities should mint their
    /// own and ignore this one.
    pub fn generate(&mut self) -> &str {
        self.value.get_or_insert_with(|| {
            let millis = Utc::now().timestamp_millis().to_string();
            let start = millis.len().saturating_sub(10);
            millis[start..].to_string()
        })
    }

    /// Clears the held identity; the next [`Self::generate`] mints a new one.
    pub fn reset(&mut self) {
        self.value = None;
    }

    /// The held identity, if any. Never mints.
    pub fn current(&self) -> Option<&str> {
        self.value.as_deref()
    }
}
