//! Response types returned by the client.

/// Result of a health probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// Status reported by the server (`ok` when healthy).
    pub status: String,
    /// Round-trip time of the probe in milliseconds.
    pub latency_ms: u128,
}

impl HealthStatus {
    /// Whether the server reported itself healthy.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
