use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the repair procedure.
///
/// Passed in explicitly at construction; the procedure reads no ambient
/// state. This keeps it testable against an in-memory store gateway.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepairConfig {
    /// The etcd path segment under which the control plane stores its
    /// objects. Configurable per cluster install.
    pub key_prefix: String,
    /// Single deadline covering the whole fetch-to-write sequence.
    pub op_timeout: Duration,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            key_prefix: "registry".into(),
            op_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_clusters() {
        let config = RepairConfig::default();
        assert_eq!(config.key_prefix, "registry");
        assert_eq!(config.op_timeout, Duration::from_secs(5));
    }
}
