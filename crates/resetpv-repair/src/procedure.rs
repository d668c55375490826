use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use resetpv_codec::{StoredObject, Time};
use resetpv_store::{PutOutcome, StoreGateway};
use resetpv_types::{storage_key, ResourceKind, ResourceRef};

use crate::config::RepairConfig;
use crate::error::{RepairError, RepairResult};

/// What a successful repair did, for operator-facing output.
#[derive(Clone, Debug, Serialize)]
pub struct RepairOutcome {
    pub key: String,
    pub kind: ResourceKind,
    pub namespace: Option<String>,
    pub name: String,
    /// The deletion timestamp that was cleared.
    pub previous_deletion_timestamp: Option<DateTime<Utc>>,
    /// The grace period that was cleared alongside it, if any.
    pub previous_grace_period_seconds: Option<i64>,
    /// Store revision after the write committed.
    pub new_revision: i64,
}

/// Runs one repair cycle against a store gateway.
///
/// Per-kind variation is entirely in the key shape and the codec schema;
/// the decode → check → mutate → encode → write sequence is the same for
/// every kind.
pub struct Repairer<'a> {
    gateway: &'a dyn StoreGateway,
    config: RepairConfig,
}

impl<'a> Repairer<'a> {
    pub fn new(gateway: &'a dyn StoreGateway, config: RepairConfig) -> Self {
        Self { gateway, config }
    }

    /// Repair one terminating object.
    ///
    /// The whole fetch-to-write sequence runs under the configured
    /// deadline; exceeding it surfaces as a transport failure, not a
    /// distinct error kind.
    pub async fn repair(&self, target: &ResourceRef) -> RepairResult<RepairOutcome> {
        let key = storage_key(&self.config.key_prefix, target);
        debug!(%key, %target, "located storage key");

        match tokio::time::timeout(self.config.op_timeout, self.run(target, &key)).await {
            Ok(result) => result,
            Err(_) => Err(RepairError::Transport(resetpv_store::StoreError::Timeout)),
        }
    }

    async fn run(&self, target: &ResourceRef, key: &str) -> RepairResult<RepairOutcome> {
        // Fetch.
        let kv = self
            .gateway
            .get(key)
            .await?
            .ok_or_else(|| RepairError::NotFound {
                key: key.to_string(),
            })?;
        debug!(%key, revision = kv.revision, bytes = kv.value.len(), "fetched stored record");

        // Decode.
        let mut object = StoredObject::decode(target.kind(), &kv.value)?;

        // Precondition: refuse to "fix" an object that is not terminating.
        let Some(previous) = object.deletion_timestamp() else {
            return Err(RepairError::NotTerminating {
                kind: target.kind(),
                name: target.name().to_string(),
            });
        };
        let previous_grace = object.deletion_grace_period_seconds();
        debug!(
            %key,
            deletion_seconds = previous.seconds,
            grace_seconds = ?previous_grace,
            "object is terminating"
        );

        // Mutate: clear the two deletion markers, nothing else.
        object.clear_deletion_markers();

        // Encode.
        let bytes = object.encode()?;

        // Write, guarded on the revision observed at fetch.
        match self.gateway.put(key, bytes, Some(kv.revision)).await? {
            PutOutcome::Committed(new_revision) => {
                info!(%key, new_revision, "cleared deletion markers");
                Ok(RepairOutcome {
                    key: key.to_string(),
                    kind: target.kind(),
                    namespace: target.namespace().map(str::to_string),
                    name: target.name().to_string(),
                    previous_deletion_timestamp: to_datetime(&previous),
                    previous_grace_period_seconds: previous_grace,
                    new_revision,
                })
            }
            PutOutcome::Conflict => Err(RepairError::Conflict {
                key: key.to_string(),
                revision: kv.revision,
            }),
        }
    }
}

fn to_datetime(time: &Time) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(time.seconds, time.nanos.max(0) as u32)
}
