use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use etcd_client::{
    Certificate, Client, Compare, CompareOp, ConnectOptions, Identity, TlsOptions, Txn, TxnOp,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{KeyValue, PutOutcome, StoreGateway};

/// Connection parameters for the cluster's etcd.
///
/// etcd in a kubeadm-style cluster requires mutual TLS, so all three PEM
/// paths are mandatory. Defaults match the file names `kubeadm` drops in
/// `/etc/kubernetes/pki/etcd` when copied locally.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EtcdConfig {
    /// etcd domain name or IP.
    pub host: String,
    /// etcd client port.
    pub port: u16,
    /// CA certificate that signed the etcd serving cert.
    pub ca_path: PathBuf,
    /// Client certificate presented to etcd.
    pub cert_path: PathBuf,
    /// Private key for the client certificate.
    pub key_path: PathBuf,
    /// Deadline for establishing the connection.
    pub dial_timeout: Duration,
}

impl Default for EtcdConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 2379,
            ca_path: "ca.crt".into(),
            cert_path: "etcd.crt".into(),
            key_path: "etcd.key".into(),
            dial_timeout: Duration::from_secs(2),
        }
    }
}

impl EtcdConfig {
    /// The `host:port` endpoint string.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Store gateway over a live etcd connection.
///
/// The connection is scoped to this value: it is established in
/// [`EtcdGateway::connect`] and torn down when the gateway is dropped, on
/// every exit path. Conditional writes are implemented as an etcd
/// transaction guarded on the key's modification revision.
pub struct EtcdGateway {
    client: Client,
}

impl std::fmt::Debug for EtcdGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EtcdGateway").finish_non_exhaustive()
    }
}

impl EtcdGateway {
    /// Load TLS material and open an authenticated connection.
    pub async fn connect(config: &EtcdConfig) -> StoreResult<Self> {
        let ca = read_pem(&config.ca_path)?;
        let cert = read_pem(&config.cert_path)?;
        let key = read_pem(&config.key_path)?;

        let tls = TlsOptions::new()
            .ca_certificate(Certificate::from_pem(ca))
            .identity(Identity::from_pem(cert, key));
        let options = ConnectOptions::new()
            .with_connect_timeout(config.dial_timeout)
            .with_tls(tls);

        debug!(endpoint = %config.endpoint(), "connecting to etcd");
        let client = Client::connect([config.endpoint()], Some(options)).await?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StoreGateway for EtcdGateway {
    async fn get(&self, key: &str) -> StoreResult<Option<KeyValue>> {
        let mut client = self.client.clone();
        let resp = client.get(key, None).await?;
        let Some(kv) = resp.kvs().first() else {
            return Ok(None);
        };
        debug!(key, revision = kv.mod_revision(), "fetched value");
        Ok(Some(KeyValue {
            value: kv.value().to_vec(),
            revision: kv.mod_revision(),
        }))
    }

    async fn put(
        &self,
        key: &str,
        value: Vec<u8>,
        expected_revision: Option<i64>,
    ) -> StoreResult<PutOutcome> {
        let mut client = self.client.clone();
        match expected_revision {
            None => {
                let resp = client.put(key, value, None).await?;
                let revision = resp
                    .header()
                    .map(|h| h.revision())
                    .ok_or_else(|| StoreError::InvalidResponse("put response without header".into()))?;
                Ok(PutOutcome::Committed(revision))
            }
            Some(expected) => {
                let txn = Txn::new()
                    .when([Compare::mod_revision(key, CompareOp::Equal, expected)])
                    .and_then([TxnOp::put(key, value, None)]);
                let resp = client.txn(txn).await?;
                if !resp.succeeded() {
                    return Ok(PutOutcome::Conflict);
                }
                let revision = resp
                    .header()
                    .map(|h| h.revision())
                    .ok_or_else(|| StoreError::InvalidResponse("txn response without header".into()))?;
                debug!(key, revision, "committed guarded write");
                Ok(PutOutcome::Committed(revision))
            }
        }
    }
}

fn read_pem(path: &Path) -> StoreResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| StoreError::TlsMaterial {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_kubeadm_layout() {
        let config = EtcdConfig::default();
        assert_eq!(config.endpoint(), "localhost:2379");
        assert_eq!(config.ca_path, PathBuf::from("ca.crt"));
        assert_eq!(config.dial_timeout, Duration::from_secs(2));
    }

    #[test]
    fn endpoint_joins_host_and_port() {
        let config = EtcdConfig {
            host: "etcd.internal".into(),
            port: 12379,
            ..Default::default()
        };
        assert_eq!(config.endpoint(), "etcd.internal:12379");
    }

    #[tokio::test]
    async fn connect_surfaces_missing_tls_material() {
        let config = EtcdConfig {
            ca_path: "/nonexistent/resetpv-test/ca.crt".into(),
            ..Default::default()
        };
        let err = EtcdGateway::connect(&config).await.unwrap_err();
        match err {
            StoreError::TlsMaterial { path, .. } => {
                assert!(path.contains("ca.crt"));
            }
            other => panic!("expected TlsMaterial, got {other:?}"),
        }
    }
}
