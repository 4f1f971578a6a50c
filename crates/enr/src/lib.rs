//! Ethereum Node Record parsing and signature validation.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/dvn-labs/dvn/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use std::net::Ipv4Addr;

use enr::{Enr, EnrPublicKey as _};
use k256::ecdsa::SigningKey;

/// The identity key type for the `v4` scheme (secp256k1).
pub type SchemeKey = SigningKey;

/// Errors produced when validating an ENR string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrError {
    /// The input was empty (or whitespace only).
    #[error("ENR is empty")]
    Empty,

    /// The record failed to decode or its signature did not verify.
    #[error("invalid ENR: {0}")]
    Invalid(String),
}

/// A validated Ethereum Node Record.
///
/// Construction goes through [`validate`], which decodes the record under
/// the `v4` identity scheme and verifies the embedded signature against the
/// embedded public key. An invalid record is rejected whole; there is no
/// partially trusted state.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    raw: String,
    inner: Enr<SchemeKey>,
}

impl NodeRecord {
    /// The record text as provided, trimmed of surrounding whitespace.
    ///
    /// This is the form passed to external tooling; re-encoding is avoided
    /// so the bytes the peer signed are the bytes that travel.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The record's sequence number.
    pub fn seq(&self) -> u64 {
        self.inner.seq()
    }

    /// The declared IPv4 address, if any.
    pub fn ip4(&self) -> Option<Ipv4Addr> {
        self.inner.ip4()
    }

    /// The declared IPv4 TCP port, if any.
    pub fn tcp4(&self) -> Option<u16> {
        self.inner.tcp4()
    }

    /// The declared IPv4 UDP port, if any.
    pub fn udp4(&self) -> Option<u16> {
        self.inner.udp4()
    }

    /// The compressed secp256k1 public key, hex encoded.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.inner.public_key().encode())
    }
}

impl std::fmt::Display for NodeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse and cryptographically verify an ENR string.
///
/// Accepts the canonical `enr:`-prefixed base64 form; the prefix is
/// optional and surrounding whitespace is ignored. This is a total
/// function: every input yields `Ok` or a typed error, and it performs no
/// I/O.
pub fn validate(s: &str) -> Result<NodeRecord, EnrError> {
    let raw = s.trim();
    if raw.is_empty() {
        return Err(EnrError::Empty);
    }
    let inner =
        raw.parse::<Enr<SchemeKey>>().map_err(|e| EnrError::Invalid(e.to_string()))?;
    Ok(NodeRecord { raw: raw.to_owned(), inner })
}
