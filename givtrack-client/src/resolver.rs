//! Record resolver
//!
//! Translates a scanned or typed code into a single contribution record, or a
//! classified non-match: `NoCode` (blank input, no network call), `EmptyResult`
//! (valid request, zero matches), `Backend` (transport/HTTP failure), or
//! `MultiMatch` under the `Reject` policy.

use crate::backend::BackendClient;
use givtrack_common::config::MultiMatchPolicy;
use givtrack_common::{ContributionRecord, Error, Result};

pub struct Resolver {
    client: BackendClient,
    policy: MultiMatchPolicy,
}

impl Resolver {
    pub fn new(client: BackendClient, policy: MultiMatchPolicy) -> Self {
        Self { client, policy }
    }

    /// Resolve a code to exactly one record
    ///
    /// Idempotent: a pure read, safe to re-issue for refresh.
    pub async fn resolve(&self, code: &str) -> Result<ContributionRecord> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::NoCode);
        }

        let mut records = self.client.fetch_by_code(code).await?;
        match records.len() {
            0 => Err(Error::EmptyResult),
            1 => Ok(records.remove(0)),
            n => match self.policy {
                MultiMatchPolicy::First => {
                    tracing::warn!(
                        code = %code,
                        matches = n,
                        "QR code matched multiple records, taking the first"
                    );
                    Ok(records.remove(0))
                }
                MultiMatchPolicy::Reject => Err(Error::MultiMatch(n)),
            },
        }
    }
}
