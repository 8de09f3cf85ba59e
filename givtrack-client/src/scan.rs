//! Scan event delivery
//!
//! The camera collaborator delivers `{type, data}` once per scan; the core
//! only uses `data`. A bounded single-slot channel carries at most one
//! in-flight code at a time; the session's sequence-number ordering already
//! defines the superseding contract, so the channel does not deduplicate.

use crate::session::Session;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// One decoded scan as delivered by the code source
#[derive(Debug, Clone)]
pub struct ScanEvent {
    /// Symbology reported by the scanner (e.g. "qr")
    pub kind: String,
    /// Decoded code string, the lookup key
    pub data: String,
}

/// Bounded single-slot channel between the code source and the session
pub fn scan_channel() -> (mpsc::Sender<ScanEvent>, mpsc::Receiver<ScanEvent>) {
    mpsc::channel(1)
}

/// Forward scanned codes into the session until the sender side closes
pub async fn run_scan_loop(session: Arc<Session>, mut rx: mpsc::Receiver<ScanEvent>) {
    while let Some(event) = rx.recv().await {
        debug!(kind = %event.kind, data = %event.data, "Scan delivered");
        session.select_record(&event.data).await;
    }
}
