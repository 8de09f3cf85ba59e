//! givtrack client core
//!
//! The QR-resolution and contribution-record retrieval pipeline: backend HTTP
//! client, record resolver, shared session state, scan-event channel, and the
//! notifier capability consumed by presentation.

pub mod backend;
pub mod notify;
pub mod resolver;
pub mod scan;
pub mod session;

pub use backend::BackendClient;
pub use notify::{LogNotifier, Notifier};
pub use resolver::Resolver;
pub use scan::{scan_channel, run_scan_loop, ScanEvent};
pub use session::{Session, SessionEvent, SessionSnapshot};
