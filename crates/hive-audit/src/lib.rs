//! # hive-audit
//!
//! Records every privileged action as an immutable audit fact.
//!
//! Writes default to detached dispatch: the handler does not block its
//! response on the audit write, so the HTTP response can be sent before the
//! record is durable and a crash in that window drops the record. Callers
//! needing stronger guarantees hold the returned task handle or use
//! `record_now`. A failed audit write is logged and never rolls back the
//! business mutation that triggered it.

pub mod origin;
pub mod recorder;

pub use origin::RequestOrigin;
pub use recorder::{AuditEntry, AuditRecorder};
