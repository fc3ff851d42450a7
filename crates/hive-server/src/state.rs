use hive_audit::AuditRecorder;
use hive_lifecycle::{AdminService, BotService};
use hive_token::TokenVerifier;
use std::sync::Arc;

/// Shared handles every request handler works against. Cheap to clone;
/// read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub admins: AdminService,
    pub bots: BotService,
    pub audit: AuditRecorder,
    pub environment: String,
}
