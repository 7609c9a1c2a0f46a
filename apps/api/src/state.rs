use std::sync::Arc;

use crate::config::Config;
use crate::resumes::print::PrintSink;
use crate::resumes::repository::ResumeRepository;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Each outside collaborator sits behind a trait so handlers run unchanged
/// against Postgres/Redis/S3 in production and in-memory doubles in tests.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<dyn ResumeRepository>,
    pub sessions: Arc<dyn SessionStore>,
    /// Where finished export documents are handed off for printing.
    pub printer: Arc<dyn PrintSink>,
    pub config: Config,
}
