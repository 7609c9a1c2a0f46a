//! In-memory stand-ins for the outside collaborators, used by unit and router
//! tests in place of Postgres, Redis and S3.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::config::Config;
use crate::document::SectionOrder;
use crate::errors::AppError;
use crate::models::resume::{ResumeDraft, ResumeRow};
use crate::resumes::print::{PrintError, PrintJob, PrintReceipt, PrintSink};
use crate::resumes::repository::ResumeRepository;
use crate::session::store::SessionStore;
use crate::session::EditingSession;
use crate::state::AppState;

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/test".to_string(),
        redis_url: "redis://localhost".to_string(),
        s3_bucket: "resumes-test".to_string(),
        s3_endpoint: "http://localhost:9000".to_string(),
        s3_region: "us-east-1".to_string(),
        aws_access_key_id: "test".to_string(),
        aws_secret_access_key: "test".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        session_ttl_secs: 60,
        export_url_ttl_secs: 60,
        export_auto_print: true,
    }
}

#[derive(Default)]
pub struct InMemoryResumeRepository {
    rows: Mutex<Vec<ResumeRow>>,
}

impl InMemoryResumeRepository {
    pub fn rows(&self) -> Vec<ResumeRow> {
        self.rows.lock().unwrap().clone()
    }

    /// Stores a record verbatim, bypassing document encoding.
    pub fn insert_raw(&self, user_id: Uuid, name: &str, data: &str) -> ResumeRow {
        let now = Utc::now();
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            data: data.to_string(),
            section_order: Json(SectionOrder::default()),
            layout_id: 1,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(row.clone());
        row
    }

    fn contains(&self, id: Uuid) -> bool {
        self.rows.lock().unwrap().iter().any(|row| row.id == id)
    }
}

#[async_trait]
impl ResumeRepository for InMemoryResumeRepository {
    async fn save(&self, draft: ResumeDraft) -> Result<ResumeRow, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let existing = rows
            .iter_mut()
            .find(|row| Some(row.id) == draft.id && row.user_id == draft.user_id);
        if let Some(row) = existing {
            row.name = draft.name;
            row.data = draft.data;
            row.section_order = Json(draft.section_order);
            row.layout_id = draft.layout_id;
            row.updated_at = Utc::now();
            return Ok(row.clone());
        }
        let now = Utc::now();
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            name: draft.name,
            data: draft.data,
            section_order: Json(draft.section_order),
            layout_id: draft.layout_id,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id && row.user_id == user_id)
            .cloned())
    }

    async fn list(&self, user_id: Uuid, search: Option<&str>) -> Result<Vec<ResumeRow>, AppError> {
        let needle = search
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        let mut found: Vec<ResumeRow> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.user_id == user_id)
            .filter(|row| match &needle {
                Some(q) => {
                    row.name.to_lowercase().contains(q.as_str())
                        || row.created_at.format("%Y-%m-%d").to_string().contains(q.as_str())
                }
                None => true,
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| !(row.id == id && row.user_id == user_id));
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<Uuid, EditingSession>>,
}

impl InMemorySessionStore {
    pub fn get(&self, id: Uuid) -> Option<EditingSession> {
        self.sessions.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<EditingSession>, AppError> {
        Ok(self.get(id))
    }

    async fn save(&self, session: &EditingSession) -> Result<(), AppError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn discard(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.sessions.lock().unwrap().remove(&id).is_some())
    }
}

/// Records every job. While failing, every submit errors, as a blocked
/// print window or unreachable bucket would.
pub struct RecordingPrintSink {
    jobs: Mutex<Vec<PrintJob>>,
    fail: AtomicBool,
    resumes: Arc<InMemoryResumeRepository>,
    unsaved_submits: Mutex<usize>,
}

impl RecordingPrintSink {
    pub fn jobs(&self) -> Vec<PrintJob> {
        self.jobs.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// True when every submitted job referred to an already-saved record.
    pub fn saw_saved_record(&self) -> bool {
        !self.jobs().is_empty() && *self.unsaved_submits.lock().unwrap() == 0
    }
}

#[async_trait]
impl PrintSink for RecordingPrintSink {
    async fn submit(&self, job: PrintJob) -> Result<PrintReceipt, PrintError> {
        if !self.resumes.contains(job.resume_id) {
            *self.unsaved_submits.lock().unwrap() += 1;
        }
        let resume_id = job.resume_id;
        self.jobs.lock().unwrap().push(job);
        if self.fail.load(Ordering::SeqCst) {
            return Err(PrintError::Upload("print window was blocked".to_string()));
        }
        Ok(PrintReceipt {
            location: format!("memory://exports/{resume_id}"),
            print_url: format!("http://print.test/{resume_id}"),
            expires_in_secs: 60,
        })
    }
}

/// An `AppState` wired to in-memory doubles, with handles to inspect them.
pub struct TestHarness {
    pub state: AppState,
    pub resumes: Arc<InMemoryResumeRepository>,
    pub sessions: Arc<InMemorySessionStore>,
    pub printer: Arc<RecordingPrintSink>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::build(false)
    }

    pub fn with_failing_printer() -> Self {
        Self::build(true)
    }

    fn build(fail: bool) -> Self {
        let resumes = Arc::new(InMemoryResumeRepository::default());
        let sessions = Arc::new(InMemorySessionStore::default());
        let printer = Arc::new(RecordingPrintSink {
            jobs: Mutex::new(Vec::new()),
            fail: AtomicBool::new(fail),
            resumes: resumes.clone(),
            unsaved_submits: Mutex::new(0),
        });
        let state = AppState {
            resumes: resumes.clone(),
            sessions: sessions.clone(),
            printer: printer.clone(),
            config: test_config(),
        };
        Self {
            state,
            resumes,
            sessions,
            printer,
        }
    }
}
