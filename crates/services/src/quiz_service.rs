use std::sync::Arc;

use tracing::{debug, info};

use exam_core::model::{Exam, Subject};
use exam_core::quiz::{DEFAULT_DURATION_SECS, QuizAttempt};

use crate::Clock;
use crate::api::ExamApi;
use crate::error::FetchError;
use crate::session_gate::SessionGate;

/// Loads quiz data for the signed-in user and builds attempts from it.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    api: Arc<dyn ExamApi>,
    session: Arc<SessionGate>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn ExamApi>, session: Arc<SessionGate>) -> Self {
        Self {
            clock,
            api,
            session,
        }
    }

    /// Fetch the question set and start a fresh attempt.
    ///
    /// `duration_secs` of `None` or zero uses the default ten-minute countdown.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Auth` when nobody is signed in or the token is rejected,
    /// `FetchError::Empty` when the API returns no questions, and the other
    /// `FetchError` variants for transport or decode failures.
    pub async fn start_attempt(&self, duration_secs: Option<u32>) -> Result<QuizAttempt, FetchError> {
        let token = self.session.token()?;
        let questions = self.api.fetch_questions(&token).await?;
        if questions.is_empty() {
            info!("question set is empty; no attempt started");
            return Err(FetchError::Empty);
        }

        let duration = duration_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_DURATION_SECS);
        let attempt = QuizAttempt::with_duration(questions, duration, self.clock.now())?;
        info!(
            questions = attempt.total_questions(),
            duration_secs = duration,
            "quiz attempt started"
        );
        Ok(attempt)
    }

    /// Quiz subjects for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the session is missing or the request fails.
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, FetchError> {
        let token = self.session.token()?;
        let subjects = self.api.fetch_subjects(&token).await?;
        debug!(count = subjects.len(), "subjects loaded");
        Ok(subjects)
    }

    /// Exams whose title contains `query`, ignoring case. A blank query lists all.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the session is missing or the request fails.
    pub async fn list_exams(&self, query: &str) -> Result<Vec<Exam>, FetchError> {
        let token = self.session.token()?;
        let exams = self.api.fetch_exams(&token).await?;
        Ok(exams
            .into_iter()
            .filter(|exam| exam.matches_query(query))
            .collect())
    }
}
