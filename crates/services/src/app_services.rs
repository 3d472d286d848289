use std::sync::Arc;

use tracing::info;

use crate::Clock;
use crate::api::{ExamApi, ExamApiClient};
use crate::auth_service::AuthService;
use crate::config::ApiConfig;
use crate::quiz_service::QuizService;
use crate::session_gate::{AuthSession, SessionGate, SessionToken};

/// Assembles app-facing services around one shared session gate.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionGate>,
    quiz: Arc<QuizService>,
    auth: Arc<AuthService>,
}

impl AppServices {
    /// Build services that talk to the remote exam API described by `config`.
    ///
    /// A token in `config` opens the session immediately.
    #[must_use]
    pub fn remote(config: ApiConfig, clock: Clock) -> Self {
        let token = config.token.clone().and_then(SessionToken::new);
        info!(base_url = %config.base_url, preissued_token = token.is_some(), "exam api configured");
        let services = Self::with_api(Arc::new(ExamApiClient::new(config)), clock);
        if let Some(token) = token {
            services.session.establish(AuthSession::new(token, None));
        }
        services
    }

    /// Build services over any [`ExamApi`], e.g. the in-memory one.
    #[must_use]
    pub fn with_api(api: Arc<dyn ExamApi>, clock: Clock) -> Self {
        let session = Arc::new(SessionGate::new());
        let quiz = Arc::new(QuizService::new(clock, Arc::clone(&api), Arc::clone(&session)));
        let auth = Arc::new(AuthService::new(api, Arc::clone(&session)));
        Self {
            session,
            quiz,
            auth,
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionGate> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }
}
