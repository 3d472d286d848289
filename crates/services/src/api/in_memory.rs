use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;

use exam_core::forms::{ForgotPasswordForm, RegisterForm, SignInForm};
use exam_core::model::{Exam, Question, Subject, UserProfile};

use super::ExamApi;
use crate::error::{AuthError, FetchError};
use crate::session_gate::{AuthSession, SessionToken};

#[derive(Clone, Debug)]
struct Account {
    email: String,
    password: String,
    token: String,
    profile: UserProfile,
}

#[derive(Default)]
struct State {
    questions: Vec<Question>,
    subjects: Vec<Subject>,
    exams: Vec<Exam>,
    accounts: Vec<Account>,
    accepted_tokens: Vec<String>,
    failure: Option<StatusCode>,
    question_fetches: usize,
    exam_fetches: usize,
    reset_requests: Vec<String>,
}

impl State {
    fn authorize(&self, token: &SessionToken) -> Result<(), FetchError> {
        if let Some(status) = self.failure {
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Auth,
                other => FetchError::Network(other),
            });
        }
        let known = self
            .accepted_tokens
            .iter()
            .chain(self.accounts.iter().map(|account| &account.token))
            .any(|candidate| candidate == token.expose());
        if known { Ok(()) } else { Err(FetchError::Auth) }
    }
}

/// In-memory exam API for tests and offline previews.
#[derive(Clone, Default)]
pub struct InMemoryExamApi {
    state: Arc<Mutex<State>>,
}

impl InMemoryExamApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(self, questions: Vec<Question>) -> Self {
        self.lock().questions = questions;
        self
    }

    #[must_use]
    pub fn with_subjects(self, subjects: Vec<Subject>) -> Self {
        self.lock().subjects = subjects;
        self
    }

    #[must_use]
    pub fn with_exams(self, exams: Vec<Exam>) -> Self {
        self.lock().exams = exams;
        self
    }

    /// Register credentials that `sign_in` accepts, and the token they yield.
    #[must_use]
    pub fn with_account(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
        profile: UserProfile,
    ) -> Self {
        self.lock().accounts.push(Account {
            email: email.into(),
            password: password.into(),
            token: token.into(),
            profile,
        });
        self
    }

    /// Accept `token` on fetches without a matching account.
    #[must_use]
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.lock().accepted_tokens.push(token.into());
        self
    }

    /// Make every fetch answer with `status`.
    #[must_use]
    pub fn failing(self, status: StatusCode) -> Self {
        self.lock().failure = Some(status);
        self
    }

    /// Number of question fetches served so far, failed ones included.
    #[must_use]
    pub fn question_fetches(&self) -> usize {
        self.lock().question_fetches
    }

    /// Number of exam-list fetches served so far, failed ones included.
    #[must_use]
    pub fn exam_fetches(&self) -> usize {
        self.lock().exam_fetches
    }

    /// Addresses that asked for a recovery mail, in request order.
    #[must_use]
    pub fn reset_requests(&self) -> Vec<String> {
        self.lock().reset_requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ExamApi for InMemoryExamApi {
    async fn sign_in(&self, form: &SignInForm) -> Result<AuthSession, AuthError> {
        let state = self.lock();
        let account = state
            .accounts
            .iter()
            .find(|account| {
                account.email.eq_ignore_ascii_case(form.email.trim())
                    && account.password == form.password
            })
            .ok_or_else(|| AuthError::Rejected("incorrect email or password".into()))?;
        let token = SessionToken::new(account.token.clone())
            .ok_or_else(|| AuthError::Decode("account has an empty token".into()))?;
        Ok(AuthSession::new(token, Some(account.profile.clone())))
    }

    async fn sign_up(&self, form: &RegisterForm) -> Result<(), AuthError> {
        let state = self.lock();
        let taken = state
            .accounts
            .iter()
            .any(|account| account.email.eq_ignore_ascii_case(form.email.trim()));
        if taken {
            return Err(AuthError::Rejected("user already exists".into()));
        }
        Ok(())
    }

    async fn forgot_password(&self, form: &ForgotPasswordForm) -> Result<(), AuthError> {
        let mut state = self.lock();
        let email = form.email.trim();
        let known = state
            .accounts
            .iter()
            .any(|account| account.email.eq_ignore_ascii_case(email));
        if !known {
            return Err(AuthError::Rejected(
                "There is no account with this email address".into(),
            ));
        }
        state.reset_requests.push(email.to_string());
        Ok(())
    }

    async fn fetch_questions(&self, token: &SessionToken) -> Result<Vec<Question>, FetchError> {
        let mut state = self.lock();
        state.question_fetches += 1;
        state.authorize(token)?;
        Ok(state.questions.clone())
    }

    async fn fetch_subjects(&self, token: &SessionToken) -> Result<Vec<Subject>, FetchError> {
        let state = self.lock();
        state.authorize(token)?;
        Ok(state.subjects.clone())
    }

    async fn fetch_exams(&self, token: &SessionToken) -> Result<Vec<Exam>, FetchError> {
        let mut state = self.lock();
        state.exam_fetches += 1;
        state.authorize(token)?;
        Ok(state.exams.clone())
    }
}

#[cfg(test)]
mod tests {
    use exam_core::model::UserId;

    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::new("u1"),
            username: "mona".into(),
            first_name: "Mona".into(),
            last_name: "Adel".into(),
            email: "mona@example.com".into(),
            phone: String::new(),
            role: "user".into(),
            verified: true,
        }
    }

    #[tokio::test]
    async fn sign_in_matches_registered_account() {
        let api = InMemoryExamApi::new().with_account("mona@example.com", "Secret1!x", "tok", profile());

        let session = api
            .sign_in(&SignInForm::new("MONA@example.com", "Secret1!x"))
            .await
            .unwrap();
        assert_eq!(session.token.expose(), "tok");

        let err = api
            .sign_in(&SignInForm::new("mona@example.com", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected(_)));
    }

    #[tokio::test]
    async fn forgot_password_records_known_addresses_only() {
        let api = InMemoryExamApi::new().with_account("mona@example.com", "Secret1!x", "tok", profile());

        api.forgot_password(&ForgotPasswordForm::new(" mona@example.com "))
            .await
            .unwrap();
        let err = api
            .forgot_password(&ForgotPasswordForm::new("ghost@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Rejected(_)));
        assert_eq!(api.reset_requests(), vec!["mona@example.com".to_string()]);
    }

    #[tokio::test]
    async fn unknown_token_is_an_auth_failure() {
        let api = InMemoryExamApi::new().with_token("good");
        let bad = SessionToken::new("bad").unwrap();
        assert!(matches!(api.fetch_questions(&bad).await, Err(FetchError::Auth)));
        assert_eq!(api.question_fetches(), 1);
    }

    #[tokio::test]
    async fn configured_failure_maps_status() {
        let token = SessionToken::new("good").unwrap();
        let api = InMemoryExamApi::new()
            .with_token("good")
            .failing(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(
            api.fetch_exams(&token).await,
            Err(FetchError::Network(StatusCode::INTERNAL_SERVER_ERROR))
        ));

        let api = InMemoryExamApi::new().with_token("good").failing(StatusCode::FORBIDDEN);
        assert!(matches!(api.fetch_subjects(&token).await, Err(FetchError::Auth)));
    }
}
