mod client;
mod in_memory;
mod wire;

use async_trait::async_trait;

use exam_core::forms::{ForgotPasswordForm, RegisterForm, SignInForm};
use exam_core::model::{Exam, Question, Subject};

use crate::error::{AuthError, FetchError};
use crate::session_gate::{AuthSession, SessionToken};

pub use client::ExamApiClient;
pub use in_memory::InMemoryExamApi;

/// Contract for the remote exam service.
///
/// One request per call; implementations never retry.
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the server's message when the credentials are refused.
    async fn sign_in(&self, form: &SignInForm) -> Result<AuthSession, AuthError>;

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the server's message when sign-up is refused.
    async fn sign_up(&self, form: &RegisterForm) -> Result<(), AuthError>;

    /// Ask the server to mail a password-recovery link.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the server's message, for instance
    /// when no account uses the address.
    async fn forgot_password(&self, form: &ForgotPasswordForm) -> Result<(), AuthError>;

    /// Load the question set for an attempt.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Auth` for a rejected token, `Network` for other
    /// non-success statuses, and `Decode` for a malformed body.
    async fn fetch_questions(&self, token: &SessionToken) -> Result<Vec<Question>, FetchError>;

    /// Load the quiz subjects for the dashboard.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ExamApi::fetch_questions`].
    async fn fetch_subjects(&self, token: &SessionToken) -> Result<Vec<Subject>, FetchError>;

    /// Load the exam list.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ExamApi::fetch_questions`].
    async fn fetch_exams(&self, token: &SessionToken) -> Result<Vec<Exam>, FetchError>;
}
