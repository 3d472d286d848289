use std::sync::Arc;

use tracing::{info, warn};

use exam_core::forms::{ForgotPasswordForm, RegisterForm, SignInForm};
use exam_core::model::UserProfile;

use crate::api::ExamApi;
use crate::error::AuthError;
use crate::session_gate::SessionGate;

/// Sign-in, sign-up and sign-out on top of the session gate.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn ExamApi>,
    session: Arc<SessionGate>,
}

impl AuthService {
    #[must_use]
    pub fn new(api: Arc<dyn ExamApi>, session: Arc<SessionGate>) -> Self {
        Self { api, session }
    }

    /// Validate the form, exchange credentials for a session and store it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` without calling the API when the form has
    /// field errors, `AuthError::Rejected` when the API refuses the credentials.
    pub async fn sign_in(&self, form: &SignInForm) -> Result<Option<UserProfile>, AuthError> {
        form.check()?;
        let session = self.api.sign_in(form).await.inspect_err(|err| {
            warn!(error = %err, "sign-in failed");
        })?;
        let profile = session.profile.clone();
        self.session.establish(session);
        Ok(profile)
    }

    /// Validate the form and create the account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` for field errors, `AuthError::Rejected` when
    /// the API refuses the registration.
    pub async fn sign_up(&self, form: &RegisterForm) -> Result<(), AuthError> {
        form.check()?;
        self.api.sign_up(form).await?;
        info!(username = %form.username.trim(), "account created");
        Ok(())
    }

    /// Validate the address and ask the API to send a recovery mail.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` for a missing or malformed address,
    /// `AuthError::Rejected` with the server's message otherwise.
    pub async fn request_password_reset(&self, form: &ForgotPasswordForm) -> Result<(), AuthError> {
        form.check()?;
        self.api.forgot_password(form).await.inspect_err(|err| {
            warn!(error = %err, "password recovery request failed");
        })?;
        info!("password recovery mail requested");
        Ok(())
    }

    pub fn sign_out(&self) {
        self.session.clear();
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.session.profile()
    }
}
