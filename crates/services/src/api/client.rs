use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use exam_core::forms::{ForgotPasswordForm, RegisterForm, SignInForm};
use exam_core::model::{Exam, Question, Subject};

use super::ExamApi;
use super::wire::{
    ApiMessage, ExamsEnvelope, ForgotPasswordRequest, QuestionsEnvelope, SignInRequest,
    SignInResponse, SignUpRequest, SubjectsEnvelope,
};
use crate::config::ApiConfig;
use crate::error::{AuthError, FetchError};
use crate::session_gate::{AuthSession, SessionToken};

const TOKEN_HEADER: &str = "token";
const JSON: &str = "application/json";

/// reqwest-backed client for the exam REST API.
#[derive(Clone)]
pub struct ExamApiClient {
    client: Client,
    config: ApiConfig,
}

impl ExamApiClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &SessionToken,
    ) -> Result<T, FetchError> {
        let url = self.config.endpoint(path);
        debug!(%url, "exam api request");

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, JSON)
            .header(TOKEN_HEADER, token.expose())
            .send()
            .await?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!(path, %status, "exam api rejected session token");
            return Err(FetchError::Auth);
        }
        if !status.is_success() {
            warn!(path, %status, "exam api request failed");
            return Err(FetchError::Network(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| {
            warn!(path, error = %err, "exam api body did not decode");
            FetchError::from(err)
        })
    }

    async fn rejection(response: Response, fallback: &str) -> AuthError {
        let status = response.status();
        let message = response
            .json::<ApiMessage>()
            .await
            .unwrap_or_default()
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        warn!(%status, %message, "auth request rejected");
        AuthError::Rejected(message)
    }
}

#[async_trait]
impl ExamApi for ExamApiClient {
    async fn sign_in(&self, form: &SignInForm) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(self.config.endpoint("auth/signin"))
            .json(&SignInRequest::from(form))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "Authentication failed.").await);
        }

        let body = response.text().await?;
        let payload: SignInResponse = serde_json::from_str(&body)?;
        let token = SessionToken::new(payload.token)
            .ok_or_else(|| AuthError::Decode("sign-in response carried an empty token".into()))?;
        Ok(AuthSession::new(token, Some(payload.user.into_profile())))
    }

    async fn sign_up(&self, form: &RegisterForm) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.config.endpoint("auth/signup"))
            .json(&SignUpRequest::from(form))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response, "Signup failed. Please try again.").await);
        }
        Ok(())
    }

    async fn forgot_password(&self, form: &ForgotPasswordForm) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.config.endpoint("auth/forgotPassword"))
            .json(&ForgotPasswordRequest::from(form))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(
                Self::rejection(response, "Something went wrong. Please try again.").await,
            );
        }
        Ok(())
    }

    async fn fetch_questions(&self, token: &SessionToken) -> Result<Vec<Question>, FetchError> {
        let envelope: QuestionsEnvelope = self.get_json("questions", token).await?;
        let questions = envelope.into_questions()?;
        debug!(count = questions.len(), "questions loaded");
        Ok(questions)
    }

    async fn fetch_subjects(&self, token: &SessionToken) -> Result<Vec<Subject>, FetchError> {
        let envelope: SubjectsEnvelope = self.get_json("subjects", token).await?;
        Ok(envelope.into_subjects())
    }

    async fn fetch_exams(&self, token: &SessionToken) -> Result<Vec<Exam>, FetchError> {
        let envelope: ExamsEnvelope = self.get_json("exams", token).await?;
        Ok(envelope.into_exams())
    }
}
