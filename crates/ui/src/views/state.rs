use dioxus::prelude::*;

use services::FetchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    SignInRequired,
    FetchFailed,
    NoQuestions,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::SignInRequired => "Please sign in again.",
            ViewError::FetchFailed => "Error in Fetch Data",
            ViewError::NoQuestions => "No questions available.",
        }
    }
}

impl From<FetchError> for ViewError {
    fn from(err: FetchError) -> Self {
        tracing::warn!(error = %err, "view load failed");
        match err {
            FetchError::Auth => ViewError::SignInRequired,
            FetchError::Empty => ViewError::NoQuestions,
            _ => ViewError::FetchFailed,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
