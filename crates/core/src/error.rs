use thiserror::Error;

use crate::forms::FormErrors;
use crate::model::QuestionError;
use crate::quiz::AttemptError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error("invalid form: {0}")]
    Form(#[from] FormErrors),
}
