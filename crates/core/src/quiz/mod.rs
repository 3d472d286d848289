mod answers;
mod attempt;
mod countdown;
mod score;

pub use answers::AnswerSet;
pub use attempt::{
    AttemptError, AttemptProgress, FinishOutcome, FinishReason, Phase, QuizAttempt, TickOutcome,
};
pub use countdown::{Countdown, CountdownTick, DEFAULT_DURATION_SECS, format_countdown};
pub use score::{ReviewItem, ScoreResult, percentage};
