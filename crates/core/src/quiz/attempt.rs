use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{OptionKey, Question};
use crate::quiz::answers::AnswerSet;
use crate::quiz::countdown::{Countdown, CountdownTick, DEFAULT_DURATION_SECS, format_countdown};
use crate::quiz::score::ScoreResult;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("an attempt needs at least one question")]
    NoQuestions,

    #[error("attempt duration must be > 0 seconds")]
    ZeroDuration,

    #[error("question index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("option {key} does not belong to question {index}")]
    UnknownOption { index: usize, key: String },

    #[error("answers can only change while answering")]
    NotAnswering,
}

//
// ─── STATES ────────────────────────────────────────────────────────────────────
//

/// Display/interaction mode of an attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Answering,
    ScoreSummary,
    Review,
}

/// Why an attempt left `Answering`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishReason {
    Submitted,
    TimedOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishOutcome {
    Finished,
    /// The current question has no answer yet.
    Disabled,
    AlreadyFinished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer not running; nothing changed.
    Idle,
    Ticked { remaining: u32 },
    /// The countdown hit zero and the attempt was finished.
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptProgress {
    pub current_index: usize,
    pub total: usize,
    pub answered: usize,
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// One run through a quiz: navigation, selection, countdown, scoring and review.
///
/// Never empty. The countdown runs only while `Answering` and is stopped on
/// every exit from it, so late ticks cannot re-finish or mutate a scored attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAttempt {
    questions: Vec<Question>,
    current_index: usize,
    answers: AnswerSet,
    countdown: Countdown,
    phase: Phase,
    score: Option<ScoreResult>,
    finish_reason: Option<FinishReason>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizAttempt {
    /// Start an attempt with the default ten-minute countdown.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::NoQuestions` if `questions` is empty.
    pub fn new(questions: Vec<Question>, started_at: DateTime<Utc>) -> Result<Self, AttemptError> {
        Self::with_duration(questions, DEFAULT_DURATION_SECS, started_at)
    }

    /// Start an attempt with a custom countdown length.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::NoQuestions` if `questions` is empty and
    /// `AttemptError::ZeroDuration` if `duration_secs` is zero.
    pub fn with_duration(
        questions: Vec<Question>,
        duration_secs: u32,
        started_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        if questions.is_empty() {
            return Err(AttemptError::NoQuestions);
        }
        if duration_secs == 0 {
            return Err(AttemptError::ZeroDuration);
        }

        let answers = AnswerSet::new(questions.len());
        Ok(Self {
            questions,
            current_index: 0,
            answers,
            countdown: Countdown::new(duration_secs),
            phase: Phase::Answering,
            score: None,
            finish_reason: None,
            started_at,
            finished_at: None,
        })
    }

    // ─── Projections ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    #[must_use]
    pub fn current_selection(&self) -> Option<&OptionKey> {
        self.answers.get(self.current_index)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Remaining time as `MM:SS`.
    #[must_use]
    pub fn remaining_label(&self) -> String {
        format_countdown(self.countdown.remaining())
    }

    #[must_use]
    pub fn timer_active(&self) -> bool {
        self.countdown.is_active()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> AttemptProgress {
        AttemptProgress {
            current_index: self.current_index,
            total: self.questions.len(),
            answered: self.answers.answered_count(),
        }
    }

    /// The graded result, once the attempt has left `Answering`.
    #[must_use]
    pub fn score(&self) -> Option<&ScoreResult> {
        self.score.as_ref()
    }

    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    // ─── Navigation policy ─────────────────────────────────────────────────────

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.phase == Phase::Answering && self.current_index > 0
    }

    /// Forward navigation needs an answer on the current question.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.phase == Phase::Answering
            && !self.is_last_question()
            && self.answers.is_answered(self.current_index)
    }

    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.phase == Phase::Answering && self.answers.is_answered(self.current_index)
    }

    #[must_use]
    pub fn can_show_review(&self) -> bool {
        self.phase == Phase::ScoreSummary && self.score.as_ref().is_some_and(ScoreResult::has_incorrect)
    }

    // ─── Mutators ──────────────────────────────────────────────────────────────

    /// Record `key` as the answer for question `index`, returning the previous selection.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::NotAnswering` after finish, `IndexOutOfRange` for a bad
    /// index, and `UnknownOption` if `key` is not one of that question's options.
    pub fn select_option(
        &mut self,
        index: usize,
        key: OptionKey,
    ) -> Result<Option<OptionKey>, AttemptError> {
        if self.phase != Phase::Answering {
            return Err(AttemptError::NotAnswering);
        }
        let len = self.questions.len();
        let question = self
            .questions
            .get(index)
            .ok_or(AttemptError::IndexOutOfRange { index, len })?;
        if !question.has_option(&key) {
            return Err(AttemptError::UnknownOption {
                index,
                key: key.as_str().to_string(),
            });
        }

        self.answers
            .select(index, key)
            .ok_or(AttemptError::IndexOutOfRange { index, len })
    }

    /// Answer the question currently shown.
    ///
    /// # Errors
    ///
    /// See [`QuizAttempt::select_option`].
    pub fn select_current(&mut self, key: OptionKey) -> Result<Option<OptionKey>, AttemptError> {
        self.select_option(self.current_index, key)
    }

    /// Move to the next question. No-op on the last question; returns whether it moved.
    pub fn next(&mut self) -> bool {
        if self.phase != Phase::Answering || self.is_last_question() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Move to the previous question. No-op on the first question; returns whether it moved.
    pub fn back(&mut self) -> bool {
        if self.phase != Phase::Answering || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// User-submitted finish. Requires an answer on the current question.
    pub fn finish(&mut self, now: DateTime<Utc>) -> FinishOutcome {
        if self.phase != Phase::Answering {
            return FinishOutcome::AlreadyFinished;
        }
        if !self.can_finish() {
            return FinishOutcome::Disabled;
        }
        self.complete(FinishReason::Submitted, now);
        FinishOutcome::Finished
    }

    /// Advance the countdown by one second, finishing the attempt when it reaches zero.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if self.phase != Phase::Answering {
            return TickOutcome::Idle;
        }
        match self.countdown.tick() {
            CountdownTick::Idle => TickOutcome::Idle,
            CountdownTick::Running { remaining } => TickOutcome::Ticked { remaining },
            CountdownTick::Expired => {
                self.complete(FinishReason::TimedOut, now);
                TickOutcome::Expired
            }
        }
    }

    /// Reveal the incorrect-answer list. Returns `false` (no change) unless the
    /// score summary is showing and at least one answer was wrong.
    pub fn show_review(&mut self) -> bool {
        if !self.can_show_review() {
            return false;
        }
        self.phase = Phase::Review;
        true
    }

    /// Release the countdown when the attempt is discarded mid-way.
    pub fn abandon(&mut self) {
        self.countdown.stop();
    }

    fn complete(&mut self, reason: FinishReason, now: DateTime<Utc>) {
        self.countdown.stop();
        self.score = ScoreResult::compute(&self.questions, &self.answers);
        self.finish_reason = Some(reason);
        self.finished_at = Some(now);
        self.phase = Phase::ScoreSummary;
    }
}
