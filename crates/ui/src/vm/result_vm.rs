use exam_core::quiz::{FinishReason, QuizAttempt, ReviewItem};

use crate::vm::time_fmt::format_elapsed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreVm {
    pub percentage: u8,
    pub percentage_label: String,
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    pub timed_out: bool,
    pub elapsed: Option<String>,
    pub can_show_review: bool,
}

/// How a review option is marked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewMark {
    Correct,
    Wrong,
    Plain,
}

impl ReviewMark {
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            ReviewMark::Correct => "✔",
            ReviewMark::Wrong => "✘",
            ReviewMark::Plain => "",
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            ReviewMark::Correct => "review-option correct",
            ReviewMark::Wrong => "review-option wrong",
            ReviewMark::Plain => "review-option",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewOptionVm {
    pub label: String,
    pub mark: ReviewMark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub number: usize,
    pub prompt: String,
    pub unanswered: bool,
    pub options: Vec<ReviewOptionVm>,
}

/// `None` until the attempt has been scored.
#[must_use]
pub fn map_score(attempt: &QuizAttempt) -> Option<ScoreVm> {
    let score = attempt.score()?;
    Some(ScoreVm {
        percentage: score.percentage(),
        percentage_label: format!("{}%", score.percentage()),
        correct: score.correct_count(),
        incorrect: score.incorrect_count(),
        total: score.total(),
        timed_out: attempt.finish_reason() == Some(FinishReason::TimedOut),
        elapsed: attempt
            .finished_at()
            .map(|finished| format_elapsed(attempt.started_at(), finished)),
        can_show_review: attempt.can_show_review(),
    })
}

#[must_use]
pub fn map_review(attempt: &QuizAttempt) -> Vec<ReviewItemVm> {
    attempt
        .score()
        .map(|score| score.incorrect_questions().iter().map(review_item).collect())
        .unwrap_or_default()
}

fn review_item(item: &ReviewItem) -> ReviewItemVm {
    let correct = item.question.correct_key();
    let options = item
        .question
        .options()
        .iter()
        .map(|option| {
            let mark = if option.key() == correct {
                ReviewMark::Correct
            } else if item.selected.as_ref() == Some(option.key()) {
                ReviewMark::Wrong
            } else {
                ReviewMark::Plain
            };
            ReviewOptionVm {
                label: option.label().to_string(),
                mark,
            }
        })
        .collect();

    ReviewItemVm {
        number: item.index + 1,
        prompt: item.question.prompt().to_string(),
        unanswered: item.selected.is_none(),
        options,
    }
}
