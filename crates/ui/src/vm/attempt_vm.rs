use exam_core::model::OptionKey;
use exam_core::quiz::QuizAttempt;

/// One progress dot per question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DotState {
    Done,
    Current,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: OptionKey,
    pub label: String,
    pub selected: bool,
}

/// Everything the answering screen shows for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub header: String,
    pub timer: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub dots: Vec<DotState>,
    pub can_back: bool,
    pub can_next: bool,
    pub can_finish: bool,
    pub is_last: bool,
}

#[must_use]
pub fn map_question(attempt: &QuizAttempt) -> QuestionVm {
    let progress = attempt.progress();
    let question = attempt.current_question();
    let selection = attempt.current_selection();

    let options = question
        .options()
        .iter()
        .map(|option| OptionVm {
            key: option.key().clone(),
            label: option.label().to_string(),
            selected: selection == Some(option.key()),
        })
        .collect();

    let dots = (0..progress.total)
        .map(|index| match index.cmp(&progress.current_index) {
            std::cmp::Ordering::Less => DotState::Done,
            std::cmp::Ordering::Equal => DotState::Current,
            std::cmp::Ordering::Greater => DotState::Pending,
        })
        .collect();

    QuestionVm {
        header: format!("Question {} of {}", progress.current_index + 1, progress.total),
        timer: attempt.remaining_label(),
        prompt: question.prompt().to_string(),
        options,
        dots,
        can_back: attempt.can_go_back(),
        can_next: attempt.can_go_next(),
        can_finish: attempt.can_finish(),
        is_last: attempt.is_last_question(),
    }
}
