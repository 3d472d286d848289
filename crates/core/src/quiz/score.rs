use crate::model::{OptionKey, Question};
use crate::quiz::answers::AnswerSet;

/// A question the user got wrong (or skipped), with what they picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    /// Position of the question in the attempt.
    pub index: usize,
    pub question: Question,
    pub selected: Option<OptionKey>,
}

/// Outcome of grading an attempt. Derived from questions + answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    correct_count: usize,
    incorrect_count: usize,
    percentage: u8,
    incorrect_questions: Vec<ReviewItem>,
}

impl ScoreResult {
    /// Grade `answers` against `questions`.
    ///
    /// Returns `None` for an empty question list; there is no percentage of nothing.
    #[must_use]
    pub fn compute(questions: &[Question], answers: &AnswerSet) -> Option<Self> {
        let total = questions.len();
        let mut incorrect_questions = Vec::new();
        for (index, question) in questions.iter().enumerate() {
            let selected = answers.get(index);
            if !question.is_correct(selected) {
                incorrect_questions.push(ReviewItem {
                    index,
                    question: question.clone(),
                    selected: selected.cloned(),
                });
            }
        }

        let incorrect_count = incorrect_questions.len();
        let correct_count = total - incorrect_count;
        let percentage = percentage(correct_count, total)?;

        Some(Self {
            correct_count,
            incorrect_count,
            percentage,
            incorrect_questions,
        })
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.incorrect_count
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.correct_count + self.incorrect_count
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    #[must_use]
    pub fn incorrect_questions(&self) -> &[ReviewItem] {
        &self.incorrect_questions
    }

    #[must_use]
    pub fn has_incorrect(&self) -> bool {
        self.incorrect_count > 0
    }
}

/// `round(100 * correct / total)` with halves rounded up, in integer math.
///
/// Returns `None` when `total` is zero or `correct > total`.
#[must_use]
pub fn percentage(correct: usize, total: usize) -> Option<u8> {
    if total == 0 || correct > total {
        return None;
    }
    let correct = u128::try_from(correct).ok()?;
    let total = u128::try_from(total).ok()?;
    let rounded = (200 * correct + total) / (2 * total);
    u8::try_from(rounded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, QuestionId};

    fn key(value: &str) -> OptionKey {
        OptionKey::new(value).unwrap()
    }

    fn question(id: &str, correct: &str) -> Question {
        let options = ["a", "b", "c", "x"]
            .iter()
            .map(|k| AnswerOption::new(key(k), k.to_uppercase()))
            .collect();
        Question::new(QuestionId::new(id), format!("Prompt {id}"), options, key(correct)).unwrap()
    }

    fn answers_for(selections: &[Option<&str>]) -> AnswerSet {
        let mut answers = AnswerSet::new(selections.len());
        for (index, selection) in selections.iter().enumerate() {
            if let Some(value) = selection {
                answers.select(index, key(value));
            }
        }
        answers
    }

    #[test]
    fn two_of_three_scores_sixty_seven() {
        let questions = vec![question("q1", "a"), question("q2", "b"), question("q3", "c")];
        let answers = answers_for(&[Some("a"), Some("x"), Some("c")]);

        let score = ScoreResult::compute(&questions, &answers).unwrap();

        assert_eq!(score.correct_count(), 2);
        assert_eq!(score.incorrect_count(), 1);
        assert_eq!(score.percentage(), 67);
        assert_eq!(score.incorrect_questions().len(), 1);
        assert_eq!(score.incorrect_questions()[0].question.id(), &QuestionId::new("q2"));
        assert_eq!(score.incorrect_questions()[0].selected, Some(key("x")));
    }

    #[test]
    fn unanswered_questions_are_reviewed_in_order() {
        let questions = vec![
            question("q1", "a"),
            question("q2", "b"),
            question("q3", "c"),
            question("q4", "a"),
        ];
        let answers = answers_for(&[None, Some("b"), Some("a"), None]);

        let score = ScoreResult::compute(&questions, &answers).unwrap();

        let indices: Vec<usize> = score.incorrect_questions().iter().map(|i| i.index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
        assert_eq!(score.correct_count() + score.incorrect_count(), questions.len());
        assert_eq!(score.incorrect_questions()[0].selected, None);
    }

    #[test]
    fn empty_questions_have_no_score() {
        assert!(ScoreResult::compute(&[], &AnswerSet::new(0)).is_none());
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), Some(13)); // 12.5
        assert_eq!(percentage(1, 3), Some(33));
        assert_eq!(percentage(2, 3), Some(67));
        assert_eq!(percentage(0, 5), Some(0));
        assert_eq!(percentage(5, 5), Some(100));
        assert_eq!(percentage(0, 0), None);
        assert_eq!(percentage(4, 3), None);
    }

    #[test]
    fn counts_always_sum_to_total() {
        let questions: Vec<Question> = (0..7)
            .map(|i| question(&format!("q{i}"), if i % 2 == 0 { "a" } else { "b" }))
            .collect();
        for mask in 0_u32..(1 << 7) {
            let selections: Vec<Option<&str>> = (0..7)
                .map(|i| match (mask >> i) & 1 {
                    1 => Some("a"),
                    _ if i % 3 == 0 => None,
                    _ => Some("b"),
                })
                .collect();
            let score = ScoreResult::compute(&questions, &answers_for(&selections)).unwrap();
            assert_eq!(score.total(), questions.len());
            assert_eq!(
                Some(score.percentage()),
                percentage(score.correct_count(), questions.len())
            );
        }
    }
}
