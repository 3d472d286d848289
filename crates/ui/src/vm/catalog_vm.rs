use exam_core::model::{Exam, Subject, UserProfile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileVm {
    pub display_name: String,
    pub username: String,
    pub email: String,
}

impl From<&UserProfile> for ProfileVm {
    fn from(profile: &UserProfile) -> Self {
        Self {
            display_name: profile.display_name(),
            username: format!("@{}", profile.username),
            email: profile.email.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectCardVm {
    pub name: String,
    pub icon: Option<String>,
}

impl From<&Subject> for SubjectCardVm {
    fn from(subject: &Subject) -> Self {
        Self {
            name: subject.display_name().to_string(),
            icon: subject.icon().map(ToString::to_string),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamRowVm {
    pub id: String,
    pub title: String,
    pub minutes: u32,
    pub duration_label: String,
    pub questions_label: String,
}

impl From<&Exam> for ExamRowVm {
    fn from(exam: &Exam) -> Self {
        Self {
            id: exam.id().to_string(),
            title: exam.title().to_string(),
            minutes: exam.duration_minutes(),
            duration_label: format!("{} Minutes", exam.duration_minutes()),
            questions_label: format!("{} Questions", exam.question_count()),
        }
    }
}

#[must_use]
pub fn map_subject_cards(subjects: &[Subject]) -> Vec<SubjectCardVm> {
    subjects.iter().map(SubjectCardVm::from).collect()
}

/// Active exams only; inactive ones cannot be started.
#[must_use]
/// Active exams whose title matches `query`; a blank query keeps them all.
pub fn map_exam_rows(exams: &[Exam], query: &str) -> Vec<ExamRowVm> {
    exams
        .iter()
        .filter(|exam| exam.is_active() && exam.matches_query(query))
        .map(ExamRowVm::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use exam_core::model::{ExamId, SubjectId};

    use super::*;

    #[test]
    fn exam_rows_skip_inactive_and_label_counts() {
        let exams = vec![
            Exam::new(ExamId::new("e1"), "HTML Quiz", 20, None, 25, true),
            Exam::new(ExamId::new("e2"), "Old Quiz", 10, None, 5, false),
        ];
        let rows = map_exam_rows(&exams, "");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].duration_label, "20 Minutes");
        assert_eq!(rows[0].questions_label, "25 Questions");
        assert_eq!(rows[0].minutes, 20);
    }

    #[test]
    fn exam_rows_filter_by_title() {
        let exams = vec![
            Exam::new(ExamId::new("e1"), "HTML Quiz", 20, None, 25, true),
            Exam::new(ExamId::new("e2"), "CSS Quiz", 15, None, 20, true),
        ];
        let rows = map_exam_rows(&exams, "css");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "CSS Quiz");
        assert!(map_exam_rows(&exams, "rust").is_empty());
    }

    #[test]
    fn subject_card_uses_display_name() {
        let subject = Subject::new(SubjectId::new("s1"), " ", Some("not a url"));
        let card = SubjectCardVm::from(&subject);
        assert_eq!(card.name, "Untitled");
        assert!(card.icon.is_none());
    }
}
