use url::Url;

use crate::model::ids::{ExamId, SubjectId};

/// A quiz subject shown on the dashboard (e.g. "HTML", "CSS").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    id: SubjectId,
    name: String,
    icon: Option<Url>,
}

impl Subject {
    /// Build a subject. An icon that is not an absolute URL is dropped so the
    /// view falls back to its placeholder.
    #[must_use]
    pub fn new(id: SubjectId, name: impl Into<String>, icon: Option<&str>) -> Self {
        let icon = icon
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| Url::parse(raw).ok());
        Self {
            id,
            name: name.into().trim().to_string(),
            icon,
        }
    }

    #[must_use]
    pub fn id(&self) -> &SubjectId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name for display; blank names read as "Untitled".
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Untitled"
        } else {
            &self.name
        }
    }

    #[must_use]
    pub fn icon(&self) -> Option<&Url> {
        self.icon.as_ref()
    }
}

/// An exam listed under a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
    id: ExamId,
    title: String,
    duration_minutes: u32,
    subject: Option<SubjectId>,
    question_count: u32,
    active: bool,
}

impl Exam {
    #[must_use]
    pub fn new(
        id: ExamId,
        title: impl Into<String>,
        duration_minutes: u32,
        subject: Option<SubjectId>,
        question_count: u32,
        active: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            duration_minutes,
            subject,
            question_count,
            active,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ExamId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_minutes.saturating_mul(60)
    }

    #[must_use]
    pub fn subject(&self) -> Option<&SubjectId> {
        self.subject.as_ref()
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Case-insensitive title search. An empty query matches everything.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_drops_relative_icon() {
        let subject = Subject::new(SubjectId::new("s1"), "HTML", Some("/placeholder.jpg"));
        assert!(subject.icon().is_none());
    }

    #[test]
    fn subject_keeps_absolute_icon() {
        let subject = Subject::new(
            SubjectId::new("s1"),
            "HTML",
            Some("https://exam.elevateegy.com/uploads/html.png"),
        );
        assert_eq!(
            subject.icon().map(Url::as_str),
            Some("https://exam.elevateegy.com/uploads/html.png")
        );
    }

    #[test]
    fn blank_subject_name_displays_untitled() {
        let subject = Subject::new(SubjectId::new("s1"), "  ", None);
        assert_eq!(subject.display_name(), "Untitled");
    }

    #[test]
    fn exam_query_is_case_insensitive() {
        let exam = Exam::new(ExamId::new("e1"), "JavaScript Quiz", 10, None, 10, true);
        assert!(exam.matches_query("script"));
        assert!(exam.matches_query("  "));
        assert!(!exam.matches_query("css"));
        assert_eq!(exam.duration_secs(), 600);
    }
}
