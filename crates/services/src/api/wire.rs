//! JSON shapes of the exam API and their conversion into domain types.
//!
//! Everything untyped stops here: a payload either becomes validated domain
//! values or a decode error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use exam_core::forms::{ForgotPasswordForm, RegisterForm, SignInForm};
use exam_core::model::{
    AnswerOption, Exam, ExamId, OptionKey, Question, QuestionId, Subject, SubjectId, UserId,
    UserProfile,
};

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsEnvelope {
    #[serde(default)]
    questions: Vec<QuestionDto>,
}

#[derive(Debug, Deserialize)]
struct QuestionDto {
    #[serde(rename = "_id")]
    id: Option<String>,
    question: String,
    answers: Vec<AnswerDto>,
    correct: String,
}

#[derive(Debug, Deserialize)]
struct AnswerDto {
    key: String,
    answer: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubjectsEnvelope {
    #[serde(default)]
    subjects: Vec<SubjectDto>,
}

#[derive(Debug, Deserialize)]
struct SubjectDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExamsEnvelope {
    #[serde(default)]
    exams: Vec<ExamDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExamDto {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    duration: u32,
    subject: Option<String>,
    number_of_questions: u32,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub(crate) struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a SignInForm> for SignInRequest<'a> {
    fn from(form: &'a SignInForm) -> Self {
        Self {
            email: form.email.trim(),
            password: &form.password,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

impl<'a> From<&'a ForgotPasswordForm> for ForgotPasswordRequest<'a> {
    fn from(form: &'a ForgotPasswordForm) -> Self {
        Self {
            email: form.email.trim(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignUpRequest<'a> {
    username: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    password: &'a str,
    re_password: &'a str,
    phone: &'a str,
}

impl<'a> From<&'a RegisterForm> for SignUpRequest<'a> {
    fn from(form: &'a RegisterForm) -> Self {
        Self {
            username: form.username.trim(),
            first_name: form.first_name.trim(),
            last_name: form.last_name.trim(),
            email: form.email.trim(),
            password: &form.password,
            re_password: &form.re_password,
            phone: form.phone.trim(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignInResponse {
    pub(crate) token: String,
    pub(crate) user: UserDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    is_verified: Value,
}

/// Error payloads carry a human-readable `message`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiMessage {
    pub(crate) message: Option<String>,
}

impl QuestionsEnvelope {
    pub(crate) fn into_questions(self) -> Result<Vec<Question>, exam_core::Error> {
        self.questions
            .into_iter()
            .enumerate()
            .map(|(index, dto)| dto.into_question(index))
            .collect()
    }
}

impl QuestionDto {
    fn into_question(self, index: usize) -> Result<Question, exam_core::Error> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .map_or_else(|| QuestionId::new(format!("q{index}")), QuestionId::new);
        let options = self
            .answers
            .into_iter()
            .map(|answer| Ok(AnswerOption::new(OptionKey::new(answer.key)?, answer.answer)))
            .collect::<Result<Vec<_>, exam_core::model::QuestionError>>()?;
        let correct = OptionKey::new(self.correct)?;
        Ok(Question::new(id, self.question, options, correct)?)
    }
}

impl SubjectsEnvelope {
    pub(crate) fn into_subjects(self) -> Vec<Subject> {
        self.subjects
            .into_iter()
            .map(|dto| Subject::new(SubjectId::new(dto.id), dto.name, dto.icon.as_deref()))
            .collect()
    }
}

impl ExamsEnvelope {
    pub(crate) fn into_exams(self) -> Vec<Exam> {
        self.exams
            .into_iter()
            .map(|dto| {
                Exam::new(
                    ExamId::new(dto.id),
                    dto.title,
                    dto.duration,
                    dto.subject.map(SubjectId::new),
                    dto.number_of_questions,
                    dto.active,
                )
            })
            .collect()
    }
}

impl UserDto {
    pub(crate) fn into_profile(self) -> UserProfile {
        let verified = match &self.is_verified {
            Value::Bool(flag) => *flag,
            Value::String(raw) => raw.eq_ignore_ascii_case("true"),
            _ => false,
        };
        UserProfile {
            id: UserId::new(self.id),
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            verified,
        }
    }
}
