mod catalog;
mod ids;
mod profile;
mod question;

pub use catalog::{Exam, Subject};
pub use ids::{ExamId, QuestionId, SubjectId, UserId};
pub use profile::UserProfile;
pub use question::{AnswerOption, OptionKey, Question, QuestionError};
