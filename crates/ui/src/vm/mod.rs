mod attempt_vm;
mod catalog_vm;
mod result_vm;
mod time_fmt;

pub use attempt_vm::{DotState, OptionVm, QuestionVm, map_question};
pub use catalog_vm::{ExamRowVm, ProfileVm, SubjectCardVm, map_exam_rows, map_subject_cards};
pub use result_vm::{ReviewItemVm, ReviewMark, ReviewOptionVm, ScoreVm, map_review, map_score};
pub use time_fmt::format_elapsed;
