mod dashboard;
mod exams;
mod forgot_password;
mod login;
mod quiz;
mod register;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use exams::ExamsView;
pub use forgot_password::ForgotPasswordView;
pub use login::LoginView;
pub use quiz::QuizView;
pub use register::RegisterView;
pub use state::{ViewError, ViewState, view_state_from_resource};
