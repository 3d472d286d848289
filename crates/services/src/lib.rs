#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod config;
pub mod error;
pub mod quiz_service;
pub mod session_gate;
pub mod timer;

pub use exam_core::Clock;
pub use reqwest::StatusCode;

pub use api::{ExamApi, ExamApiClient, InMemoryExamApi};
pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use config::{ApiConfig, DEFAULT_API_BASE_URL};
pub use error::{AuthError, ConfigError, FetchError};
pub use quiz_service::QuizService;
pub use session_gate::{AuthSession, SessionGate, SessionToken};
pub use timer::{AttemptTimer, TICK_PERIOD, TimerControl, tick_attempt};
