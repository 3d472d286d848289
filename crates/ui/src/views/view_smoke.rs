use dioxus::prelude::{ReadableExt, WritableExt};
use exam_core::quiz::{FinishOutcome, QuizAttempt};
use exam_core::time::fixed_now;
use services::StatusCode;

use super::test_harness::{
    ViewKind, key, sample_api, sample_attempt, sample_questions, setup_view_harness,
    setup_view_harness_with_api,
};

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Login, false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sign in"), "missing heading in {html}");
    assert!(html.contains("Enter your email"), "missing email field in {html}");
    assert!(html.contains("Create yours"), "missing register link in {html}");
    assert!(html.contains("Forgot password?"), "missing recovery link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn forgot_password_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::ForgotPassword, false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Forgot your password?"), "missing heading in {html}");
    assert!(html.contains("Enter your email"), "missing email field in {html}");
    assert!(html.contains("Send Recovery Email"), "missing submit button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn register_view_smoke_renders_all_fields() {
    let mut harness = setup_view_harness(ViewKind::Register, false);
    harness.rebuild();
    let html = harness.render();
    for placeholder in ["First Name", "Last Name", "Username", "Confirm Password", "Phone Number"] {
        assert!(html.contains(placeholder), "missing {placeholder} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_profile_and_subjects() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, true);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Mona Adel"), "missing profile name in {html}");
    assert!(html.contains("HTML"), "missing subject in {html}");
    assert!(html.contains("CSS"), "missing subject in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exams_view_smoke_renders_rows() {
    let mut harness = setup_view_harness(ViewKind::Exams, true);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("HTML Quiz"), "missing exam in {html}");
    assert!(html.contains("20 Minutes"), "missing duration in {html}");
    assert!(html.contains("25 Questions"), "missing count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exams_search_filters_loaded_list_without_refetching() {
    let mut harness = setup_view_harness(ViewKind::SearchableExams, true);
    harness.settle().await;
    assert_eq!(harness.api.exam_fetches(), 1);

    let mut query = harness.handles.query();
    for typed in ["c", "cs", "css"] {
        query.set(typed.to_string());
        harness.drive_async().await;
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("CSS Quiz"), "matching exam missing in {html}");
    assert!(!html.contains("HTML Quiz"), "filtered exam still shown in {html}");
    assert!(!html.contains("Loading..."), "list reloaded while typing: {html}");
    assert_eq!(harness.api.exam_fetches(), 1);

    query.set("rust".to_string());
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No exams match your search."), "missing empty note in {html}");
    assert_eq!(harness.api.exam_fetches(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz(10), true);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing header in {html}");
    assert!(html.contains("10:00"), "missing timer in {html}");
    assert!(html.contains("Sample question 1"), "missing prompt in {html}");
    assert!(html.contains("First choice"), "missing option in {html}");
    assert_eq!(harness.api.question_fetches(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_session_asks_to_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Quiz(10), false);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Please sign in again."), "missing auth error in {html}");
    assert_eq!(harness.api.question_fetches(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_empty_question_set() {
    let api = sample_api().with_questions(Vec::new());
    let mut harness = setup_view_harness_with_api(ViewKind::Quiz(10), true, api);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No questions available."), "missing empty state in {html}");
    assert!(!html.contains("Question 1 of"), "attempt rendered anyway: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_fetch_failure() {
    let api = sample_api().failing(StatusCode::INTERNAL_SERVER_ERROR);
    let mut harness = setup_view_harness_with_api(ViewKind::Quiz(10), true, api);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Error in Fetch Data"), "missing fetch error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn score_summary_smoke_renders_percentage() {
    let mut attempt = sample_attempt();
    attempt.select_current(key("A1")).unwrap();
    attempt.next();
    attempt.select_current(key("A2")).unwrap();
    attempt.next();
    attempt.select_current(key("A2")).unwrap();
    assert_eq!(attempt.finish(fixed_now()), FinishOutcome::Finished);

    let mut harness = setup_view_harness(ViewKind::Attempt(attempt), true);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("67%"), "missing percentage in {html}");
    assert!(html.contains("Show Results"), "missing review button in {html}");
    assert!(html.contains(r#"href="/""#), "Back should lead to the dashboard: {html}");
    assert!(!html.contains("Time is up"), "unexpected timeout note in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn score_summary_smoke_notes_timeout() {
    let mut attempt = sample_attempt();
    while attempt.remaining_seconds() > 0 {
        attempt.tick(fixed_now());
    }

    let mut harness = setup_view_harness(ViewKind::Attempt(attempt), true);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Time is up"), "missing timeout note in {html}");
    assert!(html.contains("0%"), "missing percentage in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn review_smoke_marks_correct_and_wrong_options() {
    let mut attempt = sample_attempt();
    attempt.select_current(key("A2")).unwrap();
    attempt.next();
    attempt.select_current(key("A2")).unwrap();
    attempt.next();
    attempt.select_current(key("A1")).unwrap();
    attempt.finish(fixed_now());
    assert!(attempt.show_review());

    let mut harness = setup_view_harness(ViewKind::Attempt(attempt), true);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Incorrect answers"), "missing review title in {html}");
    assert!(html.contains("1. Sample question 1"), "missing review item in {html}");
    assert!(html.contains('✔'), "missing correct mark in {html}");
    assert!(html.contains('✘'), "missing wrong mark in {html}");
    assert!(!html.contains("2. Sample question 2"), "correct answer listed in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_countdown_ticks_once_per_second() {
    let mut harness = setup_view_harness(ViewKind::MountedQuiz(10), true);
    harness.settle().await;
    assert!(harness.render().contains("10:00"));

    harness.advance_seconds(1).await;
    let html = harness.render();
    assert!(html.contains("09:59"), "timer did not tick in {html}");

    harness.advance_seconds(2).await;
    let html = harness.render();
    assert!(html.contains("09:57"), "expected a single countdown in {html}");

    let attempt = harness.handles.attempt();
    let remaining = attempt.read().as_ref().map(QuizAttempt::remaining_seconds);
    assert_eq!(remaining, Some(597));
    assert_eq!(harness.api.question_fetches(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn closing_quiz_cancels_its_countdown() {
    let mut harness = setup_view_harness(ViewKind::MountedQuiz(10), true);
    harness.settle().await;
    harness.advance_seconds(1).await;
    assert!(harness.render().contains("09:59"));

    let mut mounted = harness.handles.mounted();
    mounted.set(false);
    harness.drive_async().await;
    assert!(harness.render().contains("Quiz closed"));

    // A surviving task would write to the dropped attempt signal here.
    harness.advance_seconds(5).await;
    let html = harness.render();
    assert!(html.contains("Quiz closed"), "quiz came back in {html}");
    assert!(!html.contains("Question 1 of"), "attempt still rendered in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn finished_quiz_stops_ticking() {
    let one_question = sample_questions().into_iter().take(1).collect();
    let api = sample_api().with_questions(one_question);
    let mut harness = setup_view_harness_with_api(ViewKind::MountedQuiz(10), true, api);
    harness.settle().await;

    let mut attempt = harness.handles.attempt();
    {
        let mut guard = attempt.write();
        let current = guard.as_mut().expect("attempt adopted");
        current.select_current(key("A1")).unwrap();
        assert_eq!(current.finish(fixed_now()), FinishOutcome::Finished);
    }
    harness.drive_async().await;
    harness.drive_async().await;

    let summary = harness.render();
    assert!(summary.contains("Your Score"), "missing summary in {summary}");
    assert!(summary.contains("100%"), "missing percentage in {summary}");
    let remaining = attempt.read().as_ref().map(QuizAttempt::remaining_seconds);

    harness.advance_seconds(5).await;
    assert_eq!(harness.render(), summary);
    assert_eq!(attempt.read().as_ref().map(QuizAttempt::remaining_seconds), remaining);
}
