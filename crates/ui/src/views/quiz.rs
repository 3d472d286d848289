//! The attempt screen: answering, score summary and incorrect-answer review.
//!
//! The attempt lives in one signal. Clicks and the timer task are its only
//! writers; both go through `QuizAttempt`, which ignores input that does not
//! fit the current phase.

use dioxus::prelude::*;
use dioxus_router::Link;
use tracing::{debug, info, warn};

use exam_core::model::OptionKey;
use exam_core::quiz::{FinishOutcome, Phase, QuizAttempt};
use services::{AttemptTimer, Clock, TimerControl, tick_attempt};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    DotState, QuestionVm, ReviewItemVm, ScoreVm, map_question, map_review, map_score,
};

/// The fetched attempt and the signal the view and its countdown share.
#[derive(Clone, Copy)]
pub(crate) struct QuizSession {
    pub(crate) attempt: Signal<Option<QuizAttempt>>,
    resource: Resource<Result<QuizAttempt, ViewError>>,
}

/// Fetch a question set for `minutes`, adopt it once and start its countdown.
///
/// The countdown task belongs to the calling scope, so unmounting cancels it;
/// the attempt is abandoned on the way out.
pub(crate) fn use_quiz_session(minutes: u32) -> QuizSession {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let clock = ctx.clock();
    let mut attempt = use_signal(|| None::<QuizAttempt>);

    let resource = use_resource(move || {
        let quiz = quiz.clone();
        async move {
            let started = quiz
                .start_attempt(Some(minutes.saturating_mul(60)))
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(started)
        }
    });

    use_effect(move || {
        let fetched = match resource.value().read().as_ref() {
            Some(Ok(fresh)) => Some(fresh.clone()),
            _ => None,
        };
        if let Some(fresh) = fetched {
            attempt.set(Some(fresh));
            spawn(run_countdown(attempt, clock));
        }
    });

    use_drop(move || {
        if let Ok(mut guard) = attempt.try_write() {
            if let Some(current) = guard.as_mut() {
                current.abandon();
            }
        }
    });

    QuizSession { attempt, resource }
}

#[component]
pub fn QuizView(minutes: u32) -> Element {
    let clock = use_context::<AppContext>().clock();
    let QuizSession { attempt, resource } = use_quiz_session(minutes);
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Loading questions..." }
                },
                ViewState::Ready(_) => rsx! {
                    AttemptScreen { attempt, clock }
                },
                ViewState::Error(error) => rsx! {
                    QuizError { error }
                },
            }
        }
    }
}

async fn run_countdown(mut attempt: Signal<Option<QuizAttempt>>, clock: Clock) {
    let ticks = AttemptTimer::start()
        .run(|| match attempt.write().as_mut() {
            Some(current) => tick_attempt(current, clock.now()),
            None => TimerControl::Stop,
        })
        .await;
    debug!(ticks, "countdown task finished");
}

enum Screen {
    Pending,
    Question(QuestionVm),
    Score(ScoreVm),
    Review(Vec<ReviewItemVm>),
}

#[component]
pub(crate) fn AttemptScreen(attempt: Signal<Option<QuizAttempt>>, clock: Clock) -> Element {
    let screen = match attempt.read().as_ref() {
        None => Screen::Pending,
        Some(current) => match current.phase() {
            Phase::Answering => Screen::Question(map_question(current)),
            Phase::ScoreSummary => map_score(current).map_or(Screen::Pending, Screen::Score),
            Phase::Review => Screen::Review(map_review(current)),
        },
    };

    match screen {
        Screen::Pending => rsx! {
            p { "Loading questions..." }
        },
        Screen::Question(vm) => rsx! {
            QuestionPanel { vm, attempt, clock }
        },
        Screen::Score(score) => rsx! {
            ScorePanel { score, attempt }
        },
        Screen::Review(items) => rsx! {
            ReviewPanel { items }
        },
    }
}

#[component]
fn QuestionPanel(vm: QuestionVm, attempt: Signal<Option<QuizAttempt>>, clock: Clock) -> Element {
    let mut attempt = attempt;

    let mut choose = move |key: OptionKey| {
        if let Some(current) = attempt.write().as_mut() {
            if let Err(err) = current.select_current(key) {
                warn!(error = %err, "selection ignored");
            }
        }
    };

    let on_back = move |_| {
        if let Some(current) = attempt.write().as_mut() {
            current.back();
        }
    };

    let on_next = move |_| {
        if let Some(current) = attempt.write().as_mut() {
            current.next();
        }
    };

    let on_finish = move |_| {
        if let Some(current) = attempt.write().as_mut() {
            match current.finish(clock.now()) {
                FinishOutcome::Finished => info!(
                    answered = current.progress().answered,
                    total = current.total_questions(),
                    "quiz attempt submitted"
                ),
                outcome => debug!(?outcome, "finish ignored"),
            }
        }
    };

    let options = vm.options.iter().map(|option| {
        let key = option.key.clone();
        let class = if option.selected { "option selected" } else { "option" };
        rsx! {
            li {
                key: "{option.key}",
                class,
                onclick: move |_| choose(key.clone()),
                "{option.label}"
            }
        }
    });

    rsx! {
        div { class: "attempt",
            header { class: "attempt-header",
                span { class: "attempt-position", "{vm.header}" }
                span { class: "attempt-timer", "{vm.timer}" }
            }
            div { class: "progress-dots",
                for (index, dot) in vm.dots.iter().enumerate() {
                    span {
                        key: "{index}",
                        class: match dot {
                            DotState::Done => "dot done",
                            DotState::Current => "dot current",
                            DotState::Pending => "dot",
                        },
                    }
                }
            }
            h3 { class: "prompt", "{vm.prompt}" }
            ul { class: "options", {options} }
            div { class: "attempt-nav",
                button {
                    class: "btn btn-secondary",
                    disabled: !vm.can_back,
                    onclick: on_back,
                    "Back"
                }
                if vm.is_last {
                    button {
                        class: "btn btn-primary",
                        disabled: !vm.can_finish,
                        onclick: on_finish,
                        "Finish"
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        disabled: !vm.can_next,
                        onclick: on_next,
                        "Next"
                    }
                }
            }
        }
    }
}

#[component]
fn ScorePanel(score: ScoreVm, attempt: Signal<Option<QuizAttempt>>) -> Element {
    let mut attempt = attempt;

    let on_review = move |_| {
        if let Some(current) = attempt.write().as_mut() {
            current.show_review();
        }
    };

    rsx! {
        section { class: "score",
            h3 { "Your Score" }
            if score.timed_out {
                p { class: "time-up", "Time is up" }
            }
            div { class: "score-ring", "{score.percentage_label}" }
            dl { class: "score-counts",
                dt { "Correct" }
                dd { class: "correct", "{score.correct}" }
                dt { "Incorrect" }
                dd { class: "incorrect", "{score.incorrect}" }
                if let Some(elapsed) = score.elapsed.as_ref() {
                    dt { "Time taken" }
                    dd { "{elapsed}" }
                }
            }
            div { class: "attempt-nav",
                Link { class: "btn btn-secondary", to: Route::Dashboard {}, "Back" }
                button {
                    class: "btn btn-primary",
                    disabled: !score.can_show_review,
                    onclick: on_review,
                    "Show Results"
                }
            }
        }
    }
}

#[component]
fn ReviewPanel(items: Vec<ReviewItemVm>) -> Element {
    rsx! {
        section { class: "review",
            h3 { "Incorrect answers" }
            for item in items {
                article { key: "{item.number}", class: "review-item",
                    h4 { "{item.number}. {item.prompt}" }
                    if item.unanswered {
                        p { class: "muted", "Not answered" }
                    }
                    ul {
                        for option in item.options.iter() {
                            li { class: option.mark.class(),
                                span { class: "mark", "{option.mark.glyph()}" }
                                "{option.label}"
                            }
                        }
                    }
                }
            }
            Link { class: "btn btn-secondary", to: Route::Exams {}, "Close" }
        }
    }
}

#[component]
fn QuizError(error: ViewError) -> Element {
    rsx! {
        div { class: "quiz-error",
            p { class: "error", "{error.message()}" }
            if error == ViewError::SignInRequired {
                Link { to: Route::Login {}, "Sign in" }
            } else {
                Link { to: Route::Exams {}, "Back to exams" }
            }
        }
    }
}
