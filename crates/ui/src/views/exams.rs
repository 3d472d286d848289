use dioxus::prelude::*;
use dioxus_router::use_navigator;

use exam_core::model::Exam;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ExamRowVm, map_exam_rows};

/// The exam list, fetched once per mount, and the search text that filters it.
#[derive(Clone, Copy)]
pub(crate) struct ExamSearch {
    pub(crate) query: Signal<String>,
    selected: Signal<Option<ExamRowVm>>,
    resource: Resource<Result<Vec<Exam>, ViewError>>,
}

pub(crate) fn use_exam_search() -> ExamSearch {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let query = use_signal(String::new);
    let selected = use_signal(|| None::<ExamRowVm>);

    let resource = use_resource(move || {
        let quiz = quiz.clone();
        async move { quiz.list_exams("").await.map_err(ViewError::from) }
    });

    ExamSearch {
        query,
        selected,
        resource,
    }
}

#[component]
pub fn ExamsView() -> Element {
    exams_page(use_exam_search())
}

pub(crate) fn exams_page(search: ExamSearch) -> Element {
    let ExamSearch {
        mut query,
        mut selected,
        resource,
    } = search;
    let state = match view_state_from_resource(resource) {
        ViewState::Ready(exams) => ViewState::Ready(map_exam_rows(&exams, &query.read())),
        ViewState::Idle => ViewState::Idle,
        ViewState::Loading => ViewState::Loading,
        ViewState::Error(err) => ViewState::Error(err),
    };

    rsx! {
        div { class: "page",
            h2 { "Quiz History" }
            input {
                class: "search",
                r#type: "search",
                placeholder: "Search Quiz",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
            }

            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "muted", "No exams match your search." }
                    }
                    ul { class: "exam-list",
                        for row in rows {
                            ExamRow {
                                key: "{row.id}",
                                row: row.clone(),
                                on_start: move |row| selected.set(Some(row)),
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }

            if let Some(exam) = selected() {
                InstructionsDialog {
                    exam,
                    on_close: move |()| selected.set(None),
                }
            }
        }
    }
}

#[component]
fn ExamRow(row: ExamRowVm, on_start: EventHandler<ExamRowVm>) -> Element {
    let for_click = row.clone();
    rsx! {
        li { class: "exam-row",
            div {
                h3 { "{row.title}" }
                p { class: "muted", "{row.questions_label}" }
            }
            span { class: "exam-duration", "{row.duration_label}" }
            button {
                class: "btn btn-primary",
                onclick: move |_| on_start.call(for_click.clone()),
                "Start"
            }
        }
    }
}

#[component]
fn InstructionsDialog(exam: ExamRowVm, on_close: EventHandler<()>) -> Element {
    let navigator = use_navigator();
    let minutes = exam.minutes;

    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", role: "dialog",
                h3 { "Instructions" }
                ul {
                    li { "{exam.title}" }
                    li { "{exam.questions_label}" }
                    li { "Time limit: {exam.duration_label}" }
                    li { "Pick one answer per question. The quiz ends when you finish or time runs out." }
                }
                div { class: "dialog-actions",
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| {
                            let _ = navigator.push(Route::Quiz { minutes });
                        },
                        "Start"
                    }
                }
            }
        }
    }
}
