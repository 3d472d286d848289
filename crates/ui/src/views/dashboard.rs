use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProfileVm, SubjectCardVm, map_subject_cards};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let profile = ctx.auth().profile().as_ref().map(ProfileVm::from);

    let resource = use_resource(move || {
        let quiz = quiz.clone();
        async move {
            let subjects = quiz.list_subjects().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_subject_cards(&subjects))
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            if let Some(profile) = profile {
                ProfileCard { profile }
            }

            h2 { "Quizzes" }
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(subjects) => rsx! {
                    if subjects.is_empty() {
                        p { class: "muted", "No subjects yet." }
                    }
                    div { class: "subject-grid",
                        for subject in subjects {
                            SubjectCard { subject }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ProfileCard(profile: ProfileVm) -> Element {
    rsx! {
        section { class: "profile-card",
            h3 { "{profile.display_name}" }
            p { class: "muted", "{profile.username}" }
            p { "{profile.email}" }
        }
    }
}

#[component]
fn SubjectCard(subject: SubjectCardVm) -> Element {
    rsx! {
        Link { class: "subject-card", to: Route::Exams {},
            if let Some(icon) = subject.icon.as_ref() {
                img { src: "{icon}", alt: "{subject.name}" }
            }
            span { "{subject.name}" }
        }
    }
}
