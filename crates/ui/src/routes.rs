use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::AppContext;
use crate::views::{
    DashboardView, ExamsView, ForgotPasswordView, LoginView, QuizView, RegisterView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login", LoginView)] Login {},
    #[route("/register", RegisterView)] Register {},
    #[route("/forgot-password", ForgotPasswordView)] ForgotPassword {},
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/exams", ExamsView)] Exams {},
        #[route("/quiz/:minutes", QuizView)] Quiz { minutes: u32 },
}

/// Signed-in shell. Without a session it sends the user to the sign-in page.
#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let signed_in = ctx.auth().is_signed_in();

    use_effect(move || {
        if !signed_in {
            let _ = navigator.replace(Route::Login {});
        }
    });

    if !signed_in {
        return rsx! {
            p { class: "muted", "Redirecting to sign in..." }
        };
    }

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let sign_out = move |_| {
        ctx.auth().sign_out();
        let _ = navigator.replace(Route::Login {});
    };

    rsx! {
        nav { class: "sidebar",
            h1 { "Online Exams" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Exams {}, "Quiz History" } }
            }
            button { class: "btn btn-secondary", onclick: sign_out, "Log Out" }
        }
    }
}
