use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use exam_core::forms::{FormErrors, SignInForm};
use services::AuthError;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let already_signed_in = ctx.auth().is_signed_in();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut field_errors = use_signal(FormErrors::default);
    let mut banner = use_signal(|| None::<String>);
    let mut pending = use_signal(|| false);

    use_effect(move || {
        if already_signed_in {
            let _ = navigator.replace(Route::Dashboard {});
        }
    });

    let submit = move |_| {
        if pending() {
            return;
        }
        let auth = ctx.auth();
        let form = SignInForm::new(email(), password());
        spawn(async move {
            pending.set(true);
            banner.set(None);
            match auth.sign_in(&form).await {
                Ok(_) => {
                    field_errors.set(FormErrors::default());
                    let _ = navigator.replace(Route::Dashboard {});
                }
                Err(AuthError::Invalid(errors)) => field_errors.set(errors),
                Err(err) => banner.set(Some(err.to_string())),
            }
            pending.set(false);
        });
    };

    let errors = field_errors.read().clone();

    rsx! {
        div { class: "auth-page",
            h2 { "Sign in" }
            if let Some(message) = banner() {
                p { class: "form-banner", role: "alert", "{message}" }
            }
            label { r#for: "email", "Email" }
            input {
                id: "email",
                r#type: "email",
                placeholder: "Enter your email",
                value: "{email}",
                oninput: move |evt| email.set(evt.value()),
            }
            {field_error(errors.get("email"))}

            label { r#for: "password", "Password" }
            input {
                id: "password",
                r#type: "password",
                placeholder: "Enter your password",
                value: "{password}",
                oninput: move |evt| password.set(evt.value()),
            }
            {field_error(errors.get("password"))}
            Link { class: "forgot-link", to: Route::ForgotPassword {}, "Forgot password?" }

            button {
                class: "btn btn-primary",
                disabled: pending(),
                onclick: submit,
                if pending() { "Signing in..." } else { "Sign in" }
            }
            p { class: "muted",
                "Don't have an account? "
                Link { to: Route::Register {}, "Create yours" }
            }
        }
    }
}

/// Inline message under a form input, empty when the field passed.
pub(crate) fn field_error(message: Option<&str>) -> Element {
    match message {
        Some(message) => rsx! { p { class: "field-error", "{message}" } },
        None => rsx! {},
    }
}
