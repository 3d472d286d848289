use dioxus::prelude::*;
use dioxus_router::Link;

use exam_core::forms::{FormErrors, ForgotPasswordForm};
use services::AuthError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::login::field_error;

const RECOVERY_SENT: &str = "A recovery email has been sent. Please check your inbox.";

#[component]
pub fn ForgotPasswordView() -> Element {
    let ctx = use_context::<AppContext>();

    let mut email = use_signal(String::new);
    let mut field_errors = use_signal(FormErrors::default);
    let mut banner = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<&'static str>);
    let mut pending = use_signal(|| false);

    let submit = move |_| {
        if pending() {
            return;
        }
        let auth = ctx.auth();
        let form = ForgotPasswordForm::new(email());
        spawn(async move {
            pending.set(true);
            banner.set(None);
            notice.set(None);
            match auth.request_password_reset(&form).await {
                Ok(()) => {
                    field_errors.set(FormErrors::default());
                    email.set(String::new());
                    notice.set(Some(RECOVERY_SENT));
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
            h2 { "Forgot your password?" }
            input {
                r#type: "email",
                placeholder: "Enter your email",
                value: "{email}",
                disabled: pending(),
                oninput: move |evt| email.set(evt.value()),
            }
            {field_error(errors.get("email"))}
            if let Some(message) = banner() {
                p { class: "form-banner", role: "alert", "{message}" }
            }
            if let Some(message) = notice() {
                p { class: "form-notice", "{message}" }
            }

            button {
                class: "btn btn-primary",
                disabled: pending(),
                onclick: submit,
                if pending() { "Sending..." } else { "Send Recovery Email" }
            }
            p { class: "muted",
                Link { to: Route::Login {}, "Sign in" }
                " · "
                Link { to: Route::Register {}, "Sign up" }
            }
        }
    }
}
