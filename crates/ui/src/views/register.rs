use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use exam_core::forms::{FormErrors, RegisterForm};
use services::AuthError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::login::field_error;

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let already_signed_in = ctx.auth().is_signed_in();

    let mut form = use_signal(RegisterForm::default);
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
        let snapshot = form.read().clone();
        spawn(async move {
            pending.set(true);
            banner.set(None);
            match auth.sign_up(&snapshot).await {
                Ok(()) => {
                    field_errors.set(FormErrors::default());
                    let _ = navigator.replace(Route::Login {});
                }
                Err(AuthError::Invalid(errors)) => field_errors.set(errors),
                Err(err) => banner.set(Some(err.to_string())),
            }
            pending.set(false);
        });
    };

    let errors = field_errors.read().clone();
    let current = form.read().clone();

    rsx! {
        div { class: "auth-page",
            h2 { "Sign up" }
            if let Some(message) = banner() {
                p { class: "form-banner", role: "alert", "{message}" }
            }

            input {
                placeholder: "First Name",
                value: "{current.first_name}",
                oninput: move |evt| form.write().first_name = evt.value(),
            }
            {field_error(errors.get("first_name"))}

            input {
                placeholder: "Last Name",
                value: "{current.last_name}",
                oninput: move |evt| form.write().last_name = evt.value(),
            }
            {field_error(errors.get("last_name"))}

            input {
                placeholder: "Username",
                value: "{current.username}",
                oninput: move |evt| form.write().username = evt.value(),
            }
            {field_error(errors.get("username"))}

            input {
                r#type: "email",
                placeholder: "Email",
                value: "{current.email}",
                oninput: move |evt| form.write().email = evt.value(),
            }
            {field_error(errors.get("email"))}

            input {
                r#type: "password",
                placeholder: "Password",
                value: "{current.password}",
                oninput: move |evt| form.write().password = evt.value(),
            }
            {field_error(errors.get("password"))}

            input {
                r#type: "password",
                placeholder: "Confirm Password",
                value: "{current.re_password}",
                oninput: move |evt| form.write().re_password = evt.value(),
            }
            {field_error(errors.get("re_password"))}

            input {
                r#type: "tel",
                placeholder: "Phone Number",
                value: "{current.phone}",
                oninput: move |evt| form.write().phone = evt.value(),
            }
            {field_error(errors.get("phone"))}

            button {
                class: "btn btn-primary",
                disabled: pending(),
                onclick: submit,
                if pending() { "Creating account..." } else { "Create Account" }
            }
            p { class: "muted",
                "Already have an account? "
                Link { to: Route::Login {}, "Login" }
            }
        }
    }
}
