use shared::api::{field_message, SignInRequest};
use shared::models::SessionStatus;
use validator::{Validate, ValidationErrors};
use wasm_bindgen_futures::spawn_local;
use web_sys::SubmitEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::text_input::TextInput;
use crate::router::Route;
use crate::services::identity::IdentityService;

#[function_component(Login)]
pub fn login() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let field_errors = use_state(|| None::<ValidationErrors>);
    let error = use_state(|| None::<String>);
    let is_pending = use_state(|| false);
    let navigator = use_navigator();

    // an already signed-in user goes straight home
    {
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Ok(Some(_)) = IdentityService::current_user().await {
                    if let Some(navigator) = navigator {
                        navigator.replace(&Route::Home);
                    }
                }
            });
            || ()
        });
    }

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let field_errors = field_errors.clone();
        let error = error.clone();
        let is_pending = is_pending.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_pending {
                return;
            }

            let request = SignInRequest {
                identifier: (*email).clone(),
                password: (*password).clone(),
            };
            match request.validate() {
                Err(errors) => {
                    field_errors.set(Some(errors));
                    return;
                }
                Ok(()) => field_errors.set(None),
            }

            error.set(None);
            is_pending.set(true);

            let error = error.clone();
            let is_pending = is_pending.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match IdentityService::sign_in(request).await {
                    Ok(session) if session.status == SessionStatus::Complete => {
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::Home);
                        }
                    }
                    Ok(session) => {
                        tracing::error!("Unexpected sign-in status: {:?}", session.status);
                        error.set(Some("Failed to sign in. Please try again.".to_string()));
                    }
                    Err(e) => {
                        tracing::error!("Failed to sign in: {:?}", e);
                        error.set(Some(e));
                    }
                }
                is_pending.set(false);
            });
        })
    };

    let email_error = field_errors
        .as_ref()
        .and_then(|errors| field_message(errors, "identifier"));
    let password_error = field_errors
        .as_ref()
        .and_then(|errors| field_message(errors, "password"));

    html! {
        <div class="container auth-page">
            <div class="card auth-card">
                <h2>{ "Welcome Back" }</h2>
                <p class="card-subtitle">{ "Sign in to your account to continue" }</p>

                if let Some(message) = &*error {
                    <div class="alert alert-error">{ message }</div>
                }

                <form onsubmit={on_submit}>
                    <TextInput
                        label="Email"
                        input_type="email"
                        placeholder="Enter your email"
                        value={(*email).clone()}
                        error={email_error}
                        on_input={Callback::from({
                            let email = email.clone();
                            move |value| email.set(value)
                        })}
                    />

                    <TextInput
                        label="Password"
                        input_type="password"
                        placeholder="Enter your password"
                        value={(*password).clone()}
                        error={password_error}
                        on_input={Callback::from({
                            let password = password.clone();
                            move |value| password.set(value)
                        })}
                    />

                    <button type="submit" class="btn btn-primary btn-full" disabled={*is_pending}>
                        { if *is_pending { "Signing in..." } else { "Sign In" } }
                    </button>
                </form>

                <p class="auth-footer">
                    { "Don't have an account? " }
                    <Link<Route> to={Route::Register}>{ "Sign up" }</Link<Route>>
                </p>
            </div>
        </div>
    }
}
