use shared::api::{field_message, SignUpRequest};
use validator::{Validate, ValidationErrors};
use wasm_bindgen_futures::spawn_local;
use web_sys::SubmitEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::otp_verification::OtpVerification;
use crate::components::resend_otp::RESEND_COOLDOWN_SECS;
use crate::components::text_input::TextInput;
use crate::hooks::use_otp_timer;
use crate::router::Route;
use crate::services::identity::IdentityService;

#[function_component(Register)]
pub fn register() -> Html {
    let first_name = use_state(String::new);
    let last_name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);

    let field_errors = use_state(|| None::<ValidationErrors>);
    let confirm_error = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let is_loading = use_state(|| false);
    let pending_verification = use_state(|| false);

    let timer = use_otp_timer();
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
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let field_errors = field_errors.clone();
        let confirm_error = confirm_error.clone();
        let error = error.clone();
        let notice = notice.clone();
        let is_loading = is_loading.clone();
        let pending_verification = pending_verification.clone();
        let start_timer = timer.start.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_loading {
                return;
            }

            let request = SignUpRequest {
                first_name: (*first_name).clone(),
                last_name: (*last_name).clone(),
                email: (*email).clone(),
                password: (*password).clone(),
            };

            let passwords_match = *confirm_password == request.password;
            confirm_error.set((!passwords_match).then(|| "Passwords don't match".to_string()));

            match request.validate() {
                Err(errors) => {
                    field_errors.set(Some(errors));
                    return;
                }
                Ok(()) => field_errors.set(None),
            }
            if !passwords_match {
                return;
            }

            error.set(None);
            is_loading.set(true);

            let error = error.clone();
            let notice = notice.clone();
            let is_loading = is_loading.clone();
            let pending_verification = pending_verification.clone();
            let start_timer = start_timer.clone();
            spawn_local(async move {
                let sent = match IdentityService::sign_up(request).await {
                    Ok(_) => IdentityService::send_email_code().await,
                    Err(e) => Err(e),
                };

                match sent {
                    Ok(()) => {
                        notice.set(Some(
                            "We have sent a verification code to your email. \
                             Please verify to create your account."
                                .to_string(),
                        ));
                        start_timer.emit(RESEND_COOLDOWN_SECS);
                        pending_verification.set(true);
                    }
                    Err(e) => {
                        tracing::error!("Failed to sign up: {:?}", e);
                        error.set(Some(e));
                    }
                }
                is_loading.set(false);
            });
        })
    };

    if *pending_verification {
        return html! {
            <div class="container auth-page">
                if let Some(message) = &*notice {
                    <div class="alert alert-success">{ message }</div>
                }
                <OtpVerification time_left={timer.time_left} on_start={timer.start.clone()} />
            </div>
        };
    }

    let field = |name: &str| {
        field_errors
            .as_ref()
            .and_then(|errors| field_message(errors, name))
    };

    html! {
        <div class="container auth-page">
            <div class="card auth-card">
                <h2>{ "Create Account" }</h2>
                <p class="card-subtitle">{ "Sign up to get started" }</p>

                if let Some(message) = &*error {
                    <div class="alert alert-error">{ message }</div>
                }

                <form onsubmit={on_submit}>
                    <div class="form-row">
                        <TextInput
                            label="First Name"
                            placeholder="Enter your first name"
                            value={(*first_name).clone()}
                            error={field("first_name")}
                            on_input={Callback::from({
                                let first_name = first_name.clone();
                                move |value| first_name.set(value)
                            })}
                        />
                        <TextInput
                            label="Last Name"
                            placeholder="Enter your last name"
                            value={(*last_name).clone()}
                            error={field("last_name")}
                            on_input={Callback::from({
                                let last_name = last_name.clone();
                                move |value| last_name.set(value)
                            })}
                        />
                    </div>

                    <TextInput
                        label="Email"
                        input_type="email"
                        placeholder="Enter your email"
                        value={(*email).clone()}
                        error={field("email")}
                        on_input={Callback::from({
                            let email = email.clone();
                            move |value| email.set(value)
                        })}
                    />

                    <TextInput
                        label="Password"
                        input_type="password"
                        placeholder="Create a password"
                        value={(*password).clone()}
                        error={field("password")}
                        on_input={Callback::from({
                            let password = password.clone();
                            move |value| password.set(value)
                        })}
                    />

                    <TextInput
                        label="Confirm Password"
                        input_type="password"
                        placeholder="Confirm your password"
                        value={(*confirm_password).clone()}
                        error={(*confirm_error).clone()}
                        on_input={Callback::from({
                            let confirm_password = confirm_password.clone();
                            move |value| confirm_password.set(value)
                        })}
                    />

                    <button type="submit" class="btn btn-primary btn-full" disabled={*is_loading}>
                        { if *is_loading { "Creating account..." } else { "Create Account" } }
                    </button>
                </form>

                <p class="auth-footer">
                    { "Already have an account? " }
                    <Link<Route> to={Route::Login}>{ "Sign in" }</Link<Route>>
                </p>
            </div>
        </div>
    }
}
