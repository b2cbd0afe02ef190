use shared::models::SessionStatus;
use wasm_bindgen_futures::spawn_local;
use web_sys::SubmitEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::otp_input::{CellConfig, CellProps, OtpInput};
use crate::components::resend_otp::ResendOtp;
use crate::hooks::use_debounce;
use crate::router::Route;
use crate::services::identity::IdentityService;

const CODE_LENGTH: usize = 6;

#[derive(Properties, PartialEq)]
pub struct OtpVerificationProps {
    pub time_left: u32,
    pub on_start: Callback<u32>,
}

/// Email-code entry card: segmented input with debounced auto-submit on
/// completion, a manual verify button and the resend cooldown.
#[function_component(OtpVerification)]
pub fn otp_verification(props: &OtpVerificationProps) -> Html {
    let otp = use_state(String::new);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let verifying = use_state(|| false);
    let navigator = use_navigator();

    let verify = {
        let error = error.clone();
        let verifying = verifying.clone();
        let navigator = navigator.clone();
        Callback::from(move |code: String| {
            if *verifying {
                return;
            }
            verifying.set(true);

            let error = error.clone();
            let verifying = verifying.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match IdentityService::verify_email_code(code).await {
                    Ok(session) if session.status == SessionStatus::Complete => {
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::Home);
                        }
                    }
                    Ok(_) => {
                        error.set(Some(
                            "Verification is still incomplete. Request a new code and try again."
                                .to_string(),
                        ));
                    }
                    Err(e) => {
                        tracing::error!("Failed to verify email code: {:?}", e);
                        error.set(Some(e));
                    }
                }
                verifying.set(false);
            });
        })
    };

    let debounced_verify = use_debounce(verify.clone(), 500);

    let on_change = {
        let otp = otp.clone();
        Callback::from(move |value: String| {
            otp.set(value);
        })
    };

    let on_complete = {
        let error = error.clone();
        Callback::from(move |final_value: String| {
            error.set(None);
            debounced_verify.emit(final_value);
        })
    };

    let on_submit = {
        let otp = otp.clone();
        let error = error.clone();
        let verify = verify.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if otp.chars().count() < CODE_LENGTH {
                error.set(Some("Please enter the complete 6-digit code".to_string()));
                return;
            }
            error.set(None);
            verify.emit((*otp).clone());
        })
    };

    let validate_char = Callback::from(|(c, _): (char, usize)| c.is_ascii_digit());
    let cell_props = CellProps::from(CellConfig {
        placeholder: Some(AttrValue::from("-")),
        class: classes!(),
    });

    html! {
        <div class="card auth-card">
            <h2>{ "Verify your email" }</h2>
            <p class="card-subtitle">{ "Enter the 6-digit verification code" }</p>

            if let Some(message) = &*error {
                <div class="alert alert-error">{ message }</div>
            }
            if let Some(message) = &*notice {
                <div class="alert alert-success">{ message }</div>
            }

            <form onsubmit={on_submit}>
                <OtpInput
                    value={(*otp).clone()}
                    length={CODE_LENGTH}
                    auto_focus={true}
                    validate_char={validate_char}
                    on_change={on_change}
                    on_complete={on_complete}
                    cell_props={cell_props}
                />

                <button type="submit" class="btn btn-primary btn-full" disabled={*verifying}>
                    { if *verifying { "Verifying..." } else { "Verify" } }
                </button>
            </form>

            <ResendOtp
                time_left={props.time_left}
                on_start={props.on_start.clone()}
                on_error={Callback::from({
                    let error = error.clone();
                    move |e| error.set(Some(e))
                })}
                on_sent={Callback::from({
                    let error = error.clone();
                    let notice = notice.clone();
                    move |message| {
                        error.set(None);
                        notice.set(Some(message));
                    }
                })}
            />
        </div>
    }
}
