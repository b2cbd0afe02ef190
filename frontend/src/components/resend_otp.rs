use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::identity::IdentityService;

/// Seconds a user must wait before requesting another code.
pub const RESEND_COOLDOWN_SECS: u32 = 120;

#[derive(Properties, PartialEq)]
pub struct ResendOtpProps {
    /// Seconds left on the resend cooldown; the button appears at zero.
    pub time_left: u32,
    /// Restarts the cooldown timer after a code was sent.
    pub on_start: Callback<u32>,
    pub on_error: Callback<String>,
    pub on_sent: Callback<String>,
}

#[function_component(ResendOtp)]
pub fn resend_otp(props: &ResendOtpProps) -> Html {
    let is_pending = use_state(|| false);

    let on_resend = {
        let is_pending = is_pending.clone();
        let on_start = props.on_start.clone();
        let on_error = props.on_error.clone();
        let on_sent = props.on_sent.clone();
        Callback::from(move |_: MouseEvent| {
            if *is_pending {
                return;
            }
            is_pending.set(true);

            let is_pending = is_pending.clone();
            let on_start = on_start.clone();
            let on_error = on_error.clone();
            let on_sent = on_sent.clone();
            spawn_local(async move {
                match IdentityService::send_email_code().await {
                    Ok(()) => {
                        on_sent.emit("A new code has been sent to your email address.".to_string());
                        on_start.emit(RESEND_COOLDOWN_SECS);
                    }
                    Err(e) => {
                        tracing::error!("Failed to resend verification code: {:?}", e);
                        on_error.emit(e);
                    }
                }
                is_pending.set(false);
            });
        })
    };

    html! {
        <div class="resend-otp">
            if props.time_left > 0 {
                <p>{ format!("Time remaining: {} seconds", props.time_left) }</p>
            } else {
                <button
                    type="button"
                    class="btn btn-outlined btn-small"
                    disabled={*is_pending}
                    onclick={on_resend}
                >
                    { if *is_pending { "Resending..." } else { "Resend code" } }
                </button>
            }
        </div>
    }
}
