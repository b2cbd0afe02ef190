use shared::models::User;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::services::identity::IdentityService;

#[function_component(Home)]
pub fn home() -> Html {
    let user = use_state(|| None::<User>);
    let loading = use_state(|| true);
    let navigator = use_navigator();

    {
        let user = user.clone();
        let loading = loading.clone();
        let navigator = navigator.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match IdentityService::current_user().await {
                    Ok(Some(current)) => {
                        user.set(Some(current));
                        loading.set(false);
                    }
                    Ok(None) => {
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::Login);
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to fetch current user: {:?}", e);
                        loading.set(false);
                    }
                }
            });
            || ()
        });
    }

    let on_sign_out = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            let navigator = navigator.clone();
            spawn_local(async move {
                if let Err(e) = IdentityService::sign_out().await {
                    tracing::error!("Failed to sign out: {:?}", e);
                }
                if let Some(navigator) = navigator {
                    navigator.replace(&Route::Login);
                }
            });
        })
    };

    html! {
        <div class="container">
            if *loading {
                <div class="loading">
                    <div class="spinner"></div>
                </div>
            } else if let Some(user) = &*user {
                <div class="card">
                    <h2>{ format!("Welcome, {}", user.display_name()) }</h2>
                    <p class="card-subtitle">{ &user.email }</p>
                    <button class="btn btn-outlined" onclick={on_sign_out}>
                        { "Sign Out" }
                    </button>
                </div>
            } else {
                <div class="empty-state">
                    <h2>{ "Something went wrong" }</h2>
                    <p>{ "We couldn't load your account. Please try again." }</p>
                </div>
            }
        </div>
    }
}
