use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{ "Verimail" }</h1>
                <nav>
                    <Link<Route> to={Route::Home}>{ "Home" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::Login}>{ "Sign In" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::Register}>{ "Sign Up" }</Link<Route>>
                </nav>
            </div>
        </header>
    }
}
