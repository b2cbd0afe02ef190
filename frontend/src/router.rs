use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{home::Home, login::Login, not_found::NotFound, register::Register};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::Login => html! { <Login /> },
        Route::Register => html! { <Register /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
