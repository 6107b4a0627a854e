use log::{info, Level};
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod consent;
mod emailjs;
mod form;
mod components {
    pub mod cookie_banner;
    pub mod notification;
}
mod pages {
    pub mod landing;
}

use config::ConfigStore;
use pages::landing::Landing;

#[derive(Clone, Debug, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/en")]
    EnglishHome,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route, store: ConfigStore) -> Html {
    match route {
        // Single-page site; unknown paths fall back to the landing page
        // and the resolver still picks the locale from the real URL.
        Route::Home | Route::EnglishHome | Route::NotFound => {
            info!("Rendering landing page ({:?})", store.locale());
            html! { <Landing store={store} /> }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub store: ConfigStore,
}

#[function_component]
fn App(props: &AppProps) -> Html {
    let store = props.store;
    html! {
        <BrowserRouter>
            <Switch<Route> render={move |route| switch(route, store)} />
        </BrowserRouter>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(Level::Info).expect("error initializing log");

    // The locale is fixed for the whole page lifetime.
    let store = ConfigStore::resolve();
    info!("Starting landing page, locale {:?}", store.locale());

    yew::Renderer::<App>::with_props(AppProps { store }).render();
}
