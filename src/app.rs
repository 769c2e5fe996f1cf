//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::hooks::use_navigate;
use leptos_router::{
    NavigateOptions, StaticSegment,
    components::{ProtectedRoute, Redirect, Route, Router, Routes},
};

use crate::config::AppConfig;
use crate::net::api::HttpBackend;
use crate::pages::{birthdays::BirthdaysPage, login::LoginPage, register::RegisterPage};
use crate::routes::AppRoute;
use crate::state::auth::{AuthService, AuthState};
use crate::state::session::SessionStore;
use crate::util::guard::can_activate;

/// Root application component.
///
/// Provides the shared auth and config contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_build_env();
    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);
    provide_context(config.clone());

    view! {
        <Title text="Birthday Reminder"/>

        <Router>
            <AuthProvider auth=auth config=config>
                <main class="app">
                    <Routes fallback=|| view! { <Redirect path={AppRoute::fallback().path()}/> }>
                        <Route path=StaticSegment("") view=|| view! { <Redirect path={AppRoute::fallback().path()}/> }/>
                        <Route path={StaticSegment(AppRoute::login().segment())} view=LoginPage/>
                        <Route path={StaticSegment(AppRoute::Register.segment())} view=RegisterPage/>
                        <ProtectedRoute
                            path={StaticSegment(AppRoute::home().segment())}
                            view=BirthdaysPage
                            condition=move || Some(can_activate(&auth.get()))
                            redirect_path=|| AppRoute::fallback().path()
                        />
                    </Routes>
                </main>
            </AuthProvider>
        </Router>
    }
}

/// Builds the auth service inside the router so it can navigate, and mirrors
/// its state into the `auth` signal.
#[component]
fn AuthProvider(auth: RwSignal<AuthState>, config: AppConfig, children: Children) -> impl IntoView {
    let navigate = use_navigate();
    let store = SessionStore::browser();
    let service = AuthService::new(HttpBackend::new(config, store.clone()), store, move |route: AppRoute| {
        navigate(&route.path(), NavigateOptions::default());
    });
    service.subscribe(move |state| auth.set(state.clone()));
    provide_context(StoredValue::new_local(service));

    children()
}
