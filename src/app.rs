use std::time::SystemTime;

use dioxus::{prelude::*, signals::Signal};
use tracing::warn;

use walkin_selector::{
    domain::AppState,
    infra::sources::{load_sources, LoadedSources},
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

use crate::ui::{
    components::toast::{push_toast, Toast, ToastKind, ToastMessage},
    pages::{CatalogsPage, SelectorPage, SettingsPage},
    shell::Shell,
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Selector {},
    #[route("/catalogs")]
    Catalogs {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    use_hook({
        let mut state = state.clone();
        let toasts = toasts.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
            reload_sources(state, toasts);
        }
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        warn!(%err, "failed to persist user state");
    }
}

/// Reloads the capacity table and vendor catalogs from the configured paths.
///
/// On failure the previous snapshot stays in place. Returns whether a new
/// snapshot was installed.
pub fn reload_sources(mut state: Signal<AppState>, toasts: Signal<Vec<ToastMessage>>) -> bool {
    let (table_path, catalog_dir) =
        state.with(|st| (st.capacity_table_path.clone(), st.catalog_dir.clone()));

    match load_sources(table_path.as_deref(), catalog_dir.as_deref()) {
        Ok(loaded) => {
            let LoadedSources {
                table,
                origin,
                catalogs,
                warnings,
            } = loaded;
            for warning in warnings {
                push_toast(toasts.clone(), ToastKind::Warning, warning);
            }
            let vendor_count = catalogs.len();
            let row_count = table.len();
            state.with_mut(|st| st.replace_sources(table, origin, catalogs, SystemTime::now()));
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                format!("Loaded {row_count} capacity rows and {vendor_count} vendor catalog(s)."),
            );
            true
        }
        Err(err) => {
            warn!(%err, "failed to load selector data");
            push_toast(
                toasts.clone(),
                ToastKind::Error,
                format!("Failed to load data: {err}"),
            );
            false
        }
    }
}

#[component]
pub fn Selector() -> Element {
    rsx! { Shell { SelectorPage {} } }
}

#[component]
pub fn Catalogs() -> Element {
    rsx! { Shell { CatalogsPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
