use std::path::PathBuf;

use dioxus::prelude::*;

use walkin_selector::{
    domain::{AppState, BoxType},
    infra::sources::default_catalog_dir,
};

use crate::{
    app::{persist_user_state, reload_sources},
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
};

#[derive(Clone, PartialEq)]
struct CatalogSummary {
    vendor: String,
    coolers: usize,
    freezers: usize,
}

#[component]
pub fn CatalogsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let (initial_table, initial_dir) = state.with(|st| {
        (
            path_to_input(st.capacity_table_path.as_ref()),
            path_to_input(st.catalog_dir.as_ref()),
        )
    });
    let mut table_path_input = use_signal(|| initial_table);
    let mut catalog_dir_input = use_signal(|| initial_dir);

    let (origin, cooler_rows, freezer_rows, catalogs, offering_count) = state.with(|st| {
        let catalogs = st
            .catalogs
            .iter()
            .map(|catalog| CatalogSummary {
                vendor: catalog.vendor.clone(),
                coolers: catalog.count_for(BoxType::Cooler),
                freezers: catalog.count_for(BoxType::Freezer),
            })
            .collect::<Vec<_>>();
        (
            st.table_origin.label(),
            st.capacity_table.count_for(BoxType::Cooler),
            st.capacity_table.count_for(BoxType::Freezer),
            catalogs,
            st.offering_count(),
        )
    });
    let vendor_count = catalogs.len();
    let default_dir = default_catalog_dir().display().to_string();

    let on_apply = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let table_path = input_to_path(&table_path_input());
            let catalog_dir = input_to_path(&catalog_dir_input());
            state.with_mut(|st| {
                st.capacity_table_path = table_path;
                st.catalog_dir = catalog_dir;
            });
            if reload_sources(state.clone(), toasts.clone()) {
                persist_user_state(&state);
                push_toast(toasts.clone(), ToastKind::Success, "Saved data locations.");
            }
        }
    };

    let on_reload = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            reload_sources(state.clone(), toasts.clone());
        }
    };

    let on_use_defaults = move |_| {
        table_path_input.set(String::new());
        catalog_dir_input.set(String::new());
    };

    rsx! {
        div { class: "stack",
            section { class: "panel",
                h2 { class: "section-title", "Capacity table" }
                p { "{origin}" }
                p { class: "muted", "{cooler_rows} cooler sizes · {freezer_rows} freezer sizes" }
            }

            section { class: "panel",
                h2 { class: "section-title", "Vendor catalogs" }
                if catalogs.is_empty() {
                    p { class: "muted", "No vendor catalogs loaded. Drop one CSV per vendor into the catalog directory and reload." }
                } else {
                    p { class: "muted", "{vendor_count} vendors · {offering_count} systems" }
                    table {
                        class: "vendor-table",
                        thead {
                            tr {
                                th { "Vendor" }
                                th { "Cooler systems" }
                                th { "Freezer systems" }
                            }
                        }
                        tbody {
                            for summary in catalogs {
                                tr {
                                    key: "{summary.vendor}",
                                    td { "{summary.vendor}" }
                                    td { "{summary.coolers}" }
                                    td { "{summary.freezers}" }
                                }
                            }
                        }
                    }
                }
            }

            section { class: "panel",
                h2 { class: "section-title", "Data locations" }
                div { class: "grid",
                    div { class: "field",
                        label { "Capacity table CSV (blank for bundled)" }
                        input {
                            class: "input",
                            value: table_path_input(),
                            oninput: move |evt| table_path_input.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { "Catalog directory (blank for default)" }
                        input {
                            class: "input",
                            placeholder: "{default_dir}",
                            value: catalog_dir_input(),
                            oninput: move |evt| catalog_dir_input.set(evt.value()),
                        }
                    }
                }
                div { class: "nav", style: "margin-top: 1rem",
                    button { class: "btn btn-primary", onclick: on_apply, "Apply & Reload" }
                    button { class: "btn", onclick: on_reload, "Reload" }
                    button { class: "btn", onclick: on_use_defaults, "Use Defaults" }
                }
            }
        }
    }
}

fn path_to_input(path: Option<&PathBuf>) -> String {
    path.map(|path| path.display().to_string())
        .unwrap_or_default()
}

fn input_to_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_means_default_location() {
        assert_eq!(input_to_path("   "), None);
        assert_eq!(
            input_to_path(" /data/catalogs "),
            Some(PathBuf::from("/data/catalogs"))
        );
        assert_eq!(path_to_input(None), "");
    }
}
