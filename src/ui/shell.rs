use dioxus::prelude::*;

use walkin_selector::{domain::AppState, util::version::APP_NAME};

use crate::app::Route;
use crate::ui::theme;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let (row_count, vendor_count, origin) = state.with(|st| {
        (
            st.capacity_table.len(),
            st.catalogs.len(),
            st.table_origin.label(),
        )
    });

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                div {
                    h1 { "{APP_NAME}" }
                    p { class: "tagline", "{origin} · {row_count} capacity rows · {vendor_count} vendors" }
                }
                nav { class: "nav",
                    NavButton { active: matches!(current_route, Route::Selector {}), onclick: move |_| { nav.push(Route::Selector {}); }, label: "Selector" }
                    NavButton { active: matches!(current_route, Route::Catalogs {}), onclick: move |_| { nav.push(Route::Catalogs {}); }, label: "Data" }
                    NavButton { active: matches!(current_route, Route::Settings {}), onclick: move |_| { nav.push(Route::Settings {}); }, label: "Settings" }
                }
            }
            main { class: "app-main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: "{theme::nav_button(active)}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
