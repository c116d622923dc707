use dioxus::prelude::*;

use walkin_selector::domain::BoxType;

use crate::ui::theme;

#[component]
pub fn KpiCard(
    title: String,
    value: String,
    description: Option<String>,
    box_type: BoxType,
) -> Element {
    rsx! {
        div {
            class: "{theme::panel_class(box_type)}",
            h3 { class: "section-title", "{title}" }
            p { class: "kpi-value {theme::accent_class(box_type)}", "{value}" }
            if let Some(desc) = description {
                p { class: "muted", "{desc}" }
            }
        }
    }
}
