use std::time::SystemTime;

use dioxus::prelude::*;

use walkin_selector::{
    domain::{AppState, DataSource, PricingParams},
    util::version::{version_label, APP_NAME},
};

use crate::{
    app::persist_user_state,
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let initial_params = state.with(|st| st.pricing.clone());

    let mut markup_input = use_signal(|| format!("{:.2}", initial_params.markup_factor));
    let mut rounding_input = use_signal(|| format!("{:.0}", initial_params.rounding_unit));

    let source_entries = state.with(|st| {
        let mut entries = st
            .sources
            .iter()
            .map(|(source, time)| (source_label(source), humanize_age(*time)))
            .collect::<Vec<_>>();
        entries.sort();
        entries
    });
    let current_markup = state.with(|st| format!("{:.0}", st.pricing.markup_percent()));

    let on_apply = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| match parse_params(&markup_input(), &rounding_input()) {
            Ok(params) => {
                state.with_mut(|st| {
                    st.pricing = params;
                    st.last_recommendation = None;
                });
                persist_user_state(&state);
                push_toast(toasts.clone(), ToastKind::Success, "Updated pricing parameters.");
            }
            Err(message) => {
                push_toast(toasts.clone(), ToastKind::Error, message);
            }
        }
    };

    let on_reset = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let defaults = PricingParams::default();
            markup_input.set(format!("{:.2}", defaults.markup_factor));
            rounding_input.set(format!("{:.0}", defaults.rounding_unit));
            state.with_mut(|st| {
                st.pricing = defaults;
                st.last_recommendation = None;
            });
            persist_user_state(&state);
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Restored default pricing parameters.",
            );
        }
    };

    rsx! {
        div { class: "stack",
            section { class: "panel",
                h2 { class: "section-title", "Pricing" }
                p { class: "muted", "Current markup {current_markup}% over vendor cost." }
                div { class: "grid",
                    div { class: "field",
                        label { "Markup factor" }
                        input {
                            class: "input",
                            value: markup_input(),
                            oninput: move |evt| markup_input.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { "Round customer price to nearest" }
                        input {
                            class: "input",
                            value: rounding_input(),
                            oninput: move |evt| rounding_input.set(evt.value()),
                        }
                    }
                }
                div { class: "nav", style: "margin-top: 1rem",
                    button { class: "btn btn-primary", onclick: on_apply, "Apply" }
                    button { class: "btn", onclick: on_reset, "Reset Defaults" }
                }
            }

            section { class: "panel",
                h2 { class: "section-title", "Loaded data" }
                if source_entries.is_empty() {
                    p { class: "muted", "Nothing loaded yet." }
                } else {
                    table {
                        class: "vendor-table",
                        tbody {
                            for (label, age) in source_entries {
                                tr {
                                    td { "{label}" }
                                    td { class: "muted", "{age}" }
                                }
                            }
                        }
                    }
                }
            }

            section { class: "panel",
                h2 { class: "section-title", "About" }
                p { "{APP_NAME}" }
                p { class: "muted", "{version_label()}" }
            }
        }
    }
}

fn parse_params(markup: &str, rounding: &str) -> Result<PricingParams, String> {
    let markup_factor = markup
        .trim()
        .parse::<f64>()
        .map_err(|_| "Markup factor must be a number, e.g. 1.25".to_string())?;
    let rounding_unit = rounding
        .trim()
        .parse::<f64>()
        .map_err(|_| "Rounding unit must be a number, e.g. 50".to_string())?;

    let params = PricingParams {
        markup_factor,
        rounding_unit,
    };
    params.validate().map_err(|err| err.to_string())?;
    Ok(params)
}

fn source_label(source: &DataSource) -> String {
    match source {
        DataSource::CapacityTable => "Capacity table".to_string(),
        DataSource::Catalog(vendor) => format!("Catalog: {vendor}"),
    }
}

fn humanize_age(loaded_at: SystemTime) -> String {
    let age = SystemTime::now()
        .duration_since(loaded_at)
        .unwrap_or_default()
        .as_secs();
    if age < 60 {
        format!("{age}s ago")
    } else if age < 3_600 {
        format!("{}m ago", age / 60)
    } else if age < 86_400 {
        format!("{}h ago", age / 3_600)
    } else {
        format!("{}d ago", age / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn params_are_validated() {
        let params = parse_params("1.30", "25").unwrap();
        assert_eq!(params.markup_factor, 1.3);
        assert_eq!(params.rounding_unit, 25.0);

        assert!(parse_params("abc", "50").is_err());
        assert!(parse_params("1.25", "0").is_err());
        assert!(parse_params("-1", "50").is_err());
    }

    #[test]
    fn ages_are_bucketed() {
        let now = SystemTime::now();
        assert_eq!(humanize_age(now - Duration::from_secs(90)), "1m ago");
        assert_eq!(humanize_age(now - Duration::from_secs(7_200)), "2h ago");
        assert_eq!(humanize_age(now + Duration::from_secs(30)), "0s ago");
    }
}
