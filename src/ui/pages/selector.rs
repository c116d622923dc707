use dioxus::prelude::*;
use tracing::warn;

use walkin_selector::domain::{recommend, AppState, BoxType, Recommendation, SelectionRequest};

use crate::{
    app::persist_user_state,
    ui::{
        components::{
            kpi_card::KpiCard,
            toast::{push_toast, ToastKind, ToastMessage},
            vendor_table::{format_money, VendorTable},
        },
        theme,
    },
};

#[component]
pub fn SelectorPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let initial = state.with(|st| {
        let request = st.last_recommendation.as_ref().map(|rec| rec.request.clone());
        (st.last_box_type, request)
    });
    let mut box_type_input = use_signal(|| initial.0.key().to_string());
    let mut width_input = use_signal(|| {
        initial
            .1
            .as_ref()
            .map(|req| req.external_width.to_string())
            .unwrap_or_default()
    });
    let mut depth_input = use_signal(|| {
        initial
            .1
            .as_ref()
            .map(|req| req.external_depth.to_string())
            .unwrap_or_default()
    });

    let on_select = move |_| {
        let request = match parse_request(&box_type_input(), &width_input(), &depth_input()) {
            Ok(request) => request,
            Err(message) => {
                push_toast(toasts.clone(), ToastKind::Error, message);
                return;
            }
        };

        let (table, catalogs, pricing) = state.with(|st| {
            (
                st.capacity_table.clone(),
                st.catalogs.clone(),
                st.pricing.clone(),
            )
        });

        match recommend(&table, &request, &catalogs, &pricing) {
            Ok(result) => {
                if result.recommended.is_none() {
                    push_toast(
                        toasts.clone(),
                        ToastKind::Warning,
                        "No vendor offers a matching system for this box.",
                    );
                }
                state.with_mut(|st| {
                    st.last_box_type = request.box_type;
                    st.last_recommendation = Some(result);
                });
                persist_user_state(&state);
            }
            Err(err) => {
                warn!(%err, "selection failed");
                state.with_mut(|st| st.last_recommendation = None);
                push_toast(toasts.clone(), ToastKind::Error, err.to_string());
            }
        }
    };

    let result = state.with(|st| st.last_recommendation.clone());
    let no_catalogs = state.with(|st| st.catalogs.is_empty());

    rsx! {
        div { class: "stack",
            section { class: "panel",
                h2 { class: "section-title", "Box" }
                div { class: "grid",
                    div { class: "field",
                        label { "Box type" }
                        select {
                            class: "input",
                            value: "{box_type_input}",
                            onchange: move |evt| box_type_input.set(evt.value()),
                            for box_type in BoxType::ALL {
                                option {
                                    value: box_type.key(),
                                    selected: box_type.key() == box_type_input(),
                                    "{box_type.label()}"
                                }
                            }
                        }
                    }
                    div { class: "field",
                        label { "External width (ft)" }
                        input {
                            class: "input",
                            value: width_input(),
                            oninput: move |evt| width_input.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { "External depth (ft)" }
                        input {
                            class: "input",
                            value: depth_input(),
                            oninput: move |evt| depth_input.set(evt.value()),
                        }
                    }
                }
                div { style: "margin-top: 1rem",
                    button { class: "btn btn-primary", onclick: on_select, "Find equipment" }
                }
                if no_catalogs {
                    p { class: "notice notice-warn", style: "margin-top: 1rem",
                        "No vendor catalogs are loaded. Sizing still works; add catalogs on the Data page to compare systems."
                    }
                }
            }

            if let Some(recommendation) = result {
                ResultView { recommendation }
            }
        }
    }
}

#[component]
fn ResultView(recommendation: Recommendation) -> Element {
    let box_type = recommendation.request.box_type;
    let sizing = recommendation.sizing.clone();
    let requested = recommendation.request.box_size_label();

    let size_note = if sizing.is_exact_match {
        "Exact table entry".to_string()
    } else {
        format!("Rounded up from {requested}")
    };
    let coil_note = sizing
        .dual_coil_reason
        .clone()
        .unwrap_or_else(|| "Standard single coil".to_string());

    let recommended = recommendation.recommended.clone();

    rsx! {
        div { class: "grid",
            KpiCard {
                title: "Required capacity".to_string(),
                value: format!("{} BTU/h", sizing.required_btu),
                description: Some(format!("{} {}", box_type.label(), sizing.box_size_used)),
                box_type,
            }
            KpiCard {
                title: "Table size used".to_string(),
                value: sizing.box_size_used.clone(),
                description: Some(size_note),
                box_type,
            }
            KpiCard {
                title: "Evaporator coils".to_string(),
                value: sizing.required_evaporator_quantity.to_string(),
                description: Some(coil_note),
                box_type,
            }
        }

        if !sizing.is_exact_match {
            p { class: "notice notice-warn",
                "{requested} is not in the capacity table; the next larger size {sizing.box_size_used} was used."
            }
        }

        if let Some(pick) = recommended {
            section { class: "panel panel-recommended",
                h2 { class: "section-title", "Recommended vendor" }
                p { class: "kpi-value {theme::accent_class(box_type)}", "{pick.vendor}" }
                p { "Customer price {format_money(pick.customer_price)}" }
                match pick.delta_to_next {
                    Some(delta) => rsx! {
                        p { class: "muted", "{format_money(delta)} below the next-cheapest vendor" }
                    },
                    None => rsx! {
                        p { class: "muted", "Only one vendor had a matching system" }
                    },
                }
            }
        }

        section { class: "panel",
            h2 { class: "section-title", "Vendor comparison" }
            VendorTable { recommendation: recommendation.clone() }
        }
    }
}

/// Validates the raw form fields into a request.
fn parse_request(box_type: &str, width: &str, depth: &str) -> Result<SelectionRequest, String> {
    let box_type = box_type
        .parse::<BoxType>()
        .map_err(|err| err.to_string())?;
    let width = parse_dimension("Width", width)?;
    let depth = parse_dimension("Depth", depth)?;
    Ok(SelectionRequest::new(box_type, width, depth))
}

fn parse_dimension(name: &str, raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("{name} must be a number of feet"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_form() {
        let request = parse_request("Freezer", " 8 ", "10.5").unwrap();
        assert_eq!(request.box_type, BoxType::Freezer);
        assert_eq!(request.external_width, 8.0);
        assert_eq!(request.external_depth, 10.5);
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(parse_request("cooler", "", "10").is_err());
        assert!(parse_request("cooler", "8", "-1").is_err());
        assert!(parse_request("cooler", "8", "NaN").is_err());
        assert!(parse_request("chiller", "8", "10").is_err());
    }
}
