use dioxus::prelude::*;

use walkin_selector::domain::{EquipmentSelection, Recommendation};

use crate::ui::theme;

#[derive(Clone, PartialEq)]
struct VendorRow {
    vendor: String,
    condensing_unit: String,
    evaporator: String,
    capacity: String,
    vendor_cost: String,
    markup: String,
    customer_price: String,
    recommended: bool,
}

impl VendorRow {
    fn new(selection: &EquipmentSelection, recommended: bool) -> Self {
        let offering = &selection.offering;
        Self {
            vendor: selection.vendor.clone(),
            condensing_unit: format!(
                "{} ({} HP)",
                offering.condensing_unit_model, offering.horsepower
            ),
            evaporator: format!(
                "{} × {}",
                offering.evaporator_model, offering.evaporator_quantity
            ),
            capacity: format!(
                "{} BTU (+{:.1}%)",
                offering.rated_btu, selection.oversizing_percent
            ),
            vendor_cost: format_money(selection.vendor_cost),
            markup: format_money(selection.markup_amount),
            customer_price: format_money(selection.customer_price),
            recommended,
        }
    }
}

pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Side-by-side comparison of every vendor that produced a match.
#[component]
pub fn VendorTable(recommendation: Recommendation) -> Element {
    let rows = recommendation
        .vendor_options
        .iter()
        .map(|selection| {
            VendorRow::new(selection, recommendation.is_recommended(&selection.vendor))
        })
        .collect::<Vec<_>>();

    if rows.is_empty() {
        return rsx! {
            p { class: "notice notice-warn", "No vendor catalog has a system that meets this requirement." }
        };
    }

    rsx! {
        table {
            class: "vendor-table",
            thead {
                tr {
                    th { "Vendor" }
                    th { "Condensing unit" }
                    th { "Evaporator" }
                    th { "Capacity" }
                    th { "Vendor cost" }
                    th { "Markup" }
                    th { "Customer price" }
                }
            }
            tbody {
                for row in rows {
                    tr {
                        key: "{row.vendor}",
                        class: "{theme::row_class(row.recommended)}",
                        td {
                            "{row.vendor}"
                            if row.recommended {
                                " "
                                span { class: "badge", "Recommended" }
                            }
                        }
                        td { "{row.condensing_unit}" }
                        td { "{row.evaporator}" }
                        td { "{row.capacity}" }
                        td { "{row.vendor_cost}" }
                        td { "{row.markup}" }
                        td { "{row.customer_price}" }
                    }
                }
            }
        }
    }
}
