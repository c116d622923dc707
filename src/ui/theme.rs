//! Box-type accents shared across pages.

use walkin_selector::domain::BoxType;

pub fn panel_class(box_type: BoxType) -> &'static str {
    match box_type {
        BoxType::Cooler => "panel panel-cooler",
        BoxType::Freezer => "panel panel-freezer",
    }
}

pub fn accent_class(box_type: BoxType) -> &'static str {
    match box_type {
        BoxType::Cooler => "accent-cooler",
        BoxType::Freezer => "accent-freezer",
    }
}

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "nav-button active"
    } else {
        "nav-button"
    }
}

pub fn row_class(recommended: bool) -> &'static str {
    if recommended {
        "recommended"
    } else {
        ""
    }
}
