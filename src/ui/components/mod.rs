pub mod kpi_card;
pub mod toast;
pub mod vendor_table;
