pub mod catalogs;
pub mod selector;
pub mod settings;

pub use catalogs::CatalogsPage;
pub use selector::SelectorPage;
pub use settings::SettingsPage;
