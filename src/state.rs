pub mod item_selectors;
pub mod registry;
pub mod store;
