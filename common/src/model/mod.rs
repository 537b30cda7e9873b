pub mod alias;
pub mod alias_import;
pub mod display;
pub mod lock;
