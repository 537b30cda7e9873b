pub mod aliases;
pub mod core_service;
