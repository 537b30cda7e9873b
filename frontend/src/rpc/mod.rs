pub mod core_service;
