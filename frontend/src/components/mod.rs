pub mod aliases;
pub mod locks;
