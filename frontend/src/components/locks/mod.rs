pub mod resource_lock;
