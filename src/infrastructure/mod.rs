pub mod events;
pub mod memory;
pub mod metadata;
pub mod persistence;
