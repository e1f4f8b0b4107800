//! Resource store handlers

pub mod memory;

pub use memory::MemoryResourceStore;
