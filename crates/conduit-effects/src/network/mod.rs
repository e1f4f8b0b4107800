//! Storage network handlers

pub mod memory;

pub use memory::MemoryNetwork;
