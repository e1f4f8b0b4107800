//! Topology handlers

pub mod memory;

pub use memory::MemoryTopology;
