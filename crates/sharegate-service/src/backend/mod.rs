//! Backend implementations of the service traits.

pub mod memory;

pub use memory::{MemoryPrincipalDirectory, MemorySharesBackend};
