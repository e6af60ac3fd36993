//! Name lookup by exact key or key prefix.

pub mod index;
mod node;

pub use index::PrefixIndex;
