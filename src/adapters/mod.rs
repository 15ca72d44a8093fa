// Adapters layer: concrete implementations of the domain ports (storage,
// dataset sources, cache).

pub mod file_source;
pub mod http_source;
pub mod memory;
