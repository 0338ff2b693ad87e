// Adapters layer: concrete implementations of the domain ports over HTTP.

pub mod practicum;
pub mod telegram;
