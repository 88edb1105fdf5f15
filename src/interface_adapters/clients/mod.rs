// Reqwest clients for external services.

pub mod critique;

pub use critique::CritiqueClient;
