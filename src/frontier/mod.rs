//! URL discovery

pub mod explorer;

pub use explorer::FrontierExplorer;
