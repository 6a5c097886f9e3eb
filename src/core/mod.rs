//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! - Configurazione
//! - Gestione errori
//! - Database
//! - Stato applicazione

pub mod config;
pub mod db;
pub mod error;
pub mod state;

// Re-exports per facilitare l'import
pub use config::{ClientConfig, Config};
pub use error::{AppError, ErrorResponse};
pub use state::AppState;
