//! Entities module - Entità del dominio applicativo
//!
//! Ogni entity corrisponde a una tabella nel database (vedi `migrations/`).

pub mod campaign;
pub mod conversation;
pub mod enums;
pub mod invitation;
pub mod organization;
pub mod transparency;

// Re-exports per facilitare l'import
pub use campaign::Campaign;
pub use conversation::Conversation;
pub use enums::{CampaignStatus, InvitationStatus, PhotoKind, RequestType};
pub use invitation::Invitation;
pub use organization::{Ngo, School};
pub use transparency::{TransparencyRecord, TransparencyView};
