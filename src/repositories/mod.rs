//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Ogni repository gestisce le operazioni di database per una specifica entità.
//! Le query usano `query_as` + `FromRow` a runtime, lo schema vive in `migrations/`.

pub mod campaign;
pub mod conversation;
pub mod invitation;
pub mod organization;
pub mod traits;
pub mod transparency;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Read, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use campaign::CampaignRepository;
pub use conversation::ConversationRepository;
pub use invitation::InvitationRepository;
pub use organization::{NgoRepository, SchoolRepository};
pub use transparency::TransparencyRepository;
