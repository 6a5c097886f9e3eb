//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository condivisi tra le route.

use crate::repositories::{
    CampaignRepository, ConversationRepository, InvitationRepository, NgoRepository,
    SchoolRepository, TransparencyRepository,
};
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route
pub struct AppState {
    pub ngo: NgoRepository,
    pub school: SchoolRepository,
    pub campaign: CampaignRepository,
    pub invitation: InvitationRepository,
    pub conversation: ConversationRepository,
    pub transparency: TransparencyRepository,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            ngo: NgoRepository::new(pool.clone()),
            school: SchoolRepository::new(pool.clone()),
            campaign: CampaignRepository::new(pool.clone()),
            invitation: InvitationRepository::new(pool.clone()),
            conversation: ConversationRepository::new(pool.clone()),
            transparency: TransparencyRepository::new(pool),
        }
    }
}
