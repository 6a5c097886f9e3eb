//! DTOs module - Data Transfer Objects
//!
//! Request bodies and query strings shared by the gateway handlers and the client.
//! Read models are the entities themselves, serialized in camelCase.

pub mod campaign;
pub mod invitation;
pub mod organization;
pub mod query;
pub mod transparency;

pub use campaign::{CreateCampaignDTO, UpdateCampaignDTO};
pub use invitation::{CreateInvitationDTO, RespondInvitationDTO};
pub use organization::{CreateNgoDTO, CreateSchoolDTO};
pub use query::CampaignQuery;
pub use transparency::{AddPhotosDTO, RemovePhotoQuery, UpsertTransparencyDTO};
