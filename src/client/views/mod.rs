//! View-state models
//!
//! Each view owns its state as a plain serializable value. `open` builds a
//! fresh state on view entry and `reset` restores the default on exit.

pub mod campaign_form;
pub mod campaigns;
pub mod invite_composer;
pub mod requests_panel;
pub mod transparency_card;

pub use campaign_form::{CampaignForm, FieldError};
pub use campaigns::SchoolCampaignsView;
pub use invite_composer::{InviteComposer, default_invitation_message};
pub use requests_panel::{DEFAULT_ACCEPT_MESSAGE, NgoRequestsPanel, RequestFilter, SchoolRequestsPanel};
pub use transparency_card::{TransparencyCard, TransparencyState};
