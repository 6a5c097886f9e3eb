//! Client side of the gateway API
//!
//! [`GatewayClient`] speaks HTTP; [`views`] holds the screen state that NGO and
//! school operators interact with, independent of any rendering framework.

pub mod error;
pub mod gateway;
pub mod views;

pub use error::GatewayError;
pub use gateway::GatewayClient;
