//! farmhand-core - Core library for Farmhand
//!
//! This crate contains the resource models, the HTTP API client, the session
//! context and the list synchronizer shared by every Farmhand interface.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sync;
pub mod util;
pub mod weather;

pub use api::ApiClient;
pub use auth::{AuthClient, RegisterForm, SecurityQuestion};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::ItemId;
pub use session::{Session, SessionToken, TokenStore};
pub use sync::{LoadOutcome, MutationOutcome, Resource, ResourceSync};
pub use weather::WeatherClient;
