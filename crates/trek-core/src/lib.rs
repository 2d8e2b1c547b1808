//! trek-core library.
//!
//! The turn log ([`event`]), world data ([`world`]), and the rules that tie
//! them together ([`session`]).
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums carrying an [`error::ErrorCode`];
//!   `anyhow::Result` only at the config edge.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod blackjack;
pub mod config;
pub mod error;
pub mod event;
pub mod rng;
pub mod session;
pub mod world;

pub use config::ConfigError;
pub use error::ErrorCode;
pub use event::{Event, EventList, LogError};
pub use rng::DeterministicRng;
pub use session::{GameSession, Rules, SessionError, Status, Turn};
pub use world::{LocationId, World, WorldError};
