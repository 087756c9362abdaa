//! Client library for the MCSS (MC Server Soft) remote control API.
//!
//! Provides a typed client for the MCSS HTTP API: servers, backups, users,
//! scheduler tasks, settings and mass-action operations. Both API version
//! families (v1 and v2) are served by the same [`Mcss`] facade, selected at
//! construction through [`ApiVersion`].

mod api;
mod backups;
mod client;
mod error;
mod scheduler;
mod servers;
mod users;

pub use api::*;
pub use backups::*;
pub use client::*;
pub use error::*;
pub use scheduler::*;
pub use servers::*;
pub use users::*;
