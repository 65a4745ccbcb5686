//! # cathub-uploads: batch photo upload coordination for CatHub clients
//!
//! `cathub-uploads` drives the "register a profile with photos" flow: it
//! creates the profile record, fans out one independent upload per selected
//! photo, and reports a single consolidated result once every upload has
//! reached a terminal outcome.
//!
//! ## Key guarantees
//!
//! - **Exactly-once completion**: no matter how many uploads fail, how long
//!   they take, or in what order they finish, the batch completion signal
//!   fires exactly once
//! - **Fail-independent uploads**: one photo failing never cancels or retries
//!   a sibling; every upload runs to its own terminal outcome
//! - **Stable reporting**: outcomes come back ordered by submission index,
//!   not completion time, so reports are reproducible regardless of network
//!   timing
//! - **Best-effort attachment**: a created profile stands on its own; partial
//!   photo failures never roll it back
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cathub_uploads::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> UploadResult<()> {
//! let client = HttpCathubClient::new("http://localhost:5000");
//! let registrar = ProfileRegistrar::over(client, UploadConfig::default());
//!
//! let profile = NewProfile::new("Mimi", Sex::Female)
//!     .with_pattern("calico")
//!     .with_age_months(18);
//!
//! let report = registrar
//!     .register_with_photos(
//!         profile,
//!         vec![
//!             AssetRef::new("/photos/mimi_front.jpg"),
//!             AssetRef::new("/photos/mimi_side.jpg"),
//!         ],
//!     )
//!     .await?;
//!
//! println!(
//!     "profile {} registered, {}/{} photos stored",
//!     report.profile_id,
//!     report.batch.succeeded,
//!     report.batch.total()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  ProfileRegistrar   │  ← create record, then hand off the batch
//! ├─────────────────────┤
//! │ BatchUploadCoordinator │ ← fan-out/fan-in, exactly-once completion
//! ├──────────┬──────────┤
//! │ AssetResolver │ PhotoUploadClient │ ← pluggable leaf collaborators
//! └──────────┴──────────┘
//! ```
//!
//! The resolver and upload client are trait seams: the shipped
//! [`FsResolver`] and [`HttpCathubClient`] talk to the filesystem and the
//! CatHub REST API, and tests swap in scripted fakes.

mod client;
mod config;
mod coordinator;
mod error;
mod profile;
mod registrar;
mod resolver;
mod rest;
mod types;

pub use client::{PhotoUploadClient, ProfileService};
pub use config::UploadConfig;
pub use coordinator::BatchUploadCoordinator;
pub use error::{UploadError, UploadResult};
pub use profile::{CatProfile, NewProfile, Photo, Sex};
pub use registrar::ProfileRegistrar;
pub use resolver::{guess_mime, AssetResolver, FsResolver};
pub use rest::HttpCathubClient;
pub use types::{
    AssetPayload, AssetRef, BatchId, BatchResult, ProfileId, RegistrationPhase,
    RegistrationReport, UploadOutcome,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AssetRef, BatchResult, BatchUploadCoordinator, HttpCathubClient, NewProfile,
        ProfileRegistrar, RegistrationReport, Sex, UploadConfig, UploadError, UploadOutcome,
        UploadResult,
    };
}
