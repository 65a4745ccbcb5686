use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    AssetRef, BatchUploadCoordinator, FsResolver, NewProfile, ProfileService, RegistrationPhase,
    RegistrationReport, UploadConfig, UploadResult,
};

/// Sequences "create profile" then "upload its photos" and reports one
/// terminal event for the whole registration.
///
/// Photo attachment is best-effort: once the profile record exists, the
/// registration succeeds no matter how many individual uploads failed. The
/// caller gets the consolidated batch report either way. A creation failure
/// is terminal and no upload is ever attempted for it.
pub struct ProfileRegistrar {
    profiles: Arc<dyn ProfileService>,
    coordinator: BatchUploadCoordinator,
    phase_tx: watch::Sender<RegistrationPhase>,
}

impl ProfileRegistrar {
    pub fn new(profiles: Arc<dyn ProfileService>, coordinator: BatchUploadCoordinator) -> Self {
        let (phase_tx, _) = watch::channel(RegistrationPhase::Idle);
        Self {
            profiles,
            coordinator,
            phase_tx,
        }
    }

    /// Wire a registrar over a single client that implements both the
    /// profile and the photo upload services, resolving assets from the
    /// filesystem.
    pub fn over<C>(client: C, config: UploadConfig) -> Self
    where
        C: ProfileService + crate::PhotoUploadClient + 'static,
    {
        let client = Arc::new(client);
        let coordinator = BatchUploadCoordinator::from_arcs(
            Arc::new(FsResolver::new(config)),
            client.clone(),
        );
        Self::new(client, coordinator)
    }

    /// Observe the phase of the registration in flight. The channel tracks
    /// the most recent call to [`register_with_photos`](Self::register_with_photos).
    pub fn phase(&self) -> watch::Receiver<RegistrationPhase> {
        self.phase_tx.subscribe()
    }

    fn set_phase(&self, phase: RegistrationPhase) {
        // send_replace updates the value even when no receiver is subscribed.
        self.phase_tx.send_replace(phase);
    }

    /// Create the profile, then run every photo to a terminal outcome.
    ///
    /// Returns exactly one terminal event: either the creation error (no
    /// upload was attempted), or the new profile id together with its
    /// consolidated batch report.
    pub async fn register_with_photos(
        &self,
        profile: NewProfile,
        photos: Vec<AssetRef>,
    ) -> UploadResult<RegistrationReport> {
        self.set_phase(RegistrationPhase::CreatingProfile);
        info!(name = %profile.name, photos = photos.len(), "registering profile");

        let profile_id = match self.profiles.create_profile(&profile).await {
            Ok(id) => id,
            Err(e) => {
                warn!(name = %profile.name, error = %e, "profile creation failed");
                self.set_phase(RegistrationPhase::Failed);
                return Err(e);
            }
        };

        self.set_phase(RegistrationPhase::UploadingPhotos);
        let batch = self.coordinator.run_batch(profile_id, photos).await;

        info!(
            profile = %profile_id,
            succeeded = batch.succeeded,
            failed = batch.failed,
            "profile registered"
        );
        self.set_phase(RegistrationPhase::Done);

        Ok(RegistrationReport { profile_id, batch })
    }
}
