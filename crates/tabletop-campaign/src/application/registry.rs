//! In-memory campaign registry.
//!
//! The domain types do no locking of their own. The registry wraps each
//! campaign in its own mutex, so callers on different threads serialize per
//! campaign while unrelated campaigns proceed independently. It also owns
//! the invite-code index and is where code collisions are resolved.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tabletop_core::config::TabletopConfig;
use tabletop_core::error::DomainError;
use tabletop_core::rng::DeterministicRng;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::campaign::Campaign;
use crate::domain::invite_code::InviteCode;
use crate::domain::scene::Scene;

/// A campaign behind its exclusive lock.
pub type SharedCampaign<C> = Arc<Mutex<Campaign<C>>>;

#[derive(Debug)]
struct RegistryIndex<C> {
    campaigns: HashMap<Uuid, SharedCampaign<C>>,
    invite_codes: HashMap<InviteCode, Uuid>,
}

/// Owns every live campaign.
#[derive(Debug)]
pub struct CampaignRegistry<C> {
    config: TabletopConfig,
    index: Mutex<RegistryIndex<C>>,
}

impl<C> CampaignRegistry<C> {
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Returns the error from [`TabletopConfig::validate`] if the
    /// configuration is unusable.
    pub fn new(config: TabletopConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self {
            config,
            index: Mutex::new(RegistryIndex {
                campaigns: HashMap::new(),
                invite_codes: HashMap::new(),
            }),
        })
    }

    /// The configuration the registry was built with.
    #[must_use]
    pub fn config(&self) -> &TabletopConfig {
        &self.config
    }

    /// Registers a campaign, redrawing its invite code until it is unique.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a campaign with the same id is
    /// already registered, and `DomainError::InviteCodeExhausted` if no
    /// unique code was found within `invite_code_attempts` draws.
    pub fn insert(
        &self,
        mut campaign: Campaign<C>,
        rng: &mut dyn DeterministicRng,
    ) -> Result<SharedCampaign<C>, DomainError> {
        let mut index = self.lock_index()?;
        if index.campaigns.contains_key(&campaign.id) {
            return Err(DomainError::Validation(format!(
                "campaign {} is already registered",
                campaign.id
            )));
        }

        let mut attempts = 1;
        while index.invite_codes.contains_key(campaign.invite_code()) {
            if attempts >= self.config.invite_code_attempts {
                warn!(campaign_id = %campaign.id, attempts, "invite codes exhausted");
                return Err(DomainError::InviteCodeExhausted { attempts });
            }
            debug!(campaign_id = %campaign.id, code = %campaign.invite_code(), "invite code collision");
            campaign.regenerate_invite_code(rng);
            attempts += 1;
        }

        let id = campaign.id;
        index.invite_codes.insert(campaign.invite_code().clone(), id);
        let shared = Arc::new(Mutex::new(campaign));
        index.campaigns.insert(id, Arc::clone(&shared));
        Ok(shared)
    }

    /// The campaign with the given id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CampaignNotFound` if no such campaign exists.
    pub fn get(&self, campaign_id: Uuid) -> Result<SharedCampaign<C>, DomainError> {
        self.lock_index()?
            .campaigns
            .get(&campaign_id)
            .cloned()
            .ok_or(DomainError::CampaignNotFound(campaign_id))
    }

    /// The campaign players join with `code`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InviteCodeNotFound` if no campaign uses the code.
    pub fn find_by_invite_code(&self, code: &InviteCode) -> Result<SharedCampaign<C>, DomainError> {
        let index = self.lock_index()?;
        index
            .invite_codes
            .get(code)
            .and_then(|id| index.campaigns.get(id))
            .cloned()
            .ok_or_else(|| DomainError::InviteCodeNotFound(code.to_string()))
    }

    /// Runs `f` with exclusive access to a campaign.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CampaignNotFound` for an unknown id and
    /// `DomainError::Infrastructure` if the campaign's lock is poisoned.
    pub fn with_campaign<R>(
        &self,
        campaign_id: Uuid,
        f: impl FnOnce(&mut Campaign<C>) -> R,
    ) -> Result<R, DomainError> {
        let shared = self.get(campaign_id)?;
        let mut campaign = lock_campaign(&shared, campaign_id)?;
        Ok(f(&mut campaign))
    }

    /// Runs `f` with read access to a campaign.
    ///
    /// # Errors
    ///
    /// Same as [`CampaignRegistry::with_campaign`].
    pub fn read_campaign<R>(
        &self,
        campaign_id: Uuid,
        f: impl FnOnce(&Campaign<C>) -> R,
    ) -> Result<R, DomainError> {
        let shared = self.get(campaign_id)?;
        let campaign = lock_campaign(&shared, campaign_id)?;
        Ok(f(&campaign))
    }

    /// Runs `f` with exclusive access to one scene of a campaign.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SceneNotFound` if the campaign has no such
    /// scene, plus everything [`CampaignRegistry::with_campaign`] returns.
    pub fn with_scene<R>(
        &self,
        campaign_id: Uuid,
        scene_id: Uuid,
        f: impl FnOnce(&mut Scene) -> R,
    ) -> Result<R, DomainError> {
        self.with_campaign(campaign_id, |campaign| {
            campaign
                .scene_mut(scene_id)
                .map(f)
                .ok_or(DomainError::SceneNotFound(scene_id))
        })?
    }

    /// Number of registered campaigns.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.lock_index()?.campaigns.len())
    }

    /// Whether no campaign is registered.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }

    fn lock_index(&self) -> Result<MutexGuard<'_, RegistryIndex<C>>, DomainError> {
        self.index
            .lock()
            .map_err(|_| DomainError::Infrastructure("campaign registry lock poisoned".into()))
    }
}

fn lock_campaign<C>(
    shared: &SharedCampaign<C>,
    campaign_id: Uuid,
) -> Result<MutexGuard<'_, Campaign<C>>, DomainError> {
    shared
        .lock()
        .map_err(|_| DomainError::Infrastructure(format!("campaign {campaign_id} lock poisoned")))
}
