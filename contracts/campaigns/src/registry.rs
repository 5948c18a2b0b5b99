use crate::{
    errors::CrowdfundError,
    events,
    types::{
        Campaign, CampaignState, DataKey, DEFAULT_VOTING_WINDOW, INSTANCE_BUMP_AMOUNT,
        INSTANCE_LIFETIME_THRESHOLD, MAX_DESCRIPTION_LEN, MAX_IMAGE_LEN, MAX_NAME_LEN,
        PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD,
    },
};
use soroban_sdk::{Address, Env, IntoVal, String, Val, Vec};

/// Write a persistent entry and push its expiry out.
pub(crate) fn persist<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    let storage = env.storage().persistent();
    storage.set(key, value);
    storage.extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// CampaignRegistry owns contract configuration and the campaign index.
/// Campaign records are created here and looked up by every other module.
pub struct CampaignRegistry;

impl CampaignRegistry {
    /// Store the admin, the settlement token and the extension voting window.
    pub fn init(
        env: &Env,
        admin: &Address,
        token: &Address,
        voting_window: Option<u64>,
    ) -> Result<(), CrowdfundError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(CrowdfundError::AlreadyInitialized);
        }

        let voting_window = voting_window.unwrap_or(DEFAULT_VOTING_WINDOW);
        if voting_window == 0 {
            return Err(CrowdfundError::InvalidParameters);
        }

        env.storage().instance().set(&DataKey::Admin, admin);
        env.storage().instance().set(&DataKey::Token, token);
        env.storage()
            .instance()
            .set(&DataKey::VotingWindow, &voting_window);
        env.storage().instance().set(&DataKey::CampaignCount, &0u32);
        bump_instance(env);

        Ok(())
    }

    pub fn admin(env: &Env) -> Result<Address, CrowdfundError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(CrowdfundError::NotInitialized)
    }

    pub fn token(env: &Env) -> Result<Address, CrowdfundError> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(CrowdfundError::NotInitialized)
    }

    pub fn voting_window(env: &Env) -> Result<u64, CrowdfundError> {
        env.storage()
            .instance()
            .get(&DataKey::VotingWindow)
            .ok_or(CrowdfundError::NotInitialized)
    }

    /// Create a campaign in the `Active` state and index it under its creator.
    ///
    /// # Returns
    /// * `Result<u32, CrowdfundError>` - The new campaign ID, or
    ///   `InvalidParameters` when target, deadline or metadata are rejected
    pub fn create_campaign(
        env: &Env,
        creator: &Address,
        name: String,
        description: String,
        target: i128,
        deadline: u64,
        image: String,
    ) -> Result<u32, CrowdfundError> {
        // Registry must be configured before anything can be funded
        Self::token(env)?;

        let now = env.ledger().timestamp();
        if target <= 0 || deadline <= now {
            return Err(CrowdfundError::InvalidParameters);
        }
        if name.len() == 0 || name.len() > MAX_NAME_LEN {
            return Err(CrowdfundError::InvalidParameters);
        }
        if description.len() > MAX_DESCRIPTION_LEN || image.len() > MAX_IMAGE_LEN {
            return Err(CrowdfundError::InvalidParameters);
        }

        let campaign_id = Self::next_campaign_id(env)?;
        let campaign = Campaign {
            id: campaign_id,
            owner: creator.clone(),
            name,
            description,
            image,
            target,
            deadline,
            total_donated: 0,
            balance: 0,
            state: CampaignState::Active,
            created_at: now,
            proposal_count: 0,
        };
        Self::save(env, &campaign);

        let owner_key = DataKey::OwnerCampaigns(creator.clone());
        let mut owned: Vec<u32> = env
            .storage()
            .persistent()
            .get(&owner_key)
            .unwrap_or_else(|| Vec::new(env));
        owned.push_back(campaign_id);
        persist(env, &owner_key, &owned);

        events::campaign_created(env, &campaign);

        Ok(campaign_id)
    }

    pub fn campaign_count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::CampaignCount)
            .unwrap_or(0)
    }

    /// IDs are handed out sequentially from 1, so creation order is ID order.
    pub fn all_campaigns(env: &Env) -> Vec<u32> {
        let mut ids = Vec::new(env);
        for id in 1..=Self::campaign_count(env) {
            ids.push_back(id);
        }
        ids
    }

    pub fn campaigns_by_owner(env: &Env, owner: &Address) -> Vec<u32> {
        env.storage()
            .persistent()
            .get(&DataKey::OwnerCampaigns(owner.clone()))
            .unwrap_or_else(|| Vec::new(env))
    }

    /// Raw stored record. Callers that act on `state` go through
    /// `FundingManager::load_refreshed` instead.
    pub fn load(env: &Env, campaign_id: u32) -> Result<Campaign, CrowdfundError> {
        env.storage()
            .persistent()
            .get(&DataKey::Campaign(campaign_id))
            .ok_or(CrowdfundError::CampaignNotFound)
    }

    /// Every state-changing operation ends here, so this also keeps the
    /// contract instance alive.
    pub fn save(env: &Env, campaign: &Campaign) {
        persist(env, &DataKey::Campaign(campaign.id), campaign);
        bump_instance(env);
    }

    fn next_campaign_id(env: &Env) -> Result<u32, CrowdfundError> {
        let campaign_id = Self::campaign_count(env)
            .checked_add(1)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        env.storage()
            .instance()
            .set(&DataKey::CampaignCount, &campaign_id);
        Ok(campaign_id)
    }
}
