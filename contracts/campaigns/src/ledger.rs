use crate::{
    errors::CrowdfundError,
    registry,
    types::{DataKey, DonorStake, MAX_DONOR_PAGE},
};
use core::ops::Range;
use soroban_sdk::{Address, Env, Vec};

/// DonationLedger tracks each donor's current stake in a campaign and the
/// order in which donors first appeared. Donors are stored one entry per
/// index so that listing them only ever touches one page of storage.
///
/// A stake entry is never removed: a refunded donor keeps a zero entry, which
/// is how `has_donated` and `has_refunded` tell the two cases apart.
pub struct DonationLedger;

impl DonationLedger {
    pub fn stake(env: &Env, campaign_id: u32, donor: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Donation(campaign_id, donor.clone()))
            .unwrap_or(0)
    }

    pub fn has_donated(env: &Env, campaign_id: u32, donor: &Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Donation(campaign_id, donor.clone()))
    }

    pub fn has_refunded(env: &Env, campaign_id: u32, donor: &Address) -> bool {
        Self::has_donated(env, campaign_id, donor) && Self::stake(env, campaign_id, donor) == 0
    }

    /// Add `amount` to the donor's stake, registering first-time donors.
    pub fn credit(
        env: &Env,
        campaign_id: u32,
        donor: &Address,
        amount: i128,
    ) -> Result<i128, CrowdfundError> {
        let key = DataKey::Donation(campaign_id, donor.clone());
        let previous: Option<i128> = env.storage().persistent().get(&key);

        if previous.is_none() {
            let index = Self::donor_count(env, campaign_id);
            let count = index
                .checked_add(1)
                .ok_or(CrowdfundError::ArithmeticOverflow)?;
            registry::persist(env, &DataKey::DonorAt(campaign_id, index), donor);
            registry::persist(env, &DataKey::DonorCount(campaign_id), &count);
        }

        let stake = previous
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        registry::persist(env, &key, &stake);

        Ok(stake)
    }

    /// Zero the donor's stake and return what it was.
    pub fn clear(env: &Env, campaign_id: u32, donor: &Address) -> i128 {
        let stake = Self::stake(env, campaign_id, donor);
        registry::persist(env, &DataKey::Donation(campaign_id, donor.clone()), &0i128);
        stake
    }

    pub fn donor_count(env: &Env, campaign_id: u32) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::DonorCount(campaign_id))
            .unwrap_or(0)
    }

    pub fn donor_at(env: &Env, campaign_id: u32, index: u32) -> Option<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::DonorAt(campaign_id, index))
    }

    /// A bounded page of donors in first-donation order, refunded ones included.
    pub fn page(env: &Env, campaign_id: u32, start: u32, limit: u32) -> Vec<Address> {
        let mut page = Vec::new(env);
        for index in Self::window(env, campaign_id, start, limit) {
            if let Some(donor) = Self::donor_at(env, campaign_id, index) {
                page.push_back(donor);
            }
        }
        page
    }

    /// Donors in the same index window as `page` that still have funds at
    /// stake, with their amounts. Refunded donors are skipped, so a page may
    /// come back shorter than `limit` even when more donors follow.
    pub fn active_donors(
        env: &Env,
        campaign_id: u32,
        start: u32,
        limit: u32,
    ) -> Vec<DonorStake> {
        let mut active = Vec::new(env);
        for index in Self::window(env, campaign_id, start, limit) {
            if let Some(donor) = Self::donor_at(env, campaign_id, index) {
                let amount = Self::stake(env, campaign_id, &donor);
                if amount > 0 {
                    active.push_back(DonorStake { donor, amount });
                }
            }
        }
        active
    }

    fn window(env: &Env, campaign_id: u32, start: u32, limit: u32) -> Range<u32> {
        let end = start
            .saturating_add(limit.min(MAX_DONOR_PAGE))
            .min(Self::donor_count(env, campaign_id));
        start..end.max(start)
    }
}
