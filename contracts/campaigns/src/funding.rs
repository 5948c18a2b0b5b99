use crate::{
    distribution,
    errors::CrowdfundError,
    events,
    governance::ExtensionGovernance,
    ledger::DonationLedger,
    registry::CampaignRegistry,
    types::{Campaign, CampaignState},
};
use soroban_sdk::{log, Address, Env};

/// FundingManager runs the campaign state machine:
/// `Active -> Success` once the target is met, `Active -> Fail` once the
/// deadline passes short of it. Both are terminal.
///
/// There is no scheduler. Every entry point that reads or mutates a campaign
/// first calls `refresh`, so an expired deadline is latched by whichever call
/// arrives first.
pub struct FundingManager;

impl FundingManager {
    /// Apply the lazy transition rule to an in-memory campaign.
    ///
    /// Returns `true` when the state changed; the caller persists the record.
    pub fn refresh(env: &Env, campaign: &mut Campaign) -> bool {
        if campaign.state != CampaignState::Active {
            return false;
        }

        let now = env.ledger().timestamp();
        if campaign.total_donated >= campaign.target {
            campaign.state = CampaignState::Success;
        } else if now > campaign.deadline {
            campaign.state = CampaignState::Fail;
        } else {
            return false;
        }

        log!(
            env,
            "campaign {} settled at {}: donated {} of {}",
            campaign.id,
            now,
            campaign.total_donated,
            campaign.target
        );

        // A vote can no longer change anything for a terminal campaign
        ExtensionGovernance::expire(env, campaign);
        events::state_changed(env, campaign);
        true
    }

    /// Load a campaign with the lazy transition applied and persisted.
    pub fn load_refreshed(env: &Env, campaign_id: u32) -> Result<Campaign, CrowdfundError> {
        let mut campaign = CampaignRegistry::load(env, campaign_id)?;
        if Self::refresh(env, &mut campaign) {
            CampaignRegistry::save(env, &campaign);
        }
        Ok(campaign)
    }

    pub fn state(env: &Env, campaign_id: u32) -> Result<CampaignState, CrowdfundError> {
        Ok(Self::load_refreshed(env, campaign_id)?.state)
    }

    /// Accept a donation while the campaign is active and no vote is running.
    pub fn donate(
        env: &Env,
        campaign_id: u32,
        donor: &Address,
        amount: i128,
    ) -> Result<CampaignState, CrowdfundError> {
        let mut campaign = Self::load_refreshed(env, campaign_id)?;

        if campaign.state != CampaignState::Active {
            return Err(CrowdfundError::CampaignNotActive);
        }
        if ExtensionGovernance::is_active(env, campaign_id) {
            return Err(CrowdfundError::ProposalInProgress);
        }
        if amount <= 0 {
            return Err(CrowdfundError::InvalidAmount);
        }

        distribution::collect(env, donor, amount)?;

        DonationLedger::credit(env, campaign_id, donor, amount)?;
        campaign.total_donated = campaign
            .total_donated
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        campaign.balance = campaign
            .balance
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;

        events::donation_received(env, &campaign, donor, amount);

        // Reaching the target settles the campaign on this very call
        Self::refresh(env, &mut campaign);
        CampaignRegistry::save(env, &campaign);

        Ok(campaign.state)
    }

    /// Return a donor's full stake from a failed campaign.
    pub fn refund(env: &Env, campaign_id: u32, donor: &Address) -> Result<i128, CrowdfundError> {
        let mut campaign = Self::load_refreshed(env, campaign_id)?;

        if campaign.state != CampaignState::Fail {
            return Err(CrowdfundError::CampaignNotFailed);
        }
        if DonationLedger::stake(env, campaign_id, donor) <= 0 {
            return Err(CrowdfundError::NoDonationFound);
        }

        let amount = DonationLedger::clear(env, campaign_id, donor);
        campaign.balance = campaign
            .balance
            .checked_sub(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        CampaignRegistry::save(env, &campaign);

        distribution::release(env, donor, amount)?;
        events::refunded(env, campaign_id, donor, amount);

        Ok(amount)
    }

    /// Pay the whole balance of a successful campaign to its owner.
    pub fn withdraw(env: &Env, campaign_id: u32, caller: &Address) -> Result<i128, CrowdfundError> {
        let mut campaign = Self::load_refreshed(env, campaign_id)?;

        if *caller != campaign.owner {
            return Err(CrowdfundError::NotOwner);
        }
        if campaign.state != CampaignState::Success {
            return Err(CrowdfundError::CampaignNotSuccessful);
        }
        if campaign.balance <= 0 {
            return Err(CrowdfundError::NoFundsAvailable);
        }

        let amount = campaign.balance;
        campaign.balance = 0;
        CampaignRegistry::save(env, &campaign);

        distribution::release(env, caller, amount)?;
        events::withdrawn(env, campaign_id, caller, amount);

        Ok(amount)
    }
}
