use crate::{
    errors::CrowdfundError,
    events,
    funding::FundingManager,
    ledger::DonationLedger,
    registry::{self, CampaignRegistry},
    types::{Campaign, CampaignState, DataKey, ExtensionProposal, ProposalOutcome, SECONDS_PER_DAY},
};
use soroban_sdk::{log, Address, Env};

/// ExtensionGovernance lets donors decide whether an active campaign's
/// deadline moves.
///
/// Proposal lifecycle: no proposal -> active -> resolved -> no proposal.
/// Only the latest proposal is stored; resolved ones stay readable through
/// `current` until the owner proposes again. Votes are weighted by the
/// voter's stake at the moment of voting.
pub struct ExtensionGovernance;

impl ExtensionGovernance {
    /// Latest proposal for a campaign, active or resolved.
    pub fn current(env: &Env, campaign_id: u32) -> Option<ExtensionProposal> {
        env.storage()
            .persistent()
            .get(&DataKey::Proposal(campaign_id))
    }

    pub fn is_active(env: &Env, campaign_id: u32) -> bool {
        Self::current(env, campaign_id).map_or(false, |proposal| proposal.active)
    }

    pub fn vote_end_time(env: &Env, campaign_id: u32) -> u64 {
        Self::current(env, campaign_id).map_or(0, |proposal| proposal.vote_end_time)
    }

    pub fn has_voted(env: &Env, campaign_id: u32, proposal_id: u32, voter: &Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Voted(campaign_id, proposal_id, voter.clone()))
    }

    /// Open a vote on extending the deadline by `days`.
    ///
    /// The voting window is not clipped to the campaign deadline. A vote that
    /// is still open when the deadline passes cannot be confirmed: the campaign
    /// settles on the deadline as usual and the proposal closes as `Expired`.
    /// Donations stay paused until then, so an owner proposing within one
    /// voting window of the deadline gives up the remaining donation time.
    ///
    /// # Returns
    /// * `Result<u32, CrowdfundError>` - The proposal ID, unique per campaign
    pub fn propose(
        env: &Env,
        campaign_id: u32,
        caller: &Address,
        days: u32,
    ) -> Result<u32, CrowdfundError> {
        let mut campaign = FundingManager::load_refreshed(env, campaign_id)?;

        if *caller != campaign.owner {
            return Err(CrowdfundError::NotOwner);
        }
        if campaign.state != CampaignState::Active {
            return Err(CrowdfundError::CampaignNotActive);
        }
        if Self::is_active(env, campaign_id) {
            return Err(CrowdfundError::ProposalInProgress);
        }
        if days == 0 {
            return Err(CrowdfundError::InvalidDays);
        }

        // At least half of the target must be raised before a vote may open
        let doubled = campaign
            .total_donated
            .checked_mul(2)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        if doubled < campaign.target {
            return Err(CrowdfundError::InsufficientFunding);
        }

        let vote_end_time = env
            .ledger()
            .timestamp()
            .checked_add(CampaignRegistry::voting_window(env)?)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        let proposal_id = campaign
            .proposal_count
            .checked_add(1)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;

        let proposal = ExtensionProposal {
            id: proposal_id,
            proposed_days: days,
            votes_for: 0,
            votes_against: 0,
            vote_end_time,
            active: true,
            outcome: ProposalOutcome::Pending,
        };
        Self::save(env, campaign_id, &proposal);

        campaign.proposal_count = proposal_id;
        CampaignRegistry::save(env, &campaign);

        events::extension_proposed(env, campaign_id, &proposal);

        Ok(proposal_id)
    }

    /// Record a stake-weighted vote on the active proposal.
    pub fn vote(
        env: &Env,
        campaign_id: u32,
        voter: &Address,
        in_favor: bool,
    ) -> Result<(), CrowdfundError> {
        // Settling the campaign first closes proposals it has outlived
        FundingManager::load_refreshed(env, campaign_id)?;

        let mut proposal = match Self::current(env, campaign_id) {
            Some(proposal) if proposal.active => proposal,
            _ => return Err(CrowdfundError::NoActiveProposal),
        };

        if env.ledger().timestamp() > proposal.vote_end_time {
            return Err(CrowdfundError::VotingPeriodEnded);
        }

        let weight = DonationLedger::stake(env, campaign_id, voter);
        if weight <= 0 {
            return Err(CrowdfundError::NonDonor);
        }
        if Self::has_voted(env, campaign_id, proposal.id, voter) {
            return Err(CrowdfundError::AlreadyVoted);
        }

        if in_favor {
            proposal.votes_for = proposal
                .votes_for
                .checked_add(weight)
                .ok_or(CrowdfundError::ArithmeticOverflow)?;
        } else {
            proposal.votes_against = proposal
                .votes_against
                .checked_add(weight)
                .ok_or(CrowdfundError::ArithmeticOverflow)?;
        }

        registry::persist(
            env,
            &DataKey::Voted(campaign_id, proposal.id, voter.clone()),
            &true,
        );
        Self::save(env, campaign_id, &proposal);

        log!(
            env,
            "campaign {} proposal {}: for {} against {}",
            campaign_id,
            proposal.id,
            proposal.votes_for,
            proposal.votes_against
        );
        events::vote_cast(env, campaign_id, proposal.id, voter, in_favor, weight);

        Ok(())
    }

    /// Resolve the active proposal once its window has closed.
    ///
    /// The deadline moves only when `votes_for` strictly exceeds
    /// `votes_against`. Either way the proposal is closed and donations resume.
    pub fn confirm(
        env: &Env,
        campaign_id: u32,
        caller: &Address,
    ) -> Result<ProposalOutcome, CrowdfundError> {
        let mut campaign = FundingManager::load_refreshed(env, campaign_id)?;

        if *caller != campaign.owner {
            return Err(CrowdfundError::NotOwner);
        }

        let mut proposal = match Self::current(env, campaign_id) {
            Some(proposal) if proposal.active => proposal,
            _ => return Err(CrowdfundError::NoActiveProposal),
        };

        if env.ledger().timestamp() <= proposal.vote_end_time {
            return Err(CrowdfundError::VotingStillOngoing);
        }

        if proposal.votes_for > proposal.votes_against {
            let extension = (proposal.proposed_days as u64)
                .checked_mul(SECONDS_PER_DAY)
                .ok_or(CrowdfundError::ArithmeticOverflow)?;
            campaign.deadline = campaign
                .deadline
                .checked_add(extension)
                .ok_or(CrowdfundError::ArithmeticOverflow)?;
            CampaignRegistry::save(env, &campaign);
            proposal.outcome = ProposalOutcome::Extended;
        } else {
            proposal.outcome = ProposalOutcome::Rejected;
        }
        proposal.active = false;
        Self::save(env, campaign_id, &proposal);

        events::extension_resolved(env, &campaign, &proposal);

        Ok(proposal.outcome)
    }

    /// Close an active proposal on a campaign that just became terminal.
    pub(crate) fn expire(env: &Env, campaign: &Campaign) {
        if let Some(mut proposal) = Self::current(env, campaign.id) {
            if proposal.active {
                proposal.active = false;
                proposal.outcome = ProposalOutcome::Expired;
                Self::save(env, campaign.id, &proposal);
                events::extension_resolved(env, campaign, &proposal);
            }
        }
    }

    fn save(env: &Env, campaign_id: u32, proposal: &ExtensionProposal) {
        registry::persist(env, &DataKey::Proposal(campaign_id), proposal);
    }
}
