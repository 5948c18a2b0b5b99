#![no_std]
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};

mod distribution;
mod errors;
mod events;
mod funding;
mod governance;
mod ledger;
mod registry;
mod types;


pub use errors::CrowdfundError;
pub use types::*;

use funding::FundingManager;
use governance::ExtensionGovernance;
use ledger::DonationLedger;
use registry::CampaignRegistry;

#[contract]
pub struct CrowdfundContract;

#[contractimpl]
impl CrowdfundContract {
    // Setup and administration

    /// Initialize the contract with an admin, the settlement token and an
    /// optional extension voting window in seconds (3 days by default).
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        voting_window: Option<u64>,
    ) -> Result<(), CrowdfundError> {
        admin.require_auth();
        CampaignRegistry::init(&env, &admin, &token, voting_window)?;
        events::initialized(&env, &admin, &token);
        Ok(())
    }

    pub fn version() -> u32 {
        CONTRACT_VERSION
    }

    /// Upgrades the contract with new WASM code
    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), CrowdfundError> {
        let admin = CampaignRegistry::admin(&env)?;
        admin.require_auth();

        env.deployer()
            .update_current_contract_wasm(new_wasm_hash.clone());
        events::upgraded(&env, &admin, &new_wasm_hash);

        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, CrowdfundError> {
        CampaignRegistry::admin(&env)
    }

    pub fn get_token(env: Env) -> Result<Address, CrowdfundError> {
        CampaignRegistry::token(&env)
    }

    pub fn get_voting_window(env: Env) -> Result<u64, CrowdfundError> {
        CampaignRegistry::voting_window(&env)
    }

    // Registry

    pub fn create_campaign(
        env: Env,
        creator: Address,
        name: String,
        description: String,
        target: i128,
        deadline: u64,
        image: String,
    ) -> Result<u32, CrowdfundError> {
        creator.require_auth();
        CampaignRegistry::create_campaign(
            &env,
            &creator,
            name,
            description,
            target,
            deadline,
            image,
        )
    }

    pub fn get_all_campaigns(env: Env) -> Vec<u32> {
        CampaignRegistry::all_campaigns(&env)
    }

    pub fn get_campaigns_by_owner(env: Env, owner: Address) -> Vec<u32> {
        CampaignRegistry::campaigns_by_owner(&env, &owner)
    }

    pub fn campaign_count(env: Env) -> u32 {
        CampaignRegistry::campaign_count(&env)
    }

    /// Full campaign record with any pending deadline transition applied.
    pub fn get_campaign(env: Env, campaign_id: u32) -> Result<Campaign, CrowdfundError> {
        FundingManager::load_refreshed(&env, campaign_id)
    }

    pub fn get_campaign_summary(
        env: Env,
        campaign_id: u32,
    ) -> Result<CampaignSummary, CrowdfundError> {
        let campaign = FundingManager::load_refreshed(&env, campaign_id)?;
        let mut proposal = Vec::new(&env);
        if let Some(current) = ExtensionGovernance::current(&env, campaign_id) {
            proposal.push_back(current);
        }
        Ok(CampaignSummary {
            campaign,
            donor_count: DonationLedger::donor_count(&env, campaign_id),
            proposal,
        })
    }

    // Campaign metadata

    pub fn campaign_name(env: Env, campaign_id: u32) -> Result<String, CrowdfundError> {
        Ok(CampaignRegistry::load(&env, campaign_id)?.name)
    }

    pub fn description(env: Env, campaign_id: u32) -> Result<String, CrowdfundError> {
        Ok(CampaignRegistry::load(&env, campaign_id)?.description)
    }

    pub fn image(env: Env, campaign_id: u32) -> Result<String, CrowdfundError> {
        Ok(CampaignRegistry::load(&env, campaign_id)?.image)
    }

    pub fn target(env: Env, campaign_id: u32) -> Result<i128, CrowdfundError> {
        Ok(CampaignRegistry::load(&env, campaign_id)?.target)
    }

    pub fn deadline(env: Env, campaign_id: u32) -> Result<u64, CrowdfundError> {
        Ok(CampaignRegistry::load(&env, campaign_id)?.deadline)
    }

    pub fn owner(env: Env, campaign_id: u32) -> Result<Address, CrowdfundError> {
        Ok(CampaignRegistry::load(&env, campaign_id)?.owner)
    }

    // Funding

    pub fn get_contract_balance(env: Env, campaign_id: u32) -> Result<i128, CrowdfundError> {
        Ok(CampaignRegistry::load(&env, campaign_id)?.balance)
    }

    pub fn total_donations(env: Env, campaign_id: u32) -> Result<i128, CrowdfundError> {
        Ok(CampaignRegistry::load(&env, campaign_id)?.total_donated)
    }

    /// Current state, latching `Fail` if the deadline has passed short of target.
    pub fn get_state(env: Env, campaign_id: u32) -> Result<CampaignState, CrowdfundError> {
        FundingManager::state(&env, campaign_id)
    }

    pub fn donate(
        env: Env,
        campaign_id: u32,
        donor: Address,
        amount: i128,
    ) -> Result<CampaignState, CrowdfundError> {
        donor.require_auth();
        FundingManager::donate(&env, campaign_id, &donor, amount)
    }

    pub fn refund(env: Env, campaign_id: u32, donor: Address) -> Result<i128, CrowdfundError> {
        donor.require_auth();
        FundingManager::refund(&env, campaign_id, &donor)
    }

    pub fn withdraw(env: Env, campaign_id: u32, caller: Address) -> Result<i128, CrowdfundError> {
        caller.require_auth();
        FundingManager::withdraw(&env, campaign_id, &caller)
    }

    // Donation ledger

    pub fn has_donated(env: Env, campaign_id: u32, donor: Address) -> bool {
        DonationLedger::has_donated(&env, campaign_id, &donor)
    }

    pub fn has_refunded(env: Env, campaign_id: u32, donor: Address) -> bool {
        DonationLedger::has_refunded(&env, campaign_id, &donor)
    }

    pub fn donation_amount(env: Env, campaign_id: u32, donor: Address) -> i128 {
        DonationLedger::stake(&env, campaign_id, &donor)
    }

    pub fn donor_at(env: Env, campaign_id: u32, index: u32) -> Option<Address> {
        DonationLedger::donor_at(&env, campaign_id, index)
    }

    pub fn donor_count(env: Env, campaign_id: u32) -> u32 {
        DonationLedger::donor_count(&env, campaign_id)
    }

    pub fn get_donors(env: Env, campaign_id: u32, start: u32, limit: u32) -> Vec<Address> {
        DonationLedger::page(&env, campaign_id, start, limit)
    }

    /// Donors with funds still at stake among indexes `start..start + limit`.
    pub fn get_active_donors(
        env: Env,
        campaign_id: u32,
        start: u32,
        limit: u32,
    ) -> Vec<DonorStake> {
        DonationLedger::active_donors(&env, campaign_id, start, limit)
    }

    // Deadline extension governance

    pub fn propose_deadline_extension(
        env: Env,
        campaign_id: u32,
        caller: Address,
        days: u32,
    ) -> Result<u32, CrowdfundError> {
        caller.require_auth();
        ExtensionGovernance::propose(&env, campaign_id, &caller, days)
    }

    pub fn vote_on_deadline_extension(
        env: Env,
        campaign_id: u32,
        voter: Address,
        in_favor: bool,
    ) -> Result<(), CrowdfundError> {
        voter.require_auth();
        ExtensionGovernance::vote(&env, campaign_id, &voter, in_favor)
    }

    pub fn confirm_deadline_extension(
        env: Env,
        campaign_id: u32,
        caller: Address,
    ) -> Result<ProposalOutcome, CrowdfundError> {
        caller.require_auth();
        ExtensionGovernance::confirm(&env, campaign_id, &caller)
    }

    pub fn cur_proposal(env: Env, campaign_id: u32) -> Option<ExtensionProposal> {
        ExtensionGovernance::current(&env, campaign_id)
    }

    pub fn vote_end_time(env: Env, campaign_id: u32) -> u64 {
        ExtensionGovernance::vote_end_time(&env, campaign_id)
    }

    pub fn has_voted(env: Env, campaign_id: u32, proposal_id: u32, voter: Address) -> bool {
        ExtensionGovernance::has_voted(&env, campaign_id, proposal_id, &voter)
    }
}
