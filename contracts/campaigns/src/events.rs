use crate::types::{Campaign, CampaignState, ExtensionProposal, ProposalOutcome};
use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

// Topic shared by every campaign event.
pub const CAMPAIGN: Symbol = symbol_short!("CAMPAIGN");

pub const CREATED: Symbol = symbol_short!("created");
pub const DONATION: Symbol = symbol_short!("donation");
pub const STATE: Symbol = symbol_short!("state");
pub const REFUND: Symbol = symbol_short!("refund");
pub const WITHDRAW: Symbol = symbol_short!("withdraw");
pub const PROPOSED: Symbol = symbol_short!("proposed");
pub const VOTED: Symbol = symbol_short!("voted");
pub const RESOLVED: Symbol = symbol_short!("resolved");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u32,
    pub owner: Address,
    pub target: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationReceived {
    pub campaign_id: u32,
    pub donor: Address,
    pub amount: i128,
    pub total_donated: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateChanged {
    pub campaign_id: u32,
    pub state: CampaignState,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsReleased {
    pub campaign_id: u32,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionProposed {
    pub campaign_id: u32,
    pub proposal_id: u32,
    pub proposed_days: u32,
    pub vote_end_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCast {
    pub campaign_id: u32,
    pub proposal_id: u32,
    pub voter: Address,
    pub in_favor: bool,
    pub weight: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionResolved {
    pub campaign_id: u32,
    pub proposal_id: u32,
    pub outcome: ProposalOutcome,
    pub deadline: u64,
}

pub fn initialized(env: &Env, admin: &Address, token: &Address) {
    env.events()
        .publish((symbol_short!("init"),), (admin.clone(), token.clone()));
}

pub fn upgraded(env: &Env, admin: &Address, new_wasm_hash: &BytesN<32>) {
    env.events().publish(
        (symbol_short!("upgrade"),),
        (admin.clone(), new_wasm_hash.clone()),
    );
}

pub fn campaign_created(env: &Env, campaign: &Campaign) {
    env.events().publish(
        (CAMPAIGN, CREATED, campaign.owner.clone()),
        CampaignCreated {
            campaign_id: campaign.id,
            owner: campaign.owner.clone(),
            target: campaign.target,
            deadline: campaign.deadline,
        },
    );
}

pub fn donation_received(env: &Env, campaign: &Campaign, donor: &Address, amount: i128) {
    env.events().publish(
        (CAMPAIGN, DONATION, campaign.id),
        DonationReceived {
            campaign_id: campaign.id,
            donor: donor.clone(),
            amount,
            total_donated: campaign.total_donated,
        },
    );
}

pub fn state_changed(env: &Env, campaign: &Campaign) {
    env.events().publish(
        (CAMPAIGN, STATE, campaign.id),
        StateChanged {
            campaign_id: campaign.id,
            state: campaign.state,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn refunded(env: &Env, campaign_id: u32, donor: &Address, amount: i128) {
    env.events().publish(
        (CAMPAIGN, REFUND, campaign_id),
        FundsReleased {
            campaign_id,
            recipient: donor.clone(),
            amount,
        },
    );
}

pub fn withdrawn(env: &Env, campaign_id: u32, owner: &Address, amount: i128) {
    env.events().publish(
        (CAMPAIGN, WITHDRAW, campaign_id),
        FundsReleased {
            campaign_id,
            recipient: owner.clone(),
            amount,
        },
    );
}

pub fn extension_proposed(env: &Env, campaign_id: u32, proposal: &ExtensionProposal) {
    env.events().publish(
        (CAMPAIGN, PROPOSED, campaign_id),
        ExtensionProposed {
            campaign_id,
            proposal_id: proposal.id,
            proposed_days: proposal.proposed_days,
            vote_end_time: proposal.vote_end_time,
        },
    );
}

pub fn vote_cast(
    env: &Env,
    campaign_id: u32,
    proposal_id: u32,
    voter: &Address,
    in_favor: bool,
    weight: i128,
) {
    env.events().publish(
        (CAMPAIGN, VOTED, campaign_id),
        VoteCast {
            campaign_id,
            proposal_id,
            voter: voter.clone(),
            in_favor,
            weight,
        },
    );
}

pub fn extension_resolved(env: &Env, campaign: &Campaign, proposal: &ExtensionProposal) {
    env.events().publish(
        (CAMPAIGN, RESOLVED, campaign.id),
        ExtensionResolved {
            campaign_id: campaign.id,
            proposal_id: proposal.id,
            outcome: proposal.outcome,
            deadline: campaign.deadline,
        },
    );
}
