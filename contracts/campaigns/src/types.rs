use soroban_sdk::{contracttype, Address, String, Vec};

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const DEFAULT_VOTING_WINDOW: u64 = 3 * SECONDS_PER_DAY;

pub const MAX_NAME_LEN: u32 = 100;
pub const MAX_DESCRIPTION_LEN: u32 = 1_000;
pub const MAX_IMAGE_LEN: u32 = 512;

/// Upper bound on a single `get_donors` or `get_active_donors` page.
pub const MAX_DONOR_PAGE: u32 = 100;

pub const CONTRACT_VERSION: u32 = 1;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

// Campaign records, stakes and votes
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Storage keys for contract data
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,                    // Contract administrator
    Token,                    // Settlement token (SAC address)
    VotingWindow,             // Extension voting window in seconds
    CampaignCount,            // Counter for campaign IDs
    Campaign(u32),            // Campaign ID -> Campaign
    OwnerCampaigns(Address),  // Owner -> Vec<campaign ID>
    Donation(u32, Address),   // (Campaign ID, donor) -> current stake
    DonorCount(u32),          // Campaign ID -> number of distinct donors
    DonorAt(u32, u32),        // (Campaign ID, index) -> donor, first-donation order
    Proposal(u32),            // Campaign ID -> latest ExtensionProposal
    Voted(u32, u32, Address), // (Campaign ID, proposal ID, voter) -> bool
}

/// Funding state of a campaign. The numeric encoding is part of the
/// client interface and must not change.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CampaignState {
    Active = 0,
    Success = 1,
    Fail = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub id: u32,
    pub owner: Address,
    pub name: String,
    pub description: String,
    pub image: String,
    pub target: i128,        // In token units (stroops)
    pub deadline: u64,       // Ledger timestamp
    pub total_donated: i128, // Never decreases, refunds included
    pub balance: i128,       // Funds currently held for this campaign
    pub state: CampaignState,
    pub created_at: u64,
    pub proposal_count: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalOutcome {
    Pending,  // Voting open or awaiting confirmation
    Extended, // Confirmed with more weight for than against
    Rejected, // Confirmed without a majority
    Expired,  // Campaign reached a terminal state first
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionProposal {
    pub id: u32,
    pub proposed_days: u32,
    pub votes_for: i128,
    pub votes_against: i128,
    pub vote_end_time: u64,
    pub active: bool,
    pub outcome: ProposalOutcome,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonorStake {
    pub donor: Address,
    pub amount: i128,
}

/// Everything a campaign detail page needs in one read.
///
/// `proposal` holds the latest proposal, or nothing if the owner never
/// proposed one.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignSummary {
    pub campaign: Campaign,
    pub donor_count: u32,
    pub proposal: Vec<ExtensionProposal>,
}
