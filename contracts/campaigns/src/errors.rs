use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdfundError {
    // Setup
    NotInitialized = 1,
    AlreadyInitialized = 2,
    ArithmeticOverflow = 3,
    // Registry
    InvalidParameters = 101,
    CampaignNotFound = 102,
    NotOwner = 103,
    // Funding
    CampaignNotActive = 201,
    CampaignNotFailed = 202,
    CampaignNotSuccessful = 203,
    InvalidAmount = 204,
    NoDonationFound = 205,
    NoFundsAvailable = 206,
    // Extension governance
    ProposalInProgress = 301,
    NoActiveProposal = 302,
    VotingPeriodEnded = 303,
    VotingStillOngoing = 304,
    NonDonor = 305,
    AlreadyVoted = 306,
    InvalidDays = 307,
    InsufficientFunding = 308,
}
