use crate::{errors::CrowdfundError, registry::CampaignRegistry};
use soroban_sdk::{token, Address, Env};

// Pull a donation from the donor into the contract
pub fn collect(env: &Env, from: &Address, amount: i128) -> Result<(), CrowdfundError> {
    let token = CampaignRegistry::token(env)?;
    token::Client::new(env, &token).transfer(from, &env.current_contract_address(), &amount);
    Ok(())
}

// Pay out held funds (refund or withdrawal)
pub fn release(env: &Env, to: &Address, amount: i128) -> Result<(), CrowdfundError> {
    let token = CampaignRegistry::token(env)?;
    token::Client::new(env, &token).transfer(&env.current_contract_address(), to, &amount);
    Ok(())
}
