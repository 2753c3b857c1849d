use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::storage_types::*;

fn token_client(env: &Env) -> token::TokenClient<'_> {
    let token_address: Address = env
        .storage()
        .instance()
        .get(&DataKey::Token)
        .unwrap_or_else(|| panic_with_error!(env, CampaignError::NotInitialized));
    token::TokenClient::new(env, &token_address)
}

/// Pull a contribution from the contributor into the campaign
pub fn collect_contribution(env: &Env, contributor: &Address, amount: i128) {
    token_client(env).transfer(contributor, &env.current_contract_address(), &amount);
}

/// Pay a finalized request out to its recipient
pub fn release_to_recipient(env: &Env, request: &Request) {
    token_client(env).transfer(&env.current_contract_address(), &request.recipient, &request.value);
}

/// Tokens currently held by the campaign
pub fn campaign_balance(env: &Env) -> i128 {
    token_client(env).balance(&env.current_contract_address())
}

/// Strict majority of the approver set
pub fn has_majority(approval_count: u32, approvers_count: u32) -> bool {
    approval_count as u64 * 2 > approvers_count as u64
}
