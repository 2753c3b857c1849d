#![no_std]

mod campaign_client;
mod events;
mod storage;

#[cfg(test)]
mod test;

use core::ops::Range;

use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, BytesN, Env, Vec};

pub use storage::FactoryError;
use storage::*;

#[contract]
pub struct CampaignFactory;

#[contractimpl]
impl CampaignFactory {
    /// Initialize the factory with its admin, the contribution token handed to every
    /// campaign, and the hash of the uploaded campaign wasm.
    pub fn initialize(env: Env, admin: Address, token: Address, campaign_wasm_hash: BytesN<32>) {
        if env.storage().instance().has(&DataKey::Admin) {
            panic_with_error!(&env, FactoryError::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::CampaignWasmHash, &campaign_wasm_hash);
        env.storage().instance().set(&DataKey::CampaignCount, &0u32);

        extend_instance(&env);
    }

    /// Deploy a new campaign managed by `manager` and record its address.
    pub fn create_campaign(env: Env, manager: Address, minimum_contribution: i128) -> Address {
        manager.require_auth();

        if minimum_contribution <= 0 {
            panic_with_error!(&env, FactoryError::InvalidAmount);
        }

        let token = read_token(&env);
        let wasm_hash = read_campaign_wasm_hash(&env);
        let index = read_campaign_count(&env);

        let campaign = env
            .deployer()
            .with_current_contract(campaign_salt(&env, index))
            .deploy_v2(wasm_hash, ());

        campaign_client::CampaignClient::new(&env, &campaign).initialize(
            &manager,
            &token,
            &minimum_contribution,
            &Some(env.current_contract_address()),
        );

        let campaign_key = DataKey::Campaign(index);
        env.storage().persistent().set(&campaign_key, &campaign);
        extend_persistent(&env, &campaign_key);

        let manager_index = read_manager_campaign_count(&env, &manager);
        let manager_campaign_key = DataKey::ManagerCampaign(manager.clone(), manager_index);
        env.storage().persistent().set(&manager_campaign_key, &campaign);
        extend_persistent(&env, &manager_campaign_key);

        let manager_count_key = DataKey::ManagerCampaignCount(manager.clone());
        env.storage()
            .persistent()
            .set(&manager_count_key, &(manager_index + 1));
        extend_persistent(&env, &manager_count_key);

        env.storage().instance().set(&DataKey::CampaignCount, &(index + 1));
        extend_instance(&env);

        log!(&env, "campaign deployed", campaign, index);

        events::CampaignCreated {
            manager,
            campaign: campaign.clone(),
            minimum_contribution,
            index,
        }
        .publish(&env);

        campaign
    }

    /// Addresses of every campaign deployed by this factory, oldest first
    pub fn get_deployed_campaigns(env: Env) -> Vec<Address> {
        let count = read_campaign_count(&env);
        Self::get_deployed_campaigns_page(env, 0, count)
    }

    /// Up to `limit` deployed campaigns starting at creation index `start`
    pub fn get_deployed_campaigns_page(env: Env, start: u32, limit: u32) -> Vec<Address> {
        let mut campaigns = Vec::new(&env);
        for index in page_range(start, limit, read_campaign_count(&env)) {
            campaigns.push_back(read_campaign(&env, &DataKey::Campaign(index)));
        }
        campaigns
    }

    pub fn get_campaign(env: Env, index: u32) -> Address {
        read_campaign(&env, &DataKey::Campaign(index))
    }

    pub fn get_campaign_count(env: Env) -> u32 {
        read_campaign_count(&env)
    }

    pub fn get_campaigns_by_manager(env: Env, manager: Address) -> Vec<Address> {
        let count = read_manager_campaign_count(&env, &manager);
        Self::get_campaigns_by_manager_page(env, manager, 0, count)
    }

    pub fn get_campaigns_by_manager_page(
        env: Env,
        manager: Address,
        start: u32,
        limit: u32,
    ) -> Vec<Address> {
        let mut campaigns = Vec::new(&env);
        let count = read_manager_campaign_count(&env, &manager);
        for index in page_range(start, limit, count) {
            let key = DataKey::ManagerCampaign(manager.clone(), index);
            campaigns.push_back(read_campaign(&env, &key));
        }
        campaigns
    }

    pub fn get_manager_campaign_count(env: Env, manager: Address) -> u32 {
        read_manager_campaign_count(&env, &manager)
    }

    /// Point future deployments at a new campaign wasm. Existing campaigns are untouched.
    pub fn set_campaign_wasm(env: Env, caller: Address, new_hash: BytesN<32>) {
        caller.require_auth();

        if caller != read_admin(&env) {
            panic_with_error!(&env, FactoryError::NotAuthorized);
        }

        let old_hash = read_campaign_wasm_hash(&env);
        env.storage().instance().set(&DataKey::CampaignWasmHash, &new_hash);
        extend_instance(&env);

        events::CampaignWasmUpdated { old_hash, new_hash }.publish(&env);
    }

    pub fn admin(env: Env) -> Address {
        read_admin(&env)
    }

    pub fn token(env: Env) -> Address {
        read_token(&env)
    }

    pub fn campaign_wasm_hash(env: Env) -> BytesN<32> {
        read_campaign_wasm_hash(&env)
    }
}

// Helper functions
fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_INSTANCE_THRESHOLD, TTL_INSTANCE);
}

fn extend_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT_THRESHOLD, TTL_PERSISTENT);
}

fn read_admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| panic_with_error!(env, FactoryError::NotInitialized))
}

fn read_token(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .unwrap_or_else(|| panic_with_error!(env, FactoryError::NotInitialized))
}

fn read_campaign_wasm_hash(env: &Env) -> BytesN<32> {
    env.storage()
        .instance()
        .get(&DataKey::CampaignWasmHash)
        .unwrap_or_else(|| panic_with_error!(env, FactoryError::NotInitialized))
}

fn read_campaign_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

fn read_manager_campaign_count(env: &Env, manager: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ManagerCampaignCount(manager.clone()))
        .unwrap_or(0)
}

fn read_campaign(env: &Env, key: &DataKey) -> Address {
    env.storage()
        .persistent()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(env, FactoryError::CampaignNotFound))
}

// Indices in [start, start + limit) clamped to `count`
fn page_range(start: u32, limit: u32, count: u32) -> Range<u32> {
    let end = start.saturating_add(limit).min(count);
    start.min(end)..end
}

// Salt is the big-endian campaign index, right-aligned
fn campaign_salt(env: &Env, index: u32) -> BytesN<32> {
    let mut salt = [0u8; 32];
    salt[28..].copy_from_slice(&index.to_be_bytes());
    BytesN::from_array(env, &salt)
}
