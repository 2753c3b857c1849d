#![no_std]

mod events;
mod storage_types;
mod treasury;


use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, Env, String};

pub use storage_types::{CampaignError, CampaignSummary, Request};
use storage_types::*;

#[contract]
pub struct CampaignContract;

#[contractimpl]
impl CampaignContract {
    /// Initialize the campaign with its manager, contribution token and minimum contribution.
    /// `factory` is set when the campaign was deployed through the campaign factory.
    pub fn initialize(
        env: Env,
        manager: Address,
        token: Address,
        minimum_contribution: i128,
        factory: Option<Address>,
    ) {
        if env.storage().instance().has(&DataKey::Manager) {
            panic_with_error!(&env, CampaignError::AlreadyInitialized);
        }
        if minimum_contribution <= 0 {
            panic_with_error!(&env, CampaignError::InvalidAmount);
        }

        env.storage().instance().set(&DataKey::Manager, &manager);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::MinimumContribution, &minimum_contribution);
        env.storage().instance().set(&DataKey::ApproversCount, &0u32);
        env.storage().instance().set(&DataKey::RequestCount, &0u32);
        if let Some(factory) = factory {
            env.storage().instance().set(&DataKey::Factory, &factory);
        }

        extend_instance(&env);

        events::CampaignInitialized {
            manager,
            token,
            minimum_contribution,
        }
        .publish(&env);
    }

    /// Contribute to the campaign. A first contribution of at least the minimum
    /// makes the contributor an approver.
    pub fn contribute(env: Env, contributor: Address, amount: i128) {
        contributor.require_auth();

        let minimum: i128 = read_minimum_contribution(&env);
        if amount < minimum {
            panic_with_error!(&env, CampaignError::ContributionTooSmall);
        }

        treasury::collect_contribution(&env, &contributor, amount);

        let contribution_key = PersistentKey::Contribution(contributor.clone());
        let total: i128 = env.storage().persistent().get(&contribution_key).unwrap_or(0);
        env.storage().persistent().set(&contribution_key, &(total + amount));
        extend_persistent(&env, &contribution_key);

        let approver_key = PersistentKey::Approver(contributor.clone());
        let new_approver = !env.storage().persistent().has(&approver_key);
        if new_approver {
            env.storage().persistent().set(&approver_key, &true);
            let count = read_approvers_count(&env);
            env.storage().instance().set(&DataKey::ApproversCount, &(count + 1));
        }
        extend_persistent(&env, &approver_key);
        extend_instance(&env);

        log!(&env, "contribution accepted", contributor, amount);

        events::Contributed {
            contributor,
            amount,
            new_approver,
        }
        .publish(&env);
    }

    /// Create a spending request. Manager only.
    pub fn create_request(
        env: Env,
        caller: Address,
        description: String,
        value: i128,
        recipient: Address,
    ) -> u32 {
        caller.require_auth();
        require_manager(&env, &caller);

        if value <= 0 {
            panic_with_error!(&env, CampaignError::InvalidAmount);
        }

        let request_id = read_request_count(&env);
        let request = Request {
            description: description.clone(),
            value,
            recipient: recipient.clone(),
            complete: false,
            approval_count: 0,
        };

        let request_key = PersistentKey::Request(request_id);
        env.storage().persistent().set(&request_key, &request);
        env.storage().instance().set(&DataKey::RequestCount, &(request_id + 1));

        extend_persistent(&env, &request_key);
        extend_instance(&env);

        events::RequestCreated {
            request_id,
            description,
            value,
            recipient,
        }
        .publish(&env);

        request_id
    }

    /// Approve a pending request. Each approver votes at most once per request.
    pub fn approve_request(env: Env, approver: Address, request_id: u32) {
        approver.require_auth();

        let mut request = get_request(&env, request_id);

        if !is_approver(&env, &approver) {
            panic_with_error!(&env, CampaignError::NotApprover);
        }
        if request.complete {
            panic_with_error!(&env, CampaignError::RequestAlreadyComplete);
        }

        let approval_key = PersistentKey::Approval(request_id, approver.clone());
        if env.storage().persistent().has(&approval_key) {
            panic_with_error!(&env, CampaignError::AlreadyApproved);
        }

        request.approval_count += 1;
        env.storage().persistent().set(&approval_key, &true);
        env.storage().persistent().set(&PersistentKey::Request(request_id), &request);

        extend_persistent(&env, &approval_key);
        extend_persistent(&env, &PersistentKey::Request(request_id));
        extend_instance(&env);

        events::RequestApproved {
            request_id,
            approver,
            approval_count: request.approval_count,
        }
        .publish(&env);
    }

    /// Finalize an approved request, paying its value to the recipient. Manager only.
    pub fn finalize_request(env: Env, caller: Address, request_id: u32) {
        caller.require_auth();
        require_manager(&env, &caller);

        let mut request = get_request(&env, request_id);

        if request.complete {
            panic_with_error!(&env, CampaignError::RequestAlreadyComplete);
        }
        if !treasury::has_majority(request.approval_count, read_approvers_count(&env)) {
            panic_with_error!(&env, CampaignError::NotEnoughApprovals);
        }
        if treasury::campaign_balance(&env) < request.value {
            panic_with_error!(&env, CampaignError::InsufficientBalance);
        }

        treasury::release_to_recipient(&env, &request);

        request.complete = true;
        env.storage().persistent().set(&PersistentKey::Request(request_id), &request);
        extend_persistent(&env, &PersistentKey::Request(request_id));
        extend_instance(&env);

        log!(&env, "request finalized", request_id, request.value);

        events::RequestFinalized {
            request_id,
            recipient: request.recipient,
            value: request.value,
        }
        .publish(&env);
    }

    pub fn manager(env: Env) -> Address {
        read_manager(&env)
    }

    pub fn minimum_contribution(env: Env) -> i128 {
        read_minimum_contribution(&env)
    }

    pub fn approvers_count(env: Env) -> u32 {
        read_approvers_count(&env)
    }

    pub fn is_approver(env: Env, address: Address) -> bool {
        is_approver(&env, &address)
    }

    pub fn get_request(env: Env, request_id: u32) -> Request {
        get_request(&env, request_id)
    }

    pub fn get_requests_count(env: Env) -> u32 {
        read_request_count(&env)
    }

    pub fn has_approved(env: Env, request_id: u32, approver: Address) -> bool {
        env.storage()
            .persistent()
            .has(&PersistentKey::Approval(request_id, approver))
    }

    /// Total amount an address has contributed
    pub fn contribution_of(env: Env, contributor: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&PersistentKey::Contribution(contributor))
            .unwrap_or(0)
    }

    /// Contribution tokens currently held by the campaign
    pub fn balance(env: Env) -> i128 {
        treasury::campaign_balance(&env)
    }

    pub fn get_summary(env: Env) -> CampaignSummary {
        CampaignSummary {
            minimum_contribution: read_minimum_contribution(&env),
            balance: treasury::campaign_balance(&env),
            request_count: read_request_count(&env),
            approvers_count: read_approvers_count(&env),
            manager: read_manager(&env),
        }
    }

    /// Factory that deployed this campaign, if any
    pub fn factory(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Factory)
    }
}

// Helper functions
fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_INSTANCE_THRESHOLD, TTL_INSTANCE);
}

fn extend_persistent(env: &Env, key: &PersistentKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT_THRESHOLD, TTL_PERSISTENT);
}

fn read_manager(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Manager)
        .unwrap_or_else(|| panic_with_error!(env, CampaignError::NotInitialized))
}

fn read_minimum_contribution(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::MinimumContribution)
        .unwrap_or_else(|| panic_with_error!(env, CampaignError::NotInitialized))
}

fn read_approvers_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ApproversCount)
        .unwrap_or(0)
}

fn read_request_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::RequestCount)
        .unwrap_or(0)
}

fn require_manager(env: &Env, caller: &Address) {
    if *caller != read_manager(env) {
        panic_with_error!(env, CampaignError::NotManager);
    }
}

fn is_approver(env: &Env, address: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&PersistentKey::Approver(address.clone()))
        .unwrap_or(false)
}

fn get_request(env: &Env, request_id: u32) -> Request {
    env.storage()
        .persistent()
        .get(&PersistentKey::Request(request_id))
        .unwrap_or_else(|| panic_with_error!(env, CampaignError::RequestNotFound))
}
