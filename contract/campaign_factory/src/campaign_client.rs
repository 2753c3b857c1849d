use soroban_sdk::{contractclient, Address, Env};

/// Entry points of the campaign contract the factory calls after deployment.
/// Must stay in sync with `CampaignContract::initialize`.
#[allow(dead_code)]
#[contractclient(name = "CampaignClient")]
pub trait CampaignInterface {
    fn initialize(
        env: Env,
        manager: Address,
        token: Address,
        minimum_contribution: i128,
        factory: Option<Address>,
    );
}
