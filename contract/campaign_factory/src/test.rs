#![cfg(test)]

use super::*;
use soroban_sdk::{
    testutils::{Address as _, Events as _},
    vec, Address, BytesN, Env, Event, InvokeError,
};

fn create_factory_contract<'a>(e: &Env) -> CampaignFactoryClient<'a> {
    CampaignFactoryClient::new(e, &e.register(CampaignFactory, ()))
}

fn wasm_hash(e: &Env, byte: u8) -> BytesN<32> {
    BytesN::from_array(e, &[byte; 32])
}

fn assert_last_event(env: &Env, contract: &Address, event: impl Event) {
    let last = env.events().all().last().unwrap();
    assert_eq!(
        vec![env, last],
        vec![env, (contract.clone(), event.topics(env), event.data(env))]
    );
}

fn assert_factory_error<T>(
    result: Result<T, Result<soroban_sdk::Error, InvokeError>>,
    expected: FactoryError,
) {
    assert_eq!(result.err(), Some(Ok(expected.into())));
}

#[test]
fn test_initialize() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = Address::generate(&env);
    let factory = create_factory_contract(&env);

    factory.initialize(&admin, &token, &wasm_hash(&env, 1));

    assert_eq!(factory.admin(), admin);
    assert_eq!(factory.token(), token);
    assert_eq!(factory.campaign_wasm_hash(), wasm_hash(&env, 1));
    assert_eq!(factory.get_campaign_count(), 0);
    assert!(factory.get_deployed_campaigns().is_empty());
}

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = Address::generate(&env);
    let factory = create_factory_contract(&env);
    factory.initialize(&admin, &token, &wasm_hash(&env, 1));

    let result = factory.try_initialize(&admin, &token, &wasm_hash(&env, 2));
    assert_factory_error(result, FactoryError::AlreadyInitialized);
    assert_eq!(factory.campaign_wasm_hash(), wasm_hash(&env, 1));
}

#[test]
fn test_create_campaign_rejects_non_positive_minimum() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let manager = Address::generate(&env);
    let token = Address::generate(&env);
    let factory = create_factory_contract(&env);
    factory.initialize(&admin, &token, &wasm_hash(&env, 1));

    let result = factory.try_create_campaign(&manager, &0);
    assert_factory_error(result, FactoryError::InvalidAmount);
    assert_eq!(factory.get_campaign_count(), 0);
}

#[test]
fn test_create_campaign_before_initialize() {
    let env = Env::default();
    env.mock_all_auths();

    let manager = Address::generate(&env);
    let factory = create_factory_contract(&env);

    let result = factory.try_create_campaign(&manager, &100);
    assert_factory_error(result, FactoryError::NotInitialized);
}

#[test]
fn test_failed_deployment_records_nothing() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let manager = Address::generate(&env);
    let token = Address::generate(&env);
    let factory = create_factory_contract(&env);

    // Nothing has been uploaded under this hash
    factory.initialize(&admin, &token, &wasm_hash(&env, 9));

    assert!(factory.try_create_campaign(&manager, &100).is_err());
    assert_eq!(factory.get_campaign_count(), 0);
    assert!(factory.get_deployed_campaigns().is_empty());
    assert!(factory.get_campaigns_by_manager(&manager).is_empty());
}

#[test]
fn test_set_campaign_wasm() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = Address::generate(&env);
    let factory = create_factory_contract(&env);
    factory.initialize(&admin, &token, &wasm_hash(&env, 1));

    factory.set_campaign_wasm(&admin, &wasm_hash(&env, 2));
    assert_eq!(factory.campaign_wasm_hash(), wasm_hash(&env, 2));
    assert_eq!(env.auths()[0].0, admin);
}

#[test]
fn test_only_admin_can_set_campaign_wasm() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let outsider = Address::generate(&env);
    let token = Address::generate(&env);
    let factory = create_factory_contract(&env);
    factory.initialize(&admin, &token, &wasm_hash(&env, 1));

    let result = factory.try_set_campaign_wasm(&outsider, &wasm_hash(&env, 2));
    assert_factory_error(result, FactoryError::NotAuthorized);
    assert_eq!(factory.campaign_wasm_hash(), wasm_hash(&env, 1));
}

#[test]
fn test_campaign_salt_is_unique_per_index() {
    let env = Env::default();

    let first = campaign_salt(&env, 0);
    let second = campaign_salt(&env, 1);
    let later = campaign_salt(&env, 256);

    assert_ne!(first, second);
    assert_ne!(second, later);
    assert_eq!(second.to_array()[31], 1);
    assert_eq!(later.to_array()[30], 1);
}

#[test]
fn test_set_campaign_wasm_emits_event() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = Address::generate(&env);
    let factory = create_factory_contract(&env);
    factory.initialize(&admin, &token, &wasm_hash(&env, 1));

    factory.set_campaign_wasm(&admin, &wasm_hash(&env, 2));
    assert_last_event(
        &env,
        &factory.address,
        events::CampaignWasmUpdated {
            old_hash: wasm_hash(&env, 1),
            new_hash: wasm_hash(&env, 2),
        },
    );
}

#[test]
fn test_listings_are_empty_before_any_deployment() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let manager = Address::generate(&env);
    let token = Address::generate(&env);
    let factory = create_factory_contract(&env);
    factory.initialize(&admin, &token, &wasm_hash(&env, 1));

    assert!(factory.get_deployed_campaigns_page(&0, &10).is_empty());
    assert!(factory.get_campaigns_by_manager_page(&manager, &0, &10).is_empty());
    assert_eq!(factory.get_manager_campaign_count(&manager), 0);

    let result = factory.try_get_campaign(&0);
    assert_factory_error(result, FactoryError::CampaignNotFound);
}

#[test]
fn test_page_range_clamps_to_count() {
    assert_eq!(page_range(0, 10, 3), 0..3);
    assert_eq!(page_range(1, 1, 3), 1..2);
    assert_eq!(page_range(2, 0, 3), 2..2);
    assert!(page_range(5, 10, 3).is_empty());
    assert_eq!(page_range(1, u32::MAX, 3), 1..3);
}

#[cfg(campaign_wasm)]
mod deployment {
    use super::*;
    use soroban_sdk::token;

    mod campaign {
        soroban_sdk::contractimport!(
            file = "../../target/campaign-wasm/wasm32v1-none/release/campaign_contract.wasm"
        );
    }

    struct Deployed<'a> {
        token_admin: token::StellarAssetClient<'a>,
        token: token::Client<'a>,
        factory: CampaignFactoryClient<'a>,
    }

    // Factory pointing at the real campaign wasm
    fn setup<'a>(env: &Env) -> Deployed<'a> {
        env.mock_all_auths();

        let admin = Address::generate(env);
        let issuer = Address::generate(env);
        let token_id = env.register_stellar_asset_contract_v2(issuer).address();
        let campaign_wasm = env.deployer().upload_contract_wasm(campaign::WASM);

        let factory = create_factory_contract(env);
        factory.initialize(&admin, &token_id, &campaign_wasm);

        Deployed {
            token_admin: token::StellarAssetClient::new(env, &token_id),
            token: token::Client::new(env, &token_id),
            factory,
        }
    }

    #[test]
    fn test_create_campaign_deploys_initialized_campaigns() {
        let env = Env::default();
        let d = setup(&env);

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        let first = d.factory.create_campaign(&alice, &100);
        assert_last_event(
            &env,
            &d.factory.address,
            events::CampaignCreated {
                manager: alice.clone(),
                campaign: first.clone(),
                minimum_contribution: 100,
                index: 0,
            },
        );
        let second = d.factory.create_campaign(&bob, &250);
        let third = d.factory.create_campaign(&alice, &500);

        assert_ne!(first, second);
        assert_ne!(second, third);

        let deployed = d.factory.get_deployed_campaigns();
        assert_eq!(deployed, vec![&env, first.clone(), second.clone(), third.clone()]);
        assert_eq!(d.factory.get_campaign_count(), deployed.len());
        assert_eq!(d.factory.get_campaign(&1), second);

        assert_eq!(
            d.factory.get_campaigns_by_manager(&alice),
            vec![&env, first.clone(), third.clone()]
        );
        assert_eq!(d.factory.get_campaigns_by_manager(&bob), vec![&env, second.clone()]);
        assert_eq!(d.factory.get_manager_campaign_count(&alice), 2);

        let first_campaign = campaign::Client::new(&env, &first);
        assert_eq!(first_campaign.manager(), alice);
        assert_eq!(first_campaign.minimum_contribution(), 100);
        assert_eq!(first_campaign.factory(), Some(d.factory.address.clone()));

        let second_campaign = campaign::Client::new(&env, &second);
        assert_eq!(second_campaign.manager(), bob);
        assert_eq!(second_campaign.minimum_contribution(), 250);
        assert_eq!(second_campaign.factory(), Some(d.factory.address.clone()));

        let contributor = Address::generate(&env);
        d.token_admin.mint(&contributor, &1_000);
        second_campaign.contribute(&contributor, &300);

        assert!(second_campaign.is_approver(&contributor));
        assert_eq!(second_campaign.approvers_count(), 1);
        assert_eq!(d.token.balance(&second), 300);
        assert_eq!(d.token.balance(&first), 0);
    }

    #[test]
    fn test_deployed_campaign_cannot_be_reinitialized() {
        let env = Env::default();
        let d = setup(&env);

        let manager = Address::generate(&env);
        let outsider = Address::generate(&env);
        let deployed = d.factory.create_campaign(&manager, &100);

        let campaign = campaign::Client::new(&env, &deployed);
        let result = campaign.try_initialize(&outsider, &d.token.address, &1, &None);
        assert!(result.is_err());
        assert_eq!(campaign.manager(), manager);
    }

    #[test]
    fn test_paged_listings() {
        let env = Env::default();
        let d = setup(&env);

        let manager = Address::generate(&env);
        let other = Address::generate(&env);
        let a = d.factory.create_campaign(&manager, &100);
        let b = d.factory.create_campaign(&other, &100);
        let c = d.factory.create_campaign(&manager, &100);

        assert_eq!(
            d.factory.get_deployed_campaigns_page(&1, &5),
            vec![&env, b.clone(), c.clone()]
        );
        assert_eq!(d.factory.get_deployed_campaigns_page(&0, &1), vec![&env, a.clone()]);
        assert!(d.factory.get_deployed_campaigns_page(&3, &1).is_empty());

        assert_eq!(
            d.factory.get_campaigns_by_manager_page(&manager, &1, &1),
            vec![&env, c]
        );
        assert_eq!(
            d.factory.get_campaigns_by_manager_page(&other, &0, &10),
            vec![&env, b]
        );
    }
}
