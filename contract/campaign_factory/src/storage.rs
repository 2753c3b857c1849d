use soroban_sdk::{contracterror, contracttype, Address};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Token,
    CampaignWasmHash,
    CampaignCount,
    Campaign(u32),                 // Creation index -> campaign address
    ManagerCampaignCount(Address),
    ManagerCampaign(Address, u32), // (Manager, per-manager index) -> campaign address
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FactoryError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    InvalidAmount = 4,
    CampaignNotFound = 5,
}

pub const DAY_IN_LEDGERS: u32 = 17280;
pub const TTL_INSTANCE: u32 = DAY_IN_LEDGERS * 30;
pub const TTL_INSTANCE_THRESHOLD: u32 = TTL_INSTANCE - DAY_IN_LEDGERS;
pub const TTL_PERSISTENT: u32 = DAY_IN_LEDGERS * 90;
pub const TTL_PERSISTENT_THRESHOLD: u32 = TTL_PERSISTENT - DAY_IN_LEDGERS;
