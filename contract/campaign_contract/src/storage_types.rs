use soroban_sdk::{contracterror, contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Manager,
    Token,
    MinimumContribution,
    ApproversCount,
    RequestCount,
    Factory,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Approver(Address),
    Contribution(Address),
    Request(u32),
    Approval(u32, Address), // (RequestIndex, Approver)
}

// Spending request raised by the manager
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Request {
    pub description: String,
    pub value: i128,
    pub recipient: Address,
    pub complete: bool,
    pub approval_count: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct CampaignSummary {
    pub minimum_contribution: i128,
    pub balance: i128,
    pub request_count: u32,
    pub approvers_count: u32,
    pub manager: Address,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CampaignError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    ContributionTooSmall = 3,
    NotManager = 4,
    NotApprover = 5,
    AlreadyApproved = 6,
    RequestNotFound = 7,
    RequestAlreadyComplete = 8,
    NotEnoughApprovals = 9,
    InsufficientBalance = 10,
    InvalidAmount = 11,
}

// Constants
pub const DAY_IN_LEDGERS: u32 = 17280;
pub const TTL_INSTANCE: u32 = DAY_IN_LEDGERS * 30; // 30 days
pub const TTL_INSTANCE_THRESHOLD: u32 = TTL_INSTANCE - DAY_IN_LEDGERS;
pub const TTL_PERSISTENT: u32 = DAY_IN_LEDGERS * 90; // 90 days
pub const TTL_PERSISTENT_THRESHOLD: u32 = TTL_PERSISTENT - DAY_IN_LEDGERS;
