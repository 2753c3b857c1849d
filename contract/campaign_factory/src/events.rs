use soroban_sdk::{contractevent, Address, BytesN};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    #[topic]
    pub manager: Address,
    pub campaign: Address,
    pub minimum_contribution: i128,
    pub index: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignWasmUpdated {
    pub old_hash: BytesN<32>,
    pub new_hash: BytesN<32>,
}
