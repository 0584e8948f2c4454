use soroban_sdk::{contractevent, Address, Vec};
use yield_router_interface::{AllocationMode, ProtocolKind};

#[contractevent]
pub struct AssetAdded {
    #[topic]
    pub token: Address,
    pub manager: Address,
    pub deposit_token: Address,
    pub kind: ProtocolKind,
}

#[contractevent]
pub struct WeightsUpdated {
    pub weights: Vec<u32>,
}

#[contractevent]
pub struct AssetRemoved {
    #[topic]
    pub token: Address,
}

/// `amount` is zero when the protocol refused a redemption below its minimum.
#[contractevent]
pub struct AssetDrained {
    #[topic]
    pub token: Address,
    pub amount: i128,
}

#[contractevent]
pub struct Allocated {
    #[topic]
    pub token: Address,
    pub amount: i128,
}

#[contractevent]
pub struct Redeemed {
    #[topic]
    pub token: Address,
    pub requested: i128,
    pub realized: i128,
}

#[contractevent]
pub struct YieldAccrued {
    pub yield_amount: i128,
    pub old_index: i128,
    pub new_index: i128,
    pub total_assets: i128,
}

#[contractevent]
pub struct UpkeepPerformed {
    pub pending: i128,
    pub yield_amount: i128,
    pub deployed: i128,
    pub withdrawn: i128,
}

#[contractevent]
pub struct ExcessRescued {
    pub to: Address,
    pub amount: i128,
}

#[contractevent]
pub struct EmergencyWithdrawal {
    pub amount: i128,
}

#[contractevent]
pub struct PriceFeedUpdated {
    #[topic]
    pub token: Address,
    pub feed: Address,
    pub min_price: i128,
    pub max_price: i128,
}

#[contractevent]
pub struct AllocationModeUpdated {
    pub mode: AllocationMode,
}

#[contractevent]
pub struct AutomationIntervalUpdated {
    pub seconds: u64,
}
