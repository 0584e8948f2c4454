use soroban_sdk::{contractevent, Address};

#[contractevent]
pub struct DepositEvent {
    #[topic]
    pub caller: Address,
    #[topic]
    pub receiver: Address,
    pub assets: i128,
    pub shares: i128,
}

#[contractevent]
pub struct WithdrawEvent {
    #[topic]
    pub caller: Address,
    #[topic]
    pub owner: Address,
    pub receiver: Address,
    pub assets: i128,
    pub shares: i128,
    pub fee: i128,
}

#[contractevent]
pub struct RebaseIndexUpdated {
    pub old_index: i128,
    pub new_index: i128,
}

#[contractevent]
pub struct TotalAssetsUpdated {
    pub old_total: i128,
    pub new_total: i128,
}

#[contractevent]
pub struct BridgeMintEvent {
    #[topic]
    pub to: Address,
    pub amount: i128,
    pub raw_shares: i128,
}

#[contractevent]
pub struct BridgeBurnEvent {
    #[topic]
    pub from: Address,
    pub amount: i128,
    pub raw_shares: i128,
}

#[contractevent]
pub struct RouterSet {
    pub router: Address,
}

#[contractevent]
pub struct RedemptionFeeUpdated {
    pub fee_bps: u32,
}

#[contractevent]
pub struct MinDepositUpdated {
    pub amount: i128,
}

#[contractevent]
pub struct MinHoldPeriodUpdated {
    pub seconds: u64,
}

#[contractevent]
pub struct TreasuryUpdated {
    pub treasury: Address,
}

#[contractevent]
pub struct BridgeUpdated {
    pub bridge: Address,
}

#[contractevent]
pub struct ComplianceUpdated {
    pub compliance: Address,
}

#[contractevent]
pub struct PauseToggled {
    pub paused: bool,
}
