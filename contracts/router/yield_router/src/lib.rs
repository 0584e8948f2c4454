#![no_std]

mod accounting;
mod accrual;
mod adapters;
mod allocation;
#[cfg(feature = "contract")]
mod contract;
mod events;
mod guard;
mod netting;
mod oracle;
mod registry;
mod storage;

#[cfg(all(test, feature = "contract"))]
mod tests;

#[cfg(feature = "contract")]
pub use contract::{YieldRouter, YieldRouterClient};

pub use yield_router_interface::{
    AllocationMode, ProtocolKind, RouterError, UpkeepOutcome, YieldAssetEntry, YieldRouterTrait,
};
