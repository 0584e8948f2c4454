#![no_std]

#[cfg(feature = "contract")]
mod contract;
mod conversion;
mod events;
mod guard;
mod ledger;
mod storage;

#[cfg(all(test, feature = "contract"))]
mod tests;

#[cfg(feature = "contract")]
pub use contract::{RebaseVault, RebaseVaultClient, MAX_REDEMPTION_FEE_BPS};

pub use conversion::INDEX_PRECISION;
pub use rebase_vault_interface::{RebaseVaultTrait, VaultError};
pub use storage::{DEFAULT_MIN_DEPOSIT, DEFAULT_MIN_HOLD_PERIOD};
