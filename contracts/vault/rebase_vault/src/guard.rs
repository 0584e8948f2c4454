use soroban_sdk::Env;
use rebase_vault_interface::VaultError;

use crate::storage;

/// Lock held for the duration of a vault operation.
pub struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, VaultError> {
        if storage::is_locked(env) {
            return Err(VaultError::Reentrancy);
        }
        storage::write_locked(env, true);
        Ok(ReentrancyGuard { env })
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        storage::write_locked(self.env, false);
    }
}
