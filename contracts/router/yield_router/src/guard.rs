use soroban_sdk::Env;
use yield_router_interface::RouterError;

use crate::storage;

/// Held for the duration of a state-mutating entry point; a nested entry fails with `Reentrancy`.
pub struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, RouterError> {
        if storage::is_locked(env) {
            return Err(RouterError::Reentrancy);
        }
        storage::set_locked(env, true);
        Ok(ReentrancyGuard { env })
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        storage::set_locked(self.env, false);
    }
}
