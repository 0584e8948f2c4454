//! Insertion-ordered registry of yield assets.
//!
//! Entries are keyed by position token for constant-time membership, and a separate
//! address list keeps registration order for iteration. The list is bounded by
//! `MAX_ASSETS`, so linear scans over it stay cheap.

use soroban_sdk::{Address, Env, Vec};
use yield_router_interface::YieldAssetEntry;

use crate::storage::DataKey;

pub fn contains(env: &Env, token: &Address) -> bool {
    env.storage()
        .instance()
        .has(&DataKey::Entry(token.clone()))
}

pub fn get(env: &Env, token: &Address) -> Option<YieldAssetEntry> {
    env.storage()
        .instance()
        .get(&DataKey::Entry(token.clone()))
}

pub fn order(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::AssetOrder)
        .unwrap_or(Vec::new(env))
}

pub fn len(env: &Env) -> u32 {
    order(env).len()
}

/// Entries in registration order.
pub fn entries(env: &Env) -> Vec<YieldAssetEntry> {
    let mut entries = Vec::new(env);
    for token in order(env).iter() {
        if let Some(entry) = get(env, &token) {
            entries.push_back(entry);
        }
    }
    entries
}

pub fn insert(env: &Env, entry: &YieldAssetEntry) {
    let mut tokens = order(env);
    tokens.push_back(entry.token.clone());
    env.storage().instance().set(&DataKey::AssetOrder, &tokens);
    update(env, entry);
}

pub fn update(env: &Env, entry: &YieldAssetEntry) {
    env.storage()
        .instance()
        .set(&DataKey::Entry(entry.token.clone()), entry);
}

pub fn remove(env: &Env, token: &Address) {
    let mut tokens = order(env);
    if let Some(index) = tokens.first_index_of(token) {
        tokens.remove(index);
    }
    env.storage().instance().set(&DataKey::AssetOrder, &tokens);
    env.storage()
        .instance()
        .remove(&DataKey::Entry(token.clone()));
}
