use crate::{RebaseVault, RebaseVaultClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    vec, Address, Env, String,
};

// Import contracts from the workspace
use mock_lending_pool::{MockLendingPool, MockLendingPoolClient};
use yield_router::{ProtocolKind, YieldRouter, YieldRouterClient};

/// One unit of a 7-decimal asset.
pub const UNIT: i128 = 10_000_000;
pub const STARTING_BALANCE: i128 = 1_000_000 * UNIT;
pub const UPKEEP_INTERVAL: u64 = 86_400;

/// Shared test fixture: asset, vault, router and one lending pool at full weight.
pub struct VaultTest<'a> {
    pub env: Env,
    pub admin: Address,
    pub treasury: Address,
    pub user1: Address,
    pub user2: Address,
    pub asset: TokenClient<'a>,
    pub asset_admin: StellarAssetClient<'a>,
    pub vault: RebaseVaultClient<'a>,
    pub router: YieldRouterClient<'a>,
    pub pool: MockLendingPoolClient<'a>,
}

impl<'a> VaultTest<'a> {
    pub fn setup() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let treasury = Address::generate(&env);
        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        // Create reference asset
        let asset_issuer = Address::generate(&env);
        let asset_addr = env.register_stellar_asset_contract_v2(asset_issuer).address();
        let asset = TokenClient::new(&env, &asset_addr);
        let asset_admin = StellarAssetClient::new(&env, &asset_addr);

        let vault_id = env.register(
            RebaseVault,
            (
                &admin,
                &asset_addr,
                &treasury,
                &7u32,
                &String::from_str(&env, "Rebasing USD"),
                &String::from_str(&env, "rUSD"),
            ),
        );
        let vault = RebaseVaultClient::new(&env, &vault_id);

        let router_id = env.register(YieldRouter, (&admin, &asset_addr, &vault_id));
        let router = YieldRouterClient::new(&env, &router_id);
        vault.set_router(&router_id);

        // Lending pool is both the position token and the manager
        let pool_id = env.register(MockLendingPool, (&asset_addr,));
        let pool = MockLendingPoolClient::new(&env, &pool_id);
        router.add_asset(&pool_id, &asset_addr, &pool_id, &ProtocolKind::LendingPool);
        router.update_weights(&vec![&env, 10_000u32]);

        asset_admin.mint(&user1, &STARTING_BALANCE);
        asset_admin.mint(&user2, &STARTING_BALANCE);

        VaultTest {
            env,
            admin,
            treasury,
            user1,
            user2,
            asset,
            asset_admin,
            vault,
            router,
            pool,
        }
    }

    pub fn deposit(&self, user: &Address, assets: i128) -> i128 {
        self.vault.deposit(user, &assets, user)
    }

    pub fn advance_time(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| {
            li.timestamp += seconds;
        });
    }

    /// Waits out the upkeep interval and runs one netting cycle.
    pub fn run_upkeep(&self) {
        self.advance_time(UPKEEP_INTERVAL);
        self.router.perform_upkeep();
    }

    /// Interest paid straight into the lending pool.
    pub fn simulate_yield(&self, amount: i128) {
        self.asset_admin.mint(&self.pool.address, &amount);
    }

    pub fn share_balance(&self, user: &Address) -> i128 {
        self.vault.balance(user)
    }
}
