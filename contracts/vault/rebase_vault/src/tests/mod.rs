mod fixture;

mod withdraw_tests;

pub use fixture::VaultTest;
