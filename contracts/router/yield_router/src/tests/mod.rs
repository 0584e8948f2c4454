
mod accounting_tests;
mod allocation_tests;
mod registry_tests;

pub use fixture::RouterTest;
