//! Integration tests for the governance token client.


#[cfg(test)]
mod router_tests;
