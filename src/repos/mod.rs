/*
 * Responsibility
 * - SQLx-backed repositories behind small traits
 * - Handlers and services depend on the traits, main wires the Pg implementations
 */
pub mod chirp_repo;
pub mod error;
pub mod refresh_token_repo;
pub mod user_repo;

#[cfg(test)]
pub mod memory;
