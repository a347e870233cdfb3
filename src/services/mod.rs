/*
 * Responsibility
 * - Business logic that handlers call into (auth only, for now)
 */
pub mod auth;
