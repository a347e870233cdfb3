/*
 * Responsibility
 * - Public surface of the middleware layer
 * - auth::access (authorization gate), cors, http (request id / trace / limits),
 *   metrics (/app hit counter)
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod metrics;
