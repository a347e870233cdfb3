/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - access middleware が検証した呼び出し元 (AuthCtx) を handler に渡す
 * - axum 依存 (FromRequestParts) は core、型と唯一の生成経路 (authenticate) は types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
