pub mod auth_ctx;
pub mod json_body;
pub mod path_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use json_body::JsonBody;
pub use path_id::PathId;
