pub mod access_jwt;
pub mod credentials;
pub mod password;
pub mod refresh_token;
pub mod token_service;

pub use access_jwt::AccessTokenCodec;
pub use token_service::TokenService;
