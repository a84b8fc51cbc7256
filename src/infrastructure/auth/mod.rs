mod google_auth;
mod salesforce_auth;
mod token_provider;

pub use google_auth::{GOOGLE_TOKEN_URL, GoogleTokenProvider};
pub use salesforce_auth::SalesforceTokenProvider;
pub use token_provider::{TokenError, TokenProvider};
