pub use pei_models::auth::*;
pub use pei_models::users::User;
