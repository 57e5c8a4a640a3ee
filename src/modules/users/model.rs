pub use pei_models::users::*;
