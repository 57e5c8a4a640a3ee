pub use pei_models::agenda::*;
