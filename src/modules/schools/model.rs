//! School models, re-exported from `pei-models`.

pub use pei_models::schools::*;
