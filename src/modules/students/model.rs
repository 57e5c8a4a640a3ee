//! Student models, re-exported from `pei-models`.

pub use pei_models::students::*;
