pub use pei_models::families::*;
