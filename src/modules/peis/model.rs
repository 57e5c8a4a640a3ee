pub use pei_models::peis::*;
