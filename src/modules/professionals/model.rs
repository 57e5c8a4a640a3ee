pub use pei_models::professionals::*;
