pub use pei_models::executions::*;
