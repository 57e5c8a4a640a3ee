pub mod db;
pub mod scope;
