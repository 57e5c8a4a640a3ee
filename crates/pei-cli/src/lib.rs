//! Administrative tooling for the PEI backend: admin bootstrap and fake data
//! seeding. The binary in `main.rs` wires these to `clap` subcommands.

pub mod admin;
pub mod seeder;
