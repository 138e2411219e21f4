//! CLI module for the demo-seeder binary

pub mod commands;
