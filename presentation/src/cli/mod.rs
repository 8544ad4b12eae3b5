//! Command line definitions

pub mod commands;
pub mod request;
