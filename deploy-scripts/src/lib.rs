//! Scripts for deploying and verifying the `V3PositionHelper` contract.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifact;
pub mod cli;
pub mod client;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod fees;
pub mod reporter;
pub mod utils;
pub mod verify;
