//! Adapters Layer - CLI and Replay Host

pub mod cli;
pub mod replay;
