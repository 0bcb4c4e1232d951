//! A relay service that sponsors transactions for Safe accounts.
//!
//! Incoming calldata is classified into a supported transaction shape,
//! validated against the sponsorship policy, rate limited per address and
//! finally handed to the sponsor network for gasless execution.

pub mod calldata;
pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod deployments;
pub mod error;
pub mod policy;
pub mod predict;
pub mod relay;
pub mod rpc;
pub mod safe_info;
pub mod spawn;
pub mod sponsor;
pub mod throttle;
pub mod types;
