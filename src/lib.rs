//! CryptoStart Buddy - Crypto education guidance service
//!
//! This crate serves conversational crypto guidance backed by a chat
//! completion provider, together with the learner profile, session,
//! risk assessment, and progress records that surround it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
