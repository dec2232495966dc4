//! Train headway rescheduling server.
//!
//! A web service that answers: "given these trains, their delays and a
//! minimum separation at stations, when does each train actually run?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod engine;
pub mod store;
pub mod web;
