//! # rulekeeper-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RuleStore`: save, look up, list and remove rules per owner
//!   - `ActionExecutor`: carry out the actions of matched rules
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RuleService`: ingest rule definitions, view, list, remove
//!   - `RuleEngine`: evaluate an owner's rules against an event batch
//! - Provide **in-process infrastructure** (in-memory rule store) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `rulekeeper-domain` only (plus `tokio::sync` for locks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod engine;
pub mod memory_store;
pub mod ports;
pub mod services;
