//! # rulekeeper-domain
//!
//! Pure domain model for the rulekeeper rules engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Rules** (owner-scoped conditions paired with actions)
//! - Define **Conditions** and their comparison **Operators**
//! - Define **Actions** (effects requested when a rule matches)
//! - Define **Events** (device-property observations)
//! - Parse untyped rule definitions and evaluate rules against events
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod event;
pub mod id;
pub mod rule;
