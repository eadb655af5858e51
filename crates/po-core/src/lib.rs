//! # po-core
//!
//! Core types and rule tables for the purchase order administration model.
//!
//! This crate provides the pieces every consumer of purchase order records needs:
//! - Entity structs for the REST records (purchase orders, items, vendors,
//!   status history, audit log and email log entries)
//! - Role, status, permission and audit action enums
//! - Permission resolution from a role plus explicit grants
//! - Route and menu visibility per role
//! - The status state machine with capability gates and timeline markers
//! - Audit trail ordering and display shaping
//! - Financial field projection and per-page action flags
//! - An explicit query cache with per-PO invalidation
//!
//! Everything here is advisory. The backend remains the authority for every
//! permission and status change; these types only mirror its rules so a client
//! can decide what to render.

pub mod access;
pub mod audit_trail;
pub mod cache;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod permissions;
pub mod projection;
pub mod responses;
pub mod timeline;
pub mod transitions;
