//! Tabletop campaign model: campaigns.
//!
//! Responsible for campaigns, the scenes they contain, and the binding of
//! connected player sessions to characters. The application layer adds the
//! in-memory registry that serializes access to each campaign, plus the
//! command and query handlers that outer layers call.

pub mod application;
pub mod domain;
