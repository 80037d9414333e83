//! Tabletop campaign model: tactical maps.
//!
//! Responsible for the closed set of tile types and their gameplay
//! properties, and for the rectangular tile grids that scenes own.

pub mod domain;
