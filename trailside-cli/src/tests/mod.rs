//! Shared test harness modules for the Trailside CLI.

use super::*;

mod classify_steps;
mod helpers;
mod unit;
