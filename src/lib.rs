//! Common functionality for the ADORB building retrofit cost calculator.
//!
//! ADORB (Annualized De-carbonization Of Retrofitted Buildings) is a life-cycle cost metric for a
//! building design. It combines direct energy, operational carbon, maintenance, embodied carbon and
//! grid transition costs, each discounted to present value, over a multi-decade analysis period.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod adorb;
pub mod catalog;
pub mod cli;
pub mod construction;
pub mod cost_estimate;
pub mod energy_results;
pub mod equipment;
pub mod finance;
pub mod fuel;
pub mod grid_region;
pub mod id;
pub mod input;
pub mod log;
pub mod measure;
pub mod national_emissions;
pub mod operational;
pub mod output;
pub mod schedule;
pub mod settings;
pub mod units;
pub mod variant;

#[cfg(test)]
mod fixture;

/// Get config dir for program.
///
/// Falls back to the current directory if the platform has no config dir.
pub fn get_adorb_config_dir() -> PathBuf {
    let Some(mut dir) = dirs::config_dir() else {
        return PathBuf::from(".");
    };

    dir.push("adorb");
    dir
}
