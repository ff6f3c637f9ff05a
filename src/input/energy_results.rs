//! Code for reading energy simulation results from CSV files.
use super::*;
use crate::energy_results::EnergyResults;
use crate::units::Joules;
use serde::Deserialize;
use std::path::Path;

const HOURLY_RESULTS_FILE_NAME: &str = "hourly_results.csv";
const MONTHLY_METER_FILE_NAME: &str = "monthly_meter.csv";

#[derive(PartialEq, Debug, Deserialize)]
struct HourlyResultRaw {
    hour: u32,
    purchased_electricity_j: Joules,
    surplus_electricity_j: Joules,
}

#[derive(PartialEq, Debug, Deserialize)]
struct MonthlyMeterRaw {
    month: u32,
    natural_gas_j: Joules,
}

/// Read the hourly electricity and monthly gas series for a variant.
///
/// # Arguments
///
/// * `variant_dir` - Folder containing variant input files
pub fn read_energy_results(variant_dir: &Path) -> Result<EnergyResults> {
    let file_path = variant_dir.join(HOURLY_RESULTS_FILE_NAME);
    let hourly_csv = read_csv::<HourlyResultRaw>(&file_path)?;
    let (purchased_electricity, surplus_electricity) =
        read_hourly_results_from_iter(hourly_csv).with_context(|| input_err_msg(&file_path))?;

    let file_path = variant_dir.join(MONTHLY_METER_FILE_NAME);
    let monthly_csv = read_csv::<MonthlyMeterRaw>(&file_path)?;
    let natural_gas =
        read_monthly_meter_from_iter(monthly_csv).with_context(|| input_err_msg(&file_path))?;

    Ok(EnergyResults {
        purchased_electricity,
        surplus_electricity,
        natural_gas,
    })
}

/// Check that an energy value is a finite, non-negative number
fn check_energy(value: Joules, column: &str, row: u32) -> Result<()> {
    ensure!(
        value.is_finite() && value >= Joules(0.0),
        "{column} for row {row} must be a finite number greater than or equal to zero"
    );

    Ok(())
}

fn read_hourly_results_from_iter<I>(iter: I) -> Result<(Vec<Joules>, Vec<Joules>)>
where
    I: Iterator<Item = HourlyResultRaw>,
{
    let mut purchased = Vec::new();
    let mut surplus = Vec::new();
    for (expected_hour, result) in iter.enumerate() {
        ensure!(
            result.hour as usize == expected_hour,
            "Hours must be in order and contiguous, starting at 0 (expected hour {expected_hour}, \
            found {})",
            result.hour
        );
        check_energy(result.purchased_electricity_j, "purchased_electricity_j", result.hour)?;
        check_energy(result.surplus_electricity_j, "surplus_electricity_j", result.hour)?;

        purchased.push(result.purchased_electricity_j);
        surplus.push(result.surplus_electricity_j);
    }

    Ok((purchased, surplus))
}

fn read_monthly_meter_from_iter<I>(iter: I) -> Result<Vec<Joules>>
where
    I: Iterator<Item = MonthlyMeterRaw>,
{
    let records: Vec<_> = iter.collect();
    ensure!(
        is_sorted_and_unique(records.iter().map(|record| record.month)),
        "Months must be in order and unique"
    );

    for record in &records {
        check_energy(record.natural_gas_j, "natural_gas_j", record.month)?;
    }

    Ok(records.into_iter().map(|record| record.natural_gas_j).collect())
}
