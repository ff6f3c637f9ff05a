//! Code for reading the (optional) carbon reduction measures CSV file.
use super::*;
use crate::measure::{MeasureCollection, ReductionMeasure};
use std::path::Path;

const MEASURES_FILE_NAME: &str = "measures.csv";

/// Read the one-time carbon reduction measures for a variant.
///
/// The measures file is optional. If it is absent, an empty collection is returned.
///
/// # Arguments
///
/// * `variant_dir` - Folder containing variant input files
/// * `analysis_duration` - Number of years in the analysis
pub fn read_measures(variant_dir: &Path, analysis_duration: u32) -> Result<MeasureCollection> {
    let file_path = variant_dir.join(MEASURES_FILE_NAME);
    let Some(measures_csv) = read_csv_optional::<ReductionMeasure>(&file_path)? else {
        return Ok(MeasureCollection::new());
    };

    read_measures_from_iter(measures_csv, analysis_duration)
        .with_context(|| input_err_msg(&file_path))
}

fn read_measures_from_iter<I>(iter: I, analysis_duration: u32) -> Result<MeasureCollection>
where
    I: Iterator<Item = ReductionMeasure>,
{
    let measures = read_catalog_from_iter(iter)?;
    for measure in measures.iter() {
        ensure!(
            measure.year < analysis_duration,
            "Year {} for measure {} is outside the analysis period (0 to {})",
            measure.year,
            measure.name,
            analysis_duration - 1
        );
        ensure!(
            measure.cost.is_finite() && measure.kg_co2.is_finite(),
            "Cost and CO2 for measure {} must be finite numbers",
            measure.name
        );
    }

    Ok(measures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, measure};
    use crate::measure::MeasureType;
    use crate::units::{KgCO2, Money};
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_read_measures() {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(MEASURES_FILE_NAME)).unwrap();
            writeln!(
                file,
                "measure_type,name,year,cost,kg_co2,country_name,labor_fraction
PERFORMANCE,Air Sealing,0,1500.0,20.0,USA,0.8
NON_PERFORMANCE,Roof Membrane,12,4000.0,300.0,Canada,0.3"
            )
            .unwrap();
        }

        let measures = read_measures(dir.path(), 30).unwrap();
        assert_eq!(measures.len(), 2);
        let membrane = measures.get("Roof Membrane").unwrap();
        assert_eq!(membrane.measure_type, MeasureType::NonPerformance);
        assert_eq!(membrane.year, 12);
        assert_eq!(membrane.cost, Money(4000.0));
        assert_eq!(membrane.kg_co2, KgCO2(300.0));
        assert_eq!(membrane.country_name, "Canada");
        assert_eq!(measures.performance_measures().len(), 1);
    }

    #[test]
    fn test_read_measures_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_measures(dir.path(), 30).unwrap().is_empty());
    }

    #[rstest]
    #[case(0, true)]
    #[case(29, true)]
    #[case(30, false)]
    fn test_read_measures_from_iter_year(
        measure: ReductionMeasure,
        #[case] year: u32,
        #[case] valid: bool,
    ) {
        let measure = ReductionMeasure { year, ..measure };
        let result = read_measures_from_iter([measure].into_iter(), 30);
        if valid {
            assert!(result.is_ok());
        } else {
            assert_error!(
                result,
                "Year 30 for measure Test Measure 1 is outside the analysis period (0 to 29)"
            );
        }
    }
}
