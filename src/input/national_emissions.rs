//! Code for reading national emissions intensities from a CSV file.
use super::*;
use crate::national_emissions::{NationalEmissions, NationalEmissionsMap};
use std::path::Path;

const NATIONAL_EMISSIONS_FILE_NAME: &str = "national_emissions.csv";

/// Read national emissions data for all countries.
///
/// # Arguments
///
/// * `variant_dir` - Folder containing variant input files
///
/// # Returns
///
/// National emissions data keyed by country name, in file order
pub fn read_national_emissions(variant_dir: &Path) -> Result<NationalEmissionsMap> {
    let file_path = variant_dir.join(NATIONAL_EMISSIONS_FILE_NAME);
    let emissions_csv = read_csv::<NationalEmissions>(&file_path)?;
    read_national_emissions_from_iter(emissions_csv).with_context(|| input_err_msg(&file_path))
}

fn read_national_emissions_from_iter<I>(iter: I) -> Result<NationalEmissionsMap>
where
    I: Iterator<Item = NationalEmissions>,
{
    let mut map = NationalEmissionsMap::new();
    for emissions in iter {
        ensure!(
            emissions.kg_co2_per_usd.is_finite(),
            "Emissions factor for {} must be a finite number",
            emissions.country_name
        );

        let country_name = emissions.country_name.clone();
        ensure!(
            map.insert(country_name.clone(), emissions).is_none(),
            "Duplicate national emissions entry for {country_name}"
        );
    }

    Ok(map)
}

/// Get the national emissions data for the given country.
///
/// It is an error if the country is not present.
pub fn get_national_emissions<'a>(
    map: &'a NationalEmissionsMap,
    country_name: &str,
) -> Result<&'a NationalEmissions> {
    map.get(country_name).with_context(|| {
        format!("Country '{country_name}' not found in national emissions data")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use crate::units::KgCO2PerMoney;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_read_national_emissions() {
        let dir = tempdir().unwrap();
        {
            let mut file = File::create(dir.path().join(NATIONAL_EMISSIONS_FILE_NAME)).unwrap();
            writeln!(
                file,
                "country_name,us_trading_rank,gdp_million_usd,co2_mt,kg_co2_per_usd
USA,0,25439700,4713,0.185
Canada,1,2137939,560,0.262"
            )
            .unwrap();
        }

        let map = read_national_emissions(dir.path()).unwrap();
        let countries: Vec<_> = map.keys().collect();
        assert_eq!(countries, ["USA", "Canada"]);

        let canada = get_national_emissions(&map, "Canada").unwrap();
        assert_eq!(canada.us_trading_rank, 1);
        assert_eq!(canada.kg_co2_per_usd, KgCO2PerMoney(0.262));

        assert_error!(
            get_national_emissions(&map, "Atlantis"),
            "Country 'Atlantis' not found in national emissions data"
        );
    }

    #[test]
    fn test_read_national_emissions_duplicate() {
        let emissions = NationalEmissions {
            country_name: "USA".into(),
            us_trading_rank: 0,
            gdp_million_usd: 1.0,
            co2_mt: 1.0,
            kg_co2_per_usd: KgCO2PerMoney(0.185),
        };
        assert_error!(
            read_national_emissions_from_iter([emissions.clone(), emissions].into_iter()),
            "Duplicate national emissions entry for USA"
        );
    }
}
