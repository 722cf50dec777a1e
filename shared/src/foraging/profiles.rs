//! Species tolerance profiles

use serde::{Deserialize, Serialize};

/// Environmental tolerances within which a species is expected to fruit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MushroomProfile {
    pub name: String,
    /// Inclusive temperature range (°C)
    pub temp_min: f64,
    pub temp_max: f64,
    /// Lower bound on relative humidity (%), no upper bound
    pub humidity_min: f64,
    /// Inclusive daily rainfall range (mm)
    pub rain_min: f64,
    pub rain_max: f64,
    /// Upper bound on wind speed (km/h), no lower bound
    pub wind_max: f64,
}

impl MushroomProfile {
    pub fn new(
        name: &str,
        temp_range: (f64, f64),
        humidity_min: f64,
        rain_range: (f64, f64),
        wind_max: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            temp_min: temp_range.0,
            temp_max: temp_range.1,
            humidity_min,
            rain_min: rain_range.0,
            rain_max: rain_range.1,
            wind_max,
        }
    }

    /// All four conditions must hold; bounds are inclusive
    pub fn tolerates(&self, avg_temp: f64, avg_humidity: f64, avg_rain: f64, avg_wind: f64) -> bool {
        (self.temp_min..=self.temp_max).contains(&avg_temp)
            && avg_humidity >= self.humidity_min
            && (self.rain_min..=self.rain_max).contains(&avg_rain)
            && avg_wind <= self.wind_max
    }
}

/// The compiled-in species table, in declaration order
pub fn default_profiles() -> Vec<MushroomProfile> {
    vec![
        MushroomProfile::new("porcini", (12.0, 28.0), 70.0, (0.1, 80.0), 16.0),
        MushroomProfile::new("chanterelle", (14.0, 26.0), 75.0, (1.0, 60.0), 14.0),
        MushroomProfile::new("morel", (8.0, 20.0), 60.0, (0.5, 40.0), 18.0),
        MushroomProfile::new("oyster", (4.0, 20.0), 80.0, (0.5, 70.0), 20.0),
        MushroomProfile::new("chicken_of_the_woods", (15.0, 30.0), 65.0, (0.2, 50.0), 18.0),
        MushroomProfile::new("hen_of_the_woods", (12.0, 24.0), 70.0, (0.5, 60.0), 15.0),
        MushroomProfile::new("lions_mane", (10.0, 22.0), 80.0, (0.5, 60.0), 12.0),
        MushroomProfile::new("shaggy_ink_cap", (8.0, 22.0), 75.0, (1.0, 90.0), 20.0),
        MushroomProfile::new("field_mushroom", (13.0, 25.0), 70.0, (0.5, 50.0), 22.0),
        MushroomProfile::new("black_trumpet", (12.0, 24.0), 85.0, (2.0, 80.0), 10.0),
        MushroomProfile::new("hedgehog", (6.0, 18.0), 75.0, (0.5, 60.0), 15.0),
        MushroomProfile::new("giant_puffball", (15.0, 27.0), 65.0, (0.3, 40.0), 20.0),
        MushroomProfile::new("saffron_milk_cap", (10.0, 22.0), 70.0, (0.5, 70.0), 16.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_thirteen_species() {
        let profiles = default_profiles();
        assert_eq!(profiles.len(), 13);

        let mut names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_default_table_ranges_are_well_formed() {
        for p in default_profiles() {
            assert!(p.temp_min >= 4.0, "{} temp_min", p.name);
            assert!(p.temp_min <= p.temp_max, "{} temp range", p.name);
            assert!(p.rain_min > 0.0, "{} rain_min", p.name);
            assert!(p.rain_min <= p.rain_max, "{} rain range", p.name);
        }
    }

    #[test]
    fn test_tolerates_boundaries_inclusive() {
        let porcini = MushroomProfile::new("porcini", (12.0, 28.0), 70.0, (0.1, 80.0), 16.0);
        assert!(porcini.tolerates(12.0, 70.0, 0.1, 16.0));
        assert!(porcini.tolerates(28.0, 100.0, 80.0, 0.0));
        assert!(!porcini.tolerates(28.01, 100.0, 10.0, 0.0));
        assert!(!porcini.tolerates(20.0, 69.9, 10.0, 0.0));
        assert!(!porcini.tolerates(20.0, 80.0, 80.5, 0.0));
        assert!(!porcini.tolerates(20.0, 80.0, 10.0, 16.1));
    }
}
