//! Static registry of the five supported datasets.
//!
//! The registry is the only configuration this tool has: no CLI flags, no
//! environment variables. Paths point at pre-cleaned CSVs shipped next to
//! the binary.

use once_cell::sync::Lazy;

/// A selectable dataset: human-readable label plus the CSV it lives in.
#[derive(Debug, Clone, Copy)]
pub struct DatasetDescriptor {
    pub label: &'static str,
    pub path: &'static str,
}

pub static DATASETS: Lazy<Vec<DatasetDescriptor>> = Lazy::new(|| {
    vec![
        DatasetDescriptor {
            label: "COVID-19 Pandemic Data",
            path: "data/clean_covid19.csv",
        },
        DatasetDescriptor {
            label: "H1N1 (Swine Flu) Data",
            path: "data/clean_h1n1.csv",
        },
        DatasetDescriptor {
            label: "Air Pollution (PM2.5)",
            path: "data/clean_pm25_air_pollution.csv",
        },
        DatasetDescriptor {
            label: "Road Accident Fatalities",
            path: "data/clean_who_road_deaths.csv",
        },
        DatasetDescriptor {
            label: "Conflict & War Fatalities",
            path: "data/clean_conflict_fatalities.csv",
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_five_fixed_entries() {
        assert_eq!(DATASETS.len(), 5);
        let labels: Vec<&str> = DATASETS.iter().map(|d| d.label).collect();
        assert!(labels.contains(&"COVID-19 Pandemic Data"));
        assert!(labels.contains(&"Conflict & War Fatalities"));
    }
}
