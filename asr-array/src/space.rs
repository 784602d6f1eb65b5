use serde::Deserialize;

/// Historical window passed to the space query. The array retains 90
/// days of periodic space snapshots; the report always asks for the
/// whole window.
pub const HISTORICAL_WINDOW: &str = "90d";

/// One space snapshot from a volume's historical series.
///
/// The array returns the series newest-first: index 0 is the most
/// recent snapshot and the last element is the oldest available one.
/// For a volume younger than the window the oldest element is simply
/// the earliest sample the array has, not a true 90-day-old point.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceSample {
    /// Logical capacity divided by physical capacity; values >= 1.0
    /// indicate savings from compression/deduplication.
    #[serde(default = "default_data_reduction")]
    pub data_reduction: f64,
    /// Physical bytes consumed by volume data. The wire field is named
    /// "volumes" by the array API.
    #[serde(rename = "volumes")]
    pub total_bytes: u64,
    /// Snapshot timestamp as reported by the array.
    #[serde(default)]
    pub time: Option<String>,
}

fn default_data_reduction() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::SpaceSample;

    // Shape of GET /api/1.12/volume/vol1?space=true&historical=90d,
    // trimmed to the fields the report consumes.
    const SPACE_HISTORY: &str = r#"[
        {"name": "vol1", "data_reduction": 2.5, "volumes": 10000000000, "time": "2024-06-01T00:00:00Z"},
        {"name": "vol1", "data_reduction": 2.2, "volumes": 9000000000, "time": "2024-04-16T00:00:00Z"},
        {"name": "vol1", "data_reduction": 2.0, "volumes": 8000000000, "time": "2024-03-03T00:00:00Z"}
    ]"#;

    #[test]
    fn test_parse_space_history_newest_first() {
        let samples: Vec<SpaceSample> = serde_json::from_str(SPACE_HISTORY).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].data_reduction, 2.5);
        assert_eq!(samples[0].total_bytes, 10_000_000_000);
        assert_eq!(samples.last().unwrap().data_reduction, 2.0);
        assert_eq!(samples.last().unwrap().total_bytes, 8_000_000_000);
    }

    #[test]
    fn test_missing_data_reduction_defaults_to_one() {
        let samples: Vec<SpaceSample> =
            serde_json::from_str(r#"[{"volumes": 0}]"#).unwrap();
        assert_eq!(samples[0].data_reduction, 1.0);
        assert_eq!(samples[0].total_bytes, 0);
        assert_eq!(samples[0].time, None);
    }
}
