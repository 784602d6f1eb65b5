//! Metric calculation and report serialization for array space data.
//!
//! This crate is pure data processing: it turns a volume's historical
//! space samples into the five derived report numbers and writes the
//! per-volume rows to the CSV report. All network I/O lives in
//! `asr-array`.

/// Derived space metrics for one volume over the report window.
pub mod metrics {
    use asr_array::space::SpaceSample;

    /// Decimal gigabyte divisor (GB, not GiB).
    pub const BYTES_PER_GB: f64 = 1_000_000_000.0;

    /// Round to two decimal places, half away from zero.
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    /// Convert raw bytes to decimal gigabytes, rounded to two decimals.
    pub fn gigabytes(bytes: u64) -> f64 {
        round2(bytes as f64 / BYTES_PER_GB)
    }

    /// The five numbers reported per volume.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SpaceMetrics {
        pub current_ratio: f64,
        pub past_ratio: f64,
        pub current_size_gb: f64,
        pub past_size_gb: f64,
        /// Size change over the window: current minus past, may be
        /// negative for shrinking volumes.
        pub growth_gb: f64,
    }

    impl SpaceMetrics {
        /// Derive metrics from a newest-first sample series.
        ///
        /// The first element is the current snapshot and the last is
        /// the oldest available one (the "90 days ago" point, or
        /// younger for a young volume). Returns `None` for an empty
        /// series; the array should never return one, but a missing
        /// history is a reason to skip the volume, not to panic.
        ///
        /// Growth is computed from the already-rounded sizes and then
        /// rounded again, so the reported columns always reconcile:
        /// `growth_gb == round2(current_size_gb - past_size_gb)`.
        pub fn from_samples(samples: &[SpaceSample]) -> Option<Self> {
            let newest = samples.first()?;
            let oldest = samples.last()?;

            let current_size_gb = gigabytes(newest.total_bytes);
            let past_size_gb = gigabytes(oldest.total_bytes);

            Some(SpaceMetrics {
                current_ratio: round2(newest.data_reduction),
                past_ratio: round2(oldest.data_reduction),
                current_size_gb,
                past_size_gb,
                growth_gb: round2(current_size_gb - past_size_gb),
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use asr_array::space::SpaceSample;

        fn sample(data_reduction: f64, total_bytes: u64) -> SpaceSample {
            SpaceSample {
                data_reduction,
                total_bytes,
                time: None,
            }
        }

        #[test]
        fn test_round2() {
            assert_eq!(round2(2.556), 2.56);
            assert_eq!(round2(2.554), 2.55);
            assert_eq!(round2(2.0), 2.0);
            // 0.125 is exact in binary, so the half case is deterministic:
            // rounds away from zero.
            assert_eq!(round2(0.125), 0.13);
            assert_eq!(round2(-0.125), -0.13);
        }

        #[test]
        fn test_gigabytes_decimal_divisor() {
            // 50 GB must use the decimal divisor, not 2^30.
            assert_eq!(gigabytes(50_000_000_000), 50.0);
            assert_eq!(gigabytes(1_500_000_000), 1.5);
            assert_eq!(gigabytes(0), 0.0);
        }

        #[test]
        fn test_from_samples_newest_first() {
            let samples = vec![sample(2.5, 10_000_000_000), sample(2.0, 8_000_000_000)];
            let m = SpaceMetrics::from_samples(&samples).unwrap();
            assert_eq!(m.current_ratio, 2.5);
            assert_eq!(m.past_ratio, 2.0);
            assert_eq!(m.current_size_gb, 10.0);
            assert_eq!(m.past_size_gb, 8.0);
            assert_eq!(m.growth_gb, 2.0);
        }

        #[test]
        fn test_from_samples_single_sample() {
            // A brand-new volume has only the current snapshot; the
            // oldest sample degenerates to it and growth is zero.
            let samples = vec![sample(3.1, 4_000_000_000)];
            let m = SpaceMetrics::from_samples(&samples).unwrap();
            assert_eq!(m.current_ratio, 3.1);
            assert_eq!(m.past_ratio, 3.1);
            assert_eq!(m.current_size_gb, 4.0);
            assert_eq!(m.past_size_gb, 4.0);
            assert_eq!(m.growth_gb, 0.0);
        }

        #[test]
        fn test_from_samples_no_growth() {
            let samples = vec![sample(2.0, 8_000_000_000), sample(2.0, 8_000_000_000)];
            let m = SpaceMetrics::from_samples(&samples).unwrap();
            assert_eq!(m.growth_gb, 0.0);
        }

        #[test]
        fn test_from_samples_shrinking_volume() {
            let samples = vec![sample(2.0, 6_000_000_000), sample(2.0, 9_000_000_000)];
            let m = SpaceMetrics::from_samples(&samples).unwrap();
            assert_eq!(m.growth_gb, -3.0);
        }

        #[test]
        fn test_from_samples_empty() {
            assert!(SpaceMetrics::from_samples(&[]).is_none());
        }

        #[test]
        fn test_growth_is_subtract_then_round() {
            // Growth is derived from the rounded sizes, so the printed
            // columns reconcile exactly.
            let samples = vec![sample(1.0, 10_006_000_000), sample(1.0, 10_001_000_000)];
            let m = SpaceMetrics::from_samples(&samples).unwrap();
            assert_eq!(m.current_size_gb, 10.01);
            assert_eq!(m.past_size_gb, 10.0);
            assert_eq!(m.growth_gb, round2(m.current_size_gb - m.past_size_gb));
        }
    }
}

/// CSV report writing: filename, header, number formatting, rows.
pub mod report {
    use super::metrics::SpaceMetrics;
    use chrono::NaiveDate;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;

    /// The six fixed report columns, in order.
    pub const HEADER: [&str; 6] = [
        "Volume_Name",
        "Current_Data_Reduction",
        "Data_Reduction_90_Days_Ago",
        "Current_Size(GB)",
        "Size_90_Days_Ago(GB)",
        "90_Day_Growth(GB)",
    ];

    /// Report filename for a run date and array address:
    /// `space-report-MM-DD-YY-<host>.csv`. Deterministic, so a same-day
    /// rerun overwrites the previous report.
    pub fn report_filename(run_date: NaiveDate, host: &str) -> String {
        format!("space-report-{}-{}.csv", run_date.format("%m-%d-%y"), host)
    }

    /// Format a two-decimal metric for the report: trailing zeros
    /// trimmed but at least one decimal digit kept, so `2.50` prints as
    /// `2.5` and `10.00` as `10.0`.
    pub fn format_metric(value: f64) -> String {
        // Normalize -0.0 so a rounded-away shrink prints as "0.0".
        let value = if value == 0.0 { 0.0 } else { value };
        let fixed = format!("{:.2}", value);
        let trimmed = fixed.trim_end_matches('0');
        if trimmed.ends_with('.') {
            format!("{trimmed}0")
        } else {
            trimmed.to_string()
        }
    }

    /// Writes the space report: header at creation, then one row per
    /// volume in enumeration order.
    pub struct ReportWriter<W: Write> {
        inner: csv::Writer<W>,
    }

    impl ReportWriter<File> {
        /// Create (or overwrite) the report file and write the header.
        pub fn create(path: &Path) -> anyhow::Result<ReportWriter<File>> {
            Self::from_writer(File::create(path)?)
        }
    }

    impl<W: Write> ReportWriter<W> {
        pub fn from_writer(writer: W) -> anyhow::Result<Self> {
            let mut inner = csv::Writer::from_writer(writer);
            inner.write_record(HEADER)?;
            Ok(ReportWriter { inner })
        }

        pub fn write_row(&mut self, volume_name: &str, metrics: &SpaceMetrics) -> anyhow::Result<()> {
            let record = [
                volume_name.to_string(),
                format_metric(metrics.current_ratio),
                format_metric(metrics.past_ratio),
                format_metric(metrics.current_size_gb),
                format_metric(metrics.past_size_gb),
                format_metric(metrics.growth_gb),
            ];
            self.inner.write_record(&record)?;
            Ok(())
        }

        /// Flush and release the underlying writer.
        pub fn finish(mut self) -> anyhow::Result<W> {
            self.inner.flush()?;
            self.inner
                .into_inner()
                .map_err(|e| anyhow::anyhow!("failed to finish report: {}", e.error()))
        }
    }

}
