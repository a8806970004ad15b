//! Comparison statistics.

use std::time::Duration;

use observability::DeltaStatsAggregator;

/// Statistics from one comparison run
#[derive(Debug, Clone, Default)]
pub struct ComparisonStats {
    /// Wall time of the parallel telemetry fetch
    pub fetch: Duration,

    /// Wall time of alignment through assembly
    pub assemble: Duration,

    /// Samples received per driver
    pub raw_samples: [usize; 2],

    pub deltas: DeltaStatsAggregator,
}

impl ComparisonStats {
    /// Render the summary block printed by `--stats`
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.deltas.summary().to_string());
        out.push_str(&format!(
            "Raw samples: {} / {}\n",
            self.raw_samples[0], self.raw_samples[1]
        ));
        out.push_str(&format!(
            "Fetch: {:.1} ms, assemble: {:.1} ms\n",
            self.fetch.as_secs_f64() * 1000.0,
            self.assemble.as_secs_f64() * 1000.0
        ));
        out
    }
}
