use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Measure;

/// Metric plotted on the stats chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsMetric {
    AvgVcpu,
    AvgMemory,
    InstanceSeconds,
    VcpuSeconds,
    MemorySeconds,
    JobCount,
}

impl StatsMetric {
    /// Order the metric picker offers them in.
    pub const ORDER: [StatsMetric; 5] = [
        StatsMetric::AvgVcpu,
        StatsMetric::AvgMemory,
        StatsMetric::InstanceSeconds,
        StatsMetric::VcpuSeconds,
        StatsMetric::JobCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatsMetric::AvgVcpu => "avg_vcpu",
            StatsMetric::AvgMemory => "avg_memory",
            StatsMetric::InstanceSeconds => "instance_seconds",
            StatsMetric::VcpuSeconds => "vcpu_seconds",
            StatsMetric::MemorySeconds => "memory_seconds",
            StatsMetric::JobCount => "job_count",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatsMetric::AvgVcpu => "Avg. vCPU Running",
            StatsMetric::AvgMemory => "Avg. Memory Running",
            StatsMetric::InstanceSeconds => "Total Job Time",
            StatsMetric::VcpuSeconds => "Total vCPU Time",
            StatsMetric::MemorySeconds => "Total Memory Time",
            StatsMetric::JobCount => "Job Count",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            StatsMetric::AvgVcpu => "# of vCPU Cores",
            StatsMetric::AvgMemory => "GB",
            StatsMetric::InstanceSeconds => "Job Time",
            StatsMetric::VcpuSeconds => "Compute Time",
            StatsMetric::MemorySeconds => "Memory Time",
            StatsMetric::JobCount => "# of Jobs",
        }
    }

    /// The additive measure behind this metric, `None` for derived averages.
    pub fn measure(&self) -> Option<Measure> {
        match self {
            StatsMetric::InstanceSeconds => Some(Measure::InstanceSeconds),
            StatsMetric::VcpuSeconds => Some(Measure::VcpuSeconds),
            StatsMetric::MemorySeconds => Some(Measure::MemorySeconds),
            StatsMetric::JobCount => Some(Measure::JobCount),
            StatsMetric::AvgVcpu | StatsMetric::AvgMemory => None,
        }
    }
}

/// Chart series key for a queue's metric, e.g. `gpu-queue_vcpu_seconds`.
pub fn lookup_key(queue: &str, metric: &str) -> String {
    format!("{}_{}", queue, metric)
}

impl FromStr for StatsMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avg_vcpu" => Ok(StatsMetric::AvgVcpu),
            "avg_memory" => Ok(StatsMetric::AvgMemory),
            "instance_seconds" => Ok(StatsMetric::InstanceSeconds),
            "vcpu_seconds" => Ok(StatsMetric::VcpuSeconds),
            "memory_seconds" => Ok(StatsMetric::MemorySeconds),
            "job_count" => Ok(StatsMetric::JobCount),
            _ => Err(format!("Invalid stats metric: {}", s)),
        }
    }
}

impl fmt::Display for StatsMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
