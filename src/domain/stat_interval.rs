use serde::{Deserialize, Deserializer, Serialize};

use super::JobStatus;

/// One usage observation bucket for a `(timestamp, job_queue, status)` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatInterval {
    /// Bucket start, epoch seconds.
    #[serde(deserialize_with = "deserialize_epoch_seconds")]
    pub timestamp: i64,
    pub job_queue: String,
    pub status: JobStatus,
    #[serde(flatten)]
    pub measures: Measures,
    /// Bucket width in seconds.
    #[serde(default)]
    pub interval: i64,
}

/// The four additive resource measures of a stat interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measures {
    pub vcpu_seconds: f64,
    pub memory_seconds: f64,
    pub instance_seconds: f64,
    pub job_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    VcpuSeconds,
    MemorySeconds,
    InstanceSeconds,
    JobCount,
}

impl Measure {
    pub const ALL: [Measure; 4] = [
        Measure::VcpuSeconds,
        Measure::MemorySeconds,
        Measure::InstanceSeconds,
        Measure::JobCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::VcpuSeconds => "vcpu_seconds",
            Measure::MemorySeconds => "memory_seconds",
            Measure::InstanceSeconds => "instance_seconds",
            Measure::JobCount => "job_count",
        }
    }
}

impl Measures {
    pub fn get(&self, measure: Measure) -> f64 {
        match measure {
            Measure::VcpuSeconds => self.vcpu_seconds,
            Measure::MemorySeconds => self.memory_seconds,
            Measure::InstanceSeconds => self.instance_seconds,
            Measure::JobCount => self.job_count as f64,
        }
    }

    pub fn add(&mut self, other: &Measures) {
        self.vcpu_seconds += other.vcpu_seconds;
        self.memory_seconds += other.memory_seconds;
        self.instance_seconds += other.instance_seconds;
        self.job_count += other.job_count;
    }

    pub fn scaled(&self, factor: u64) -> Measures {
        let f = factor as f64;
        Measures {
            vcpu_seconds: self.vcpu_seconds * f,
            memory_seconds: self.memory_seconds * f,
            instance_seconds: self.instance_seconds * f,
            job_count: self.job_count * factor,
        }
    }

    /// Mean job duration in seconds (`instance_seconds / job_count`).
    pub fn avg_job_duration(&self) -> f64 {
        ratio(self.instance_seconds, self.job_count as f64)
    }

    /// Mean vCPUs per running job (`vcpu_seconds / instance_seconds`).
    pub fn avg_vcpu(&self) -> f64 {
        ratio(self.vcpu_seconds, self.instance_seconds)
    }

    /// Mean memory per running job in GB. Memory is stored in MB-seconds.
    pub fn avg_memory_gb(&self) -> f64 {
        ratio(self.memory_seconds, self.instance_seconds) / 1000.0
    }

    /// vCPUs running on average across the reporting window.
    pub fn vcpu_rate(&self, window_seconds: f64) -> f64 {
        ratio(self.vcpu_seconds, window_seconds)
    }

    /// GB of memory in use on average across the reporting window.
    pub fn memory_rate_gb(&self, window_seconds: f64) -> f64 {
        ratio(self.memory_seconds, window_seconds) / 1000.0
    }

    /// Jobs per hour across the reporting window.
    pub fn job_rate_per_hour(&self, window_seconds: f64) -> f64 {
        ratio(self.job_count as f64, window_seconds) * 3600.0
    }
}

/// Division that yields NaN for a zero denominator, whatever the numerator.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

fn deserialize_epoch_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.trunc() as i64)
}
