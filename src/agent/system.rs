//! Host sampling using the sysinfo crate
//!
//! Real readings are only produced when the metrics feature is enabled;
//! without it the agent still reports `RandomValue` and `PollCount`.

#[cfg(feature = "metrics")]
use sysinfo::System;

/// Source of named gauge readings
pub trait Sampler: Send {
    /// Take one set of readings
    fn sample(&mut self) -> Vec<(String, f64)>;
}

/// Memory and CPU figures of the host
#[cfg(feature = "metrics")]
pub struct SystemSampler {
    sys: System,
}

#[cfg(feature = "metrics")]
impl SystemSampler {
    pub fn new() -> Self {
        Self {
            sys: System::new_all(),
        }
    }
}

#[cfg(feature = "metrics")]
impl Sampler for SystemSampler {
    fn sample(&mut self) -> Vec<(String, f64)> {
        self.sys.refresh_memory();
        self.sys.refresh_cpu_usage();

        let mut readings = vec![
            ("TotalMemory".to_string(), self.sys.total_memory() as f64),
            ("FreeMemory".to_string(), self.sys.free_memory() as f64),
            ("UsedMemory".to_string(), self.sys.used_memory() as f64),
            ("AvailableMemory".to_string(), self.sys.available_memory() as f64),
            ("TotalSwap".to_string(), self.sys.total_swap() as f64),
            ("UsedSwap".to_string(), self.sys.used_swap() as f64),
            ("CPUutilization".to_string(), self.sys.global_cpu_usage() as f64),
        ];
        for (i, cpu) in self.sys.cpus().iter().enumerate() {
            readings.push((format!("CPUutilization{}", i + 1), cpu.cpu_usage() as f64));
        }
        readings
    }
}

#[cfg(not(feature = "metrics"))]
pub struct SystemSampler;

#[cfg(not(feature = "metrics"))]
impl SystemSampler {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(feature = "metrics"))]
impl Sampler for SystemSampler {
    fn sample(&mut self) -> Vec<(String, f64)> {
        Vec::new()
    }
}

impl Default for SystemSampler {
    fn default() -> Self {
        Self::new()
    }
}
