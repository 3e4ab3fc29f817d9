use crate::{Collector, CollectError, Result};
use std::time::Duration;
use sysinfo::System;

/// Global CPU usage over a blocking sampling window.
pub struct CpuCollector {
    system: System,
    window: Duration,
}

impl CpuCollector {
    pub fn new(window: Duration) -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        Self {
            system,
            window: window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }
}

impl Collector for CpuCollector {
    type Reading = f64;

    fn name(&self) -> &str {
        "cpu"
    }

    fn collect(&mut self) -> Result<f64> {
        self.system.refresh_cpu_usage();
        std::thread::sleep(self.window);
        self.system.refresh_cpu_usage();

        if self.system.cpus().is_empty() {
            return Err(CollectError::NoCpus);
        }
        Ok(f64::from(self.system.global_cpu_usage()).clamp(0.0, 100.0))
    }
}
