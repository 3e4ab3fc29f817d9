use crate::{used_percent, Collector, Result};
use sysinfo::System;

pub struct MemoryCollector {
    system: System,
}

impl MemoryCollector {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for MemoryCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for MemoryCollector {
    type Reading = f64;

    fn name(&self) -> &str {
        "memory"
    }

    fn collect(&mut self) -> Result<f64> {
        self.system.refresh_memory();
        Ok(used_percent(
            self.system.total_memory(),
            self.system.available_memory(),
        ))
    }
}
