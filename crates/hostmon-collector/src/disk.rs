use crate::{used_percent, CollectError, Collector, Result};
use std::path::Path;
use sysinfo::Disks;

/// Usage of the filesystem mounted at one mount point.
pub struct DiskCollector {
    disks: Disks,
    mount: String,
}

impl DiskCollector {
    pub fn new(mount: impl Into<String>) -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
            mount: mount.into(),
        }
    }
}

impl Collector for DiskCollector {
    type Reading = f64;

    fn name(&self) -> &str {
        "disk"
    }

    fn collect(&mut self) -> Result<f64> {
        self.disks.refresh(true);
        let mount = Path::new(&self.mount);
        let disk = self
            .disks
            .iter()
            .find(|d| d.mount_point() == mount)
            .ok_or_else(|| CollectError::DiskNotFound {
                mount: self.mount.clone(),
            })?;
        Ok(used_percent(disk.total_space(), disk.available_space()))
    }
}
