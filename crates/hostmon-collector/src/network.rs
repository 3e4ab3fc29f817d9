use crate::{Collector, Result};
use hostmon_common::types::bytes_to_mb;
use sysinfo::Networks;

/// Cumulative traffic across all interfaces since boot, in MB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traffic {
    pub sent_mb: f64,
    pub recv_mb: f64,
}

pub struct NetworkCollector {
    networks: Networks,
}

impl NetworkCollector {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for NetworkCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for NetworkCollector {
    type Reading = Traffic;

    fn name(&self) -> &str {
        "network"
    }

    fn collect(&mut self) -> Result<Traffic> {
        self.networks.refresh(true);
        let (sent, recv) = self
            .networks
            .iter()
            .fold((0u64, 0u64), |(sent, recv), (_, data)| {
                (
                    sent.saturating_add(data.total_transmitted()),
                    recv.saturating_add(data.total_received()),
                )
            });
        Ok(Traffic {
            sent_mb: bytes_to_mb(sent),
            recv_mb: bytes_to_mb(recv),
        })
    }
}
