//! Classic Bluetooth inquiry scan through BlueZ.

use std::collections::HashSet;
use std::time::Duration;

use bluer::{AdapterEvent, Address, DiscoveryFilter, DiscoveryTransport, Session};
use futures_util::StreamExt;
use tracing::{debug, info};

use super::Scanner;
use crate::error::DiscoveryError;
use crate::types::{DeviceAddress, ScannedDevice};

/// Scans with the default BlueZ adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct BluezScanner;

impl BluezScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Scanner for BluezScanner {
    async fn scan(&self, duration: Duration) -> Result<Vec<ScannedDevice>, DiscoveryError> {
        let session = Session::new().await?;
        let adapter = session
            .default_adapter()
            .await
            .map_err(|e| DiscoveryError::NoAdapter(e.to_string()))?;

        info!(adapter = adapter.name(), "scanning for {:?}", duration);

        if !adapter.is_powered().await? {
            info!("powering on Bluetooth adapter");
            adapter.set_powered(true).await?;
        }

        // SPP lives on BR/EDR; skip LE-only advertisers.
        adapter
            .set_discovery_filter(DiscoveryFilter {
                transport: DiscoveryTransport::BrEdr,
                ..Default::default()
            })
            .await?;

        let mut seen: Vec<Address> = Vec::new();
        {
            let events = adapter.discover_devices().await?;
            tokio::pin!(events);

            let deadline = tokio::time::sleep(duration);
            tokio::pin!(deadline);

            let mut known = HashSet::new();
            loop {
                tokio::select! {
                    Some(event) = events.next() => {
                        if let AdapterEvent::DeviceAdded(addr) = event {
                            if known.insert(addr) {
                                debug!(%addr, "device seen");
                                seen.push(addr);
                            }
                        }
                    }
                    _ = &mut deadline => break,
                }
            }
        }

        // Names often resolve after the device first shows up, so look
        // them up once the scan window has closed.
        let mut devices = Vec::with_capacity(seen.len());
        for addr in seen {
            let device = adapter.device(addr)?;
            match device.name().await {
                Ok(Some(name)) => {
                    devices.push(ScannedDevice::new(DeviceAddress::new(addr.to_string()), name))
                }
                Ok(None) => debug!(%addr, "skipping device without a name"),
                Err(e) => debug!(%addr, error = %e, "name lookup failed"),
            }
        }

        Ok(devices)
    }
}
