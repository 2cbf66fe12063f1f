//! RFCOMM (Bluetooth Serial Port Profile) connector backed by BlueZ.

use bluer::rfcomm::{SocketAddr, Stream};
use bluer::Address;
use tracing::debug;

use super::transport::Connector;
use crate::error::ConnectError;
use crate::types::DeviceAddress;

/// RFCOMM channel the ESP32 `BluetoothSerial` SPP server listens on.
pub const SERIAL_PORT_CHANNEL: u8 = 1;

/// Connects to devices over an RFCOMM stream socket.
#[derive(Debug, Clone, Copy)]
pub struct RfcommConnector {
    channel: u8,
}

impl RfcommConnector {
    pub fn new(channel: u8) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }
}

impl Default for RfcommConnector {
    fn default() -> Self {
        Self::new(SERIAL_PORT_CHANNEL)
    }
}

impl Connector for RfcommConnector {
    type Stream = Stream;

    async fn connect(&self, address: &DeviceAddress) -> Result<Stream, ConnectError> {
        let addr = parse_address(address)?;
        debug!(%addr, channel = self.channel, "opening RFCOMM socket");

        Stream::connect(SocketAddr::new(addr, self.channel))
            .await
            .map_err(|source| ConnectError::Transport {
                address: address.to_string(),
                source,
            })
    }
}

/// Parse an endpoint address as a Bluetooth MAC address.
pub fn parse_address(address: &DeviceAddress) -> Result<Address, ConnectError> {
    address
        .as_str()
        .trim()
        .parse()
        .map_err(|_| ConnectError::InvalidAddress(address.to_string()))
}
