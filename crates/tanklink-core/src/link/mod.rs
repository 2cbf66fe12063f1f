//! Link to the remote controller.
//!
//! A [`Link`] owns at most one connection. Every I/O failure is absorbed
//! into the link state: the link flips to [`LinkState::Disconnected`] and
//! stays there until [`Link::connect`] is called again.

#[cfg(feature = "bluetooth")]
pub mod rfcomm;
pub mod transport;

#[cfg(feature = "bluetooth")]
pub use rfcomm::RfcommConnector;
pub use transport::Connector;

use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::{ConnectError, SendError};
use crate::protocol::{encode_line, Utf8Decoder};
use crate::types::DeviceAddress;

/// Largest chunk read from the link in one receive.
pub const RECEIVE_BUFFER_SIZE: usize = 1024;

/// Timing bounds for link operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkOptions {
    /// Upper bound on a connection attempt
    pub connect_timeout: Duration,
    /// Read deadline for [`Link::receive_nonblocking`]
    pub receive_timeout: Duration,
    /// Upper bound on writing (and flushing) one command, and on closing
    pub send_timeout: Duration,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            receive_timeout: Duration::from_millis(500),
            send_timeout: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connected,
}

/// Owned connection handle to one remote device.
pub struct Link<C: Connector> {
    connector: C,
    address: DeviceAddress,
    options: LinkOptions,
    stream: Option<C::Stream>,
    decoder: Utf8Decoder,
    bytes_received: u64,
}

impl<C: Connector> Link<C> {
    /// Create a disconnected link to `address`.
    pub fn new(connector: C, address: DeviceAddress, options: LinkOptions) -> Self {
        Self {
            connector,
            address,
            options,
            stream: None,
            decoder: Utf8Decoder::new(),
            bytes_received: 0,
        }
    }

    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    /// Raw bytes read off the wire over the life of this link, including
    /// any the decoder dropped or is still holding back.
    pub fn bytes_received(&self) -> u64 {
        self.bytes_received
    }

    pub fn state(&self) -> LinkState {
        if self.stream.is_some() {
            LinkState::Connected
        } else {
            LinkState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == LinkState::Connected
    }

    /// Open the connection. No retries; a no-op when already connected.
    pub async fn connect(&mut self) -> Result<(), ConnectError> {
        if self.stream.is_some() {
            debug!(address = %self.address, "already connected");
            return Ok(());
        }

        info!(address = %self.address, "connecting");

        let stream = timeout(
            self.options.connect_timeout,
            self.connector.connect(&self.address),
        )
        .await
        .map_err(|_| ConnectError::Timeout {
            address: self.address.to_string(),
            timeout: self.options.connect_timeout,
        })??;

        self.decoder.reset();
        self.stream = Some(stream);

        info!(address = %self.address, "connected");
        Ok(())
    }

    /// Close the connection if open. Idempotent; close errors are swallowed.
    pub async fn disconnect(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            match timeout(self.options.send_timeout, stream.shutdown()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => debug!(error = %e, "error while closing link"),
                Err(_) => debug!("timed out while closing link"),
            }
            info!(address = %self.address, "disconnected");
        }
        self.decoder.reset();
    }

    /// Send one command, newline-terminated.
    ///
    /// Fails with [`SendError::NotConnected`] without any I/O when the link
    /// is down. A transport failure or write timeout drops the link.
    pub async fn send(&mut self, text: &str) -> Result<(), SendError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(SendError::NotConnected);
        };

        let payload = encode_line(text);
        let result = match timeout(self.options.send_timeout, write_payload(stream, &payload)).await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(SendError::Transport(e)),
            Err(_) => Err(SendError::Timeout(self.options.send_timeout)),
        };

        match &result {
            Ok(()) => debug!(command = text, "sent"),
            Err(e) => {
                warn!(address = %self.address, error = %e, "send failed, link dropped");
                self.drop_stream();
            }
        }
        result
    }

    /// One bounded read. Returns decoded text, or an empty string when
    /// nothing arrived in time, the link is down, or the read failed.
    ///
    /// A read failure or end-of-stream drops the link.
    pub async fn receive_nonblocking(&mut self) -> String {
        let Some(stream) = self.stream.as_mut() else {
            return String::new();
        };

        let mut buf = [0u8; RECEIVE_BUFFER_SIZE];
        match timeout(self.options.receive_timeout, stream.read(&mut buf)).await {
            Err(_) => String::new(),
            Ok(Ok(0)) => {
                info!(address = %self.address, "remote closed the link");
                self.drop_stream();
                String::new()
            }
            Ok(Ok(n)) => {
                self.bytes_received += n as u64;
                self.decoder.decode(&buf[..n])
            }
            Ok(Err(e)) if e.kind() == io::ErrorKind::Interrupted => String::new(),
            Ok(Err(e)) => {
                warn!(address = %self.address, error = %e, "receive failed, link dropped");
                self.drop_stream();
                String::new()
            }
        }
    }

    fn drop_stream(&mut self) {
        self.stream = None;
        self.decoder.reset();
    }
}

async fn write_payload<S: AsyncWrite + Unpin>(stream: &mut S, payload: &[u8]) -> io::Result<()> {
    stream.write_all(payload).await?;
    stream.flush().await
}
