//! Transport seam between the link and the OS socket layer.

use std::future::Future;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::ConnectError;
use crate::types::DeviceAddress;

/// Opens byte streams to remote devices.
///
/// The RFCOMM implementation lives in [`super::rfcomm`]; tests use in-memory
/// duplex pipes.
pub trait Connector {
    type Stream: AsyncRead + AsyncWrite + Unpin;

    /// Open a stream to `address`. Must not leave anything open on failure.
    fn connect(
        &self,
        address: &DeviceAddress,
    ) -> impl Future<Output = Result<Self::Stream, ConnectError>>;
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use tokio::io::{duplex, DuplexStream};

    use super::*;

    /// Hands out one pre-built duplex stream; the test keeps the remote end.
    pub struct DuplexConnector {
        stream: Mutex<Option<DuplexStream>>,
    }

    impl DuplexConnector {
        /// Returns the connector and the remote side of the pipe.
        pub fn pair() -> (Self, DuplexStream) {
            Self::with_capacity(4096)
        }

        /// Like [`DuplexConnector::pair`], with `capacity` bytes of buffering
        /// in each direction.
        pub fn with_capacity(capacity: usize) -> (Self, DuplexStream) {
            let (local, remote) = duplex(capacity);
            (
                Self {
                    stream: Mutex::new(Some(local)),
                },
                remote,
            )
        }

        /// Arm the connector with a fresh pipe for a reconnect.
        pub fn rearm(&self) -> DuplexStream {
            let (local, remote) = duplex(4096);
            *self.stream.lock().unwrap() = Some(local);
            remote
        }
    }

    impl Connector for DuplexConnector {
        type Stream = DuplexStream;

        async fn connect(&self, address: &DeviceAddress) -> Result<DuplexStream, ConnectError> {
            self.stream
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| ConnectError::Transport {
                    address: address.to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
                })
        }
    }

    /// Never completes a connection attempt.
    pub struct HangingConnector;

    impl Connector for HangingConnector {
        type Stream = DuplexStream;

        async fn connect(&self, _address: &DeviceAddress) -> Result<DuplexStream, ConnectError> {
            std::future::pending().await
        }
    }
}
