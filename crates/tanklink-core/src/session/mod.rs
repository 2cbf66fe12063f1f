//! Interactive session driver.
//!
//! A [`Session`] multiplexes one [`Link`] and one line-oriented input
//! stream on a single task. Each iteration does a bounded receive on the
//! link, then a bounded wait for an input line, so neither source can
//! starve the other. An interrupt future is checked alongside every
//! iteration.

pub mod shell;

pub use shell::{usage, ShellInput, EXIT_KEYWORDS};

use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::error::CoreError;
use crate::link::{Connector, Link};

/// Destination for decoded inbound text and operator notices.
pub trait TelemetrySink {
    /// Write one inbound chunk, exactly as received.
    fn write_chunk(&mut self, chunk: &str) -> io::Result<()>;

    /// Report a non-fatal session problem to the operator.
    fn write_notice(&mut self, notice: &str) -> io::Result<()> {
        eprintln!("{}", notice);
        Ok(())
    }

    /// Called once when the session ends.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for Box<T> {
    fn write_chunk(&mut self, chunk: &str) -> io::Result<()> {
        (**self).write_chunk(chunk)
    }

    fn write_notice(&mut self, notice: &str) -> io::Result<()> {
        (**self).write_notice(notice)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

/// Writes inbound text verbatim and flushes after every chunk.
pub struct RawSink<W: Write> {
    out: W,
}

impl<W: Write> RawSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TelemetrySink for RawSink<W> {
    fn write_chunk(&mut self, chunk: &str) -> io::Result<()> {
        self.out.write_all(chunk.as_bytes())?;
        self.out.flush()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// How long each iteration waits for an input line
    pub input_poll: Duration,
    /// Pause before the first iteration so the remote's greeting is
    /// already buffered
    pub settle_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            input_poll: Duration::from_millis(100),
            settle_delay: Duration::from_millis(500),
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Operator typed an exit keyword
    Operator,
    /// Interrupt signal
    Interrupt,
    /// Input reached end-of-file and the link then went down, leaving
    /// nothing to relay
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reason: ExitReason,
    pub commands_sent: usize,
    pub send_failures: usize,
    /// Raw bytes read from the link during the session
    pub bytes_received: u64,
}

enum Step {
    Continue,
    Exit(ExitReason),
}

/// The multiplexer loop.
pub struct Session<S> {
    sink: S,
    options: SessionOptions,
    commands_sent: usize,
    send_failures: usize,
    bytes_received: u64,
}

impl<S: TelemetrySink> Session<S> {
    pub fn new(sink: S, options: SessionOptions) -> Self {
        Self {
            sink,
            options,
            commands_sent: 0,
            send_failures: 0,
            bytes_received: 0,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Drive the session until an exit keyword or `interrupt` resolves.
    ///
    /// Once the input ends, telemetry keeps flowing until the interrupt or
    /// until the link goes down.
    ///
    /// Send failures are reported and the loop keeps going. Only I/O errors
    /// on the input stream or the sink end the session with an error. The
    /// link is left as it is; closing it is the caller's job.
    pub async fn run<C, I, F>(
        &mut self,
        link: &mut Link<C>,
        input: I,
        interrupt: F,
    ) -> Result<SessionSummary, CoreError>
    where
        C: Connector,
        I: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        let mut lines = Some(input.lines());
        tokio::pin!(interrupt);

        if !self.options.settle_delay.is_zero() {
            tokio::select! {
                biased;
                () = &mut interrupt => return self.finish(ExitReason::Interrupt),
                () = sleep(self.options.settle_delay) => {}
            }
        }

        loop {
            let step = tokio::select! {
                biased;
                () = &mut interrupt => Step::Exit(ExitReason::Interrupt),
                result = self.step(link, &mut lines) => result?,
            };

            if let Step::Exit(reason) = step {
                return self.finish(reason);
            }
        }
    }

    async fn step<C, I>(
        &mut self,
        link: &mut Link<C>,
        lines: &mut Option<Lines<I>>,
    ) -> Result<Step, CoreError>
    where
        C: Connector,
        I: AsyncBufRead + Unpin,
    {
        let before = link.bytes_received();
        let chunk = link.receive_nonblocking().await;
        self.bytes_received += link.bytes_received() - before;
        if !chunk.is_empty() {
            self.sink.write_chunk(&chunk)?;
        }

        let Some(input) = lines.as_mut() else {
            if link.is_connected() {
                return Ok(Step::Continue);
            }
            info!("input closed and link down");
            return Ok(Step::Exit(ExitReason::InputClosed));
        };

        let line = match timeout(self.options.input_poll, input.next_line()).await {
            Err(_) => return Ok(Step::Continue),
            Ok(line) => line?,
        };

        let Some(line) = line else {
            info!("input stream closed, relaying telemetry until interrupted");
            *lines = None;
            return Ok(Step::Continue);
        };

        match ShellInput::parse(&line) {
            ShellInput::Exit => Ok(Step::Exit(ExitReason::Operator)),
            ShellInput::Empty => Ok(Step::Continue),
            ShellInput::Command(command) => {
                match link.send(command).await {
                    Ok(()) => self.commands_sent += 1,
                    Err(e) => {
                        self.send_failures += 1;
                        warn!(command, error = %e, "command not delivered");
                        self.sink.write_notice(&format!("Send failed: {}", e))?;
                    }
                }
                Ok(Step::Continue)
            }
        }
    }

    fn finish(&mut self, reason: ExitReason) -> Result<SessionSummary, CoreError> {
        self.sink.finish()?;

        let summary = SessionSummary {
            reason,
            commands_sent: self.commands_sent,
            send_failures: self.send_failures,
            bytes_received: self.bytes_received,
        };
        info!(?summary, "session ended");
        Ok(summary)
    }
}
