//! Delivery of motion commands to the writing robot.

use std::io::{self, Write};

use log::{debug, info};
use penwriter_core::MotionInstruction;
use penwriter_layout::LayoutError;
use thiserror::Error;

/// Commands that put the robot into drawing mode before any text.
pub const BOOTSTRAP_COMMANDS: [&str; 3] = ["G1 X0 Y0 F1000", "M3", "S0"];

/// Destination for command lines.
pub trait CommandSink {
    /// Send one command. `line` carries no trailing newline.
    fn send(&mut self, line: &str) -> io::Result<()>;
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn send(&mut self, line: &str) -> io::Result<()> {
        (**self).send(line)
    }
}

/// Writes each command as a newline-terminated line to a writer, such as a
/// file, standard output, or an opened serial device.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap `writer`. Commands are not flushed until [WriterSink::flush].
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Unwrap the writer without flushing it.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommandSink for WriterSink<W> {
    fn send(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    /// The sink rejected a command.
    #[error("sending failed after {sent} commands: {source}")]
    Transport {
        sent: usize,
        #[source]
        source: io::Error,
    },
    /// The instruction stream failed.
    #[error("layout stopped after {sent} commands: {source}")]
    Layout {
        sent: usize,
        #[source]
        source: LayoutError,
    },
}

impl SessionError {
    /// Commands delivered before the failure, bootstrap included.
    pub fn sent(&self) -> usize {
        match self {
            Self::Transport { sent, .. } | Self::Layout { sent, .. } => *sent,
        }
    }
}

/// A drawing session on one sink.
///
/// The bootstrap commands go out once, before the first drawing command.
#[derive(Debug)]
pub struct Session<S> {
    sink: S,
    started: bool,
    sent: usize,
}

impl<S: CommandSink> Session<S> {
    /// A session that has not yet sent the bootstrap commands.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            started: false,
            sent: 0,
        }
    }

    fn send(&mut self, line: &str) -> Result<(), SessionError> {
        self.sink
            .send(line)
            .map_err(|source| SessionError::Transport {
                sent: self.sent,
                source,
            })?;
        self.sent += 1;
        Ok(())
    }

    /// Put the robot into drawing mode. Does nothing if already started.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.started {
            return Ok(());
        }
        for command in BOOTSTRAP_COMMANDS {
            self.send(command)?;
        }
        self.started = true;
        info!("Robot ready to draw");
        Ok(())
    }

    /// Send every instruction in order, stopping at the first failure.
    ///
    /// Instructions are pulled from `instructions` one at a time, so a failing
    /// sink leaves the rest of a lazy layout uncomputed. Returns the number of
    /// drawing commands sent by this call.
    pub fn draw<I>(&mut self, instructions: I) -> Result<usize, SessionError>
    where
        I: IntoIterator<Item = Result<MotionInstruction, LayoutError>>,
    {
        self.start()?;
        let before = self.sent;

        for instruction in instructions {
            let instruction = instruction.map_err(|source| SessionError::Layout {
                sent: self.sent,
                source,
            })?;
            self.send(&instruction.to_string())?;
        }

        let drawn = self.sent - before;
        debug!("Sent {drawn} drawing commands");
        Ok(drawn)
    }

    /// Total commands sent so far, bootstrap included.
    pub fn commands_sent(&self) -> usize {
        self.sent
    }

    /// The sink, for flushing or inspection between draws.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// End the session and hand back the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<W: Write> Session<WriterSink<W>> {
    /// [Session::draw], then flush the writer whether or not drawing
    /// succeeded. A drawing failure is reported ahead of a flush failure.
    pub fn draw_and_flush<I>(&mut self, instructions: I) -> Result<usize, SessionError>
    where
        I: IntoIterator<Item = Result<MotionInstruction, LayoutError>>,
    {
        let drawn = self.draw(instructions);
        let flushed = self
            .sink
            .flush()
            .map_err(|source| SessionError::Transport {
                sent: self.sent,
                source,
            });

        let drawn = drawn?;
        flushed?;
        Ok(drawn)
    }
}
