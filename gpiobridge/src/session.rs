use ufmt::{uWrite, uwriteln};

use crate::{
    Config, Dispatcher, Gpio, LineAccumulator, LineError, Reply, Status,
};

/// One serial connection to the bridge.
///
/// A session owns everything needed to serve one byte stream: the line
/// being accumulated, the dispatcher, and the board it drives. Independent
/// sessions share nothing.
///
/// # Type Parameters
///
/// - `G`: The board.
/// - `N`: Longest line accepted.
pub struct Session<G, const N: usize> {
    accumulator: LineAccumulator<N>,
    dispatcher: Dispatcher,
    gpio: G,
}
impl<G: Gpio, const N: usize> Session<G, N> {
    /// Creates a new session.
    ///
    /// # Parameters
    ///
    /// - `config`: Protocol configuration.
    /// - `gpio`: The board that commands run on.
    pub fn new(config: Config, gpio: G) -> Self {
        Self {
            accumulator: LineAccumulator::new(),
            dispatcher: Dispatcher::new(config),
            gpio,
        }
    }

    /// Delivers the next byte received.
    ///
    /// When the byte completes a line, the line is run and its reply is
    /// written to `out` as a single line. Lines that overflowed the buffer
    /// are not run; they are answered with [Status::LineOverflow].
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reply))`: the reply that was written.
    /// - `Ok(None)`: the line is still in progress.
    /// - `Err(error)`: writing the reply failed.
    pub fn deliver_byte<W: uWrite>(
        &mut self,
        byte: u8,
        out: &mut W,
    ) -> Result<Option<Reply>, W::Error> {
        let dispatcher = &self.dispatcher;
        let gpio = &mut self.gpio;
        let reply = self.accumulator.consume_byte(byte, |line| match line {
            Ok(line) => dispatcher.dispatch(line, gpio),
            Err(LineError::Overflow) => Reply::Status(Status::LineOverflow),
        });
        if let Some(reply) = reply {
            uwriteln!(out, "{}", reply)?;
        }
        Ok(reply)
    }

    /// Returns the board.
    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    /// Returns the raw bytes of the line in progress.
    pub fn pending(&self) -> &[u8] {
        self.accumulator.as_bytes()
    }
}
