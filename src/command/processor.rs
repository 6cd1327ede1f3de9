//! Executes parsed commands against an engine and writes the wire output.
//!
//! Two front ends share the same processor: [`CommandProcessor::run`] parses
//! and executes on one thread, [`run_threaded`] splits parsing onto a
//! producer thread that feeds a FIFO channel while the consumer executes in
//! dequeue order. Either way the engine sees a serialized call stream and
//! the output sink is written from exactly one thread.

use std::io::{self, BufRead, Write};
use std::thread;

use tracing::trace;

use crate::engine::MatchingEngine;

use super::Command;

pub struct CommandProcessor<W: Write> {
    engine: MatchingEngine,
    out: W,
}

impl<W: Write> CommandProcessor<W> {
    pub fn new(out: W) -> Self {
        Self {
            engine: MatchingEngine::new(),
            out,
        }
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Recover the output sink, e.g. a test buffer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Execute one command, writing any trades or the book rendering.
    pub fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Submit {
                side,
                tif,
                price,
                qty,
                order_id,
            } => {
                let trades = self.engine.submit(side, tif, price, qty, order_id);
                for trade in trades {
                    writeln!(self.out, "{}", trade)?;
                }
            }
            Command::Cancel { order_id } => self.engine.cancel(&order_id),
            Command::Modify {
                order_id,
                side,
                price,
                qty,
            } => {
                let trades = self.engine.modify(&order_id, side, price, qty);
                for trade in trades {
                    writeln!(self.out, "{}", trade)?;
                }
            }
            Command::Print => write!(self.out, "{}", self.engine.book())?,
            Command::Clear => self.engine.clear(),
        }
        Ok(())
    }

    /// Parse and execute every line of `input`, discarding malformed lines.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match line.parse::<Command>() {
                Ok(command) => self.execute(command)?,
                Err(super::ParseError::Empty) => {}
                Err(err) => trace!(line = %line, %err, "discarding malformed command line"),
            }
        }
        self.out.flush()
    }
}

/// Run with parsing and matching on separate threads.
///
/// The producer parses `input` and pushes commands onto an unbounded FIFO
/// channel; the consumer pops and executes them here. Commands execute in
/// exactly the order they were enqueued and every enqueued command runs to
/// completion: once the producer hits end of input it drops its sender, the
/// channel disconnects, and the consumer drains what is left before
/// returning.
pub fn run_threaded<R, W>(input: R, out: W) -> io::Result<()>
where
    R: BufRead + Send,
    W: Write,
{
    let mut processor = CommandProcessor::new(out);
    let (sender, receiver) = crossbeam_channel::unbounded::<Command>();

    thread::scope(|scope| -> io::Result<()> {
        scope.spawn(move || {
            for line in input.lines() {
                let Ok(line) = line else { break };
                match line.parse::<Command>() {
                    Ok(command) => {
                        if sender.send(command).is_err() {
                            break;
                        }
                    }
                    Err(super::ParseError::Empty) => {}
                    Err(err) => trace!(line = %line, %err, "discarding malformed command line"),
                }
            }
        });

        for command in receiver {
            processor.execute(command)?;
        }
        processor.out.flush()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_serial(input: &str) -> String {
        let mut processor = CommandProcessor::new(Vec::new());
        processor.run(input.as_bytes()).unwrap();
        String::from_utf8(processor.into_inner()).unwrap()
    }

    #[test]
    fn test_execute_writes_trades_and_print() {
        let output = run_serial("BUY GFD 1000 10 order1\nSELL GFD 900 20 order2\nPRINT\n");
        assert_eq!(
            output,
            "TRADE order1 1000 10 order2 900 10\nSELL:\n900 10\nBUY:\n"
        );
    }

    #[test]
    fn test_malformed_lines_are_discarded() {
        let output = run_serial("BUY GFD a 5 order1\nBUY GFD 900 b order1\nNOPE\n\nPRINT\n");
        assert_eq!(output, "SELL:\nBUY:\n");
    }

    #[test]
    fn test_threaded_matches_serial_output() {
        let input = "BUY GFD 1000 10 order1\n\
                     BUY GFD 1010 10 order2\n\
                     SELL GFD 1000 15 order3\n\
                     PRINT\n";
        let mut threaded = Vec::new();
        run_threaded(input.as_bytes(), &mut threaded).unwrap();
        assert_eq!(String::from_utf8(threaded).unwrap(), run_serial(input));
    }
}
