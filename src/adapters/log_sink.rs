//! Line-oriented event sink adapter.
//!
//! Implements [`EventSink`] by writing one `vbelt:<speed>` line per
//! accepted key to a writer (stdout in production).  Lifecycle events go
//! to the logger only, so the writer carries nothing but speed lines.
//!
//! Lines end in a bare `\n`.  An interactive terminal in raw mode does not
//! return the cursor on `\n`, so a sink writing to a TTY is switched to
//! `\r\n` with [`LineEventSink::raw_terminal`].

use core::fmt::Write as _;
use std::io::Write;

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Longest line the sink formats (`vbelt:-123456.7\r\n` fits comfortably).
const LINE_CAP: usize = 32;

/// Adapter that prints every speed change as `vbelt:<m/s, 1 decimal>`.
pub struct LineEventSink<W: Write> {
    out: W,
    lines: u64,
    line_ending: &'static str,
}

impl<W: Write> LineEventSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            lines: 0,
            line_ending: "\n",
        }
    }

    /// End lines with `\r\n` for a terminal whose output processing is off.
    #[must_use]
    pub fn raw_terminal(mut self) -> Self {
        self.line_ending = "\r\n";
        self
    }

    /// Speed lines written so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_speed(&mut self, speed: f64) {
        let mut line: heapless::String<LINE_CAP> = heapless::String::new();
        if write!(line, "vbelt:{:.1}{}", speed, self.line_ending).is_err() {
            warn!("Speed {} does not fit a {}-byte line, dropped", speed, LINE_CAP);
            return;
        }
        match self.out.write_all(line.as_bytes()).and_then(|()| self.out.flush()) {
            Ok(()) => self.lines += 1,
            Err(e) => warn!("Failed to write speed line: {}", e),
        }
    }
}

impl<W: Write> EventSink for LineEventSink<W> {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::SpeedChanged { speed, .. } => self.write_speed(*speed),
            AppEvent::Started { time_step_ms } => {
                info!("START | step={}ms", time_step_ms);
            }
            AppEvent::Stopped { ticks } => {
                info!("STOP | ticks={} lines={}", ticks, self.lines);
            }
        }
    }
}
