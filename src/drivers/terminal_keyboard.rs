//! Terminal keyboard driver (crossterm).
//!
//! ## Sampling model
//!
//! The host keyboard reports which key is *currently* pressed.  A terminal
//! only delivers press (and auto-repeat) events, so a reader thread stamps
//! the most recent press with its arrival time and [`poll`] hands it out
//! only while it is fresh (two sample periods).  A press made while the
//! controller is not polling therefore ages out instead of being replayed
//! ticks later, and a held key keeps producing fresh presses through the
//! terminal's auto-repeat.
//!
//! Esc or Ctrl-C clears the shared run flag (raw mode swallows SIGINT).
//!
//! [`poll`]: crate::app::ports::KeyboardPort::poll

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode as TermKey, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::{debug, info, warn};

use crate::app::ports::KeyboardPort;
use crate::error::{Error, Result};
use crate::keys::{self, KeyCode};

/// A press is handed out only if it is at most this many periods old.
const FRESH_PERIODS: u32 = 2;

#[derive(Debug, Clone, Copy)]
struct Press {
    key: KeyCode,
    at: Instant,
}

pub struct TerminalKeyboard {
    running: Arc<AtomicBool>,
    sampling: Arc<AtomicBool>,
    last_press: Arc<Mutex<Option<Press>>>,
    reader: Option<JoinHandle<()>>,
    freshness: Duration,
    raw_mode: bool,
}

impl TerminalKeyboard {
    /// `running` is cleared when the user asks to quit.
    pub fn new(running: Arc<AtomicBool>) -> Self {
        Self {
            running,
            sampling: Arc::new(AtomicBool::new(false)),
            last_press: Arc::new(Mutex::new(None)),
            reader: None,
            freshness: Duration::ZERO,
            raw_mode: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.reader.is_some()
    }

    fn try_enable(&mut self, period: Duration) -> Result<()> {
        if !std::io::stdin().is_terminal() {
            return Err(Error::Init("stdin is not a terminal"));
        }
        terminal::enable_raw_mode()?;
        self.raw_mode = true;

        self.sampling.store(true, Ordering::Release);
        let sampling = Arc::clone(&self.sampling);
        let running = Arc::clone(&self.running);
        let last_press = Arc::clone(&self.last_press);
        let handle = thread::Builder::new()
            .name("keyboard".into())
            .spawn(move || reader_loop(&sampling, &running, &last_press, period))?;
        self.reader = Some(handle);
        Ok(())
    }

    fn restore_terminal(&mut self) {
        if self.raw_mode {
            if let Err(e) = terminal::disable_raw_mode() {
                warn!("Failed to leave raw mode: {}", e);
            }
            self.raw_mode = false;
        }
    }
}

impl KeyboardPort for TerminalKeyboard {
    fn enable(&mut self, sample_period_ms: u32) {
        if self.is_enabled() {
            return;
        }
        let period = Duration::from_millis(u64::from(sample_period_ms.max(1)));
        self.freshness = period * FRESH_PERIODS;

        match self.try_enable(period) {
            Ok(()) => info!("Keyboard enabled (period={}ms): PgUp/PgDn/S, Esc to quit", sample_period_ms),
            Err(e) => {
                warn!("Keyboard unavailable ({}), continuing without key input", e);
                self.sampling.store(false, Ordering::Release);
                self.restore_terminal();
            }
        }
    }

    fn disable(&mut self) {
        self.sampling.store(false, Ordering::Release);
        if let Some(handle) = self.reader.take() {
            if handle.join().is_err() {
                warn!("Keyboard reader thread panicked");
            }
        }
        self.restore_terminal();
    }

    fn poll(&mut self) -> Option<KeyCode> {
        let press = self
            .last_press
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;
        (press.at.elapsed() <= self.freshness).then_some(press.key)
    }
}

impl Drop for TerminalKeyboard {
    fn drop(&mut self) {
        self.disable();
    }
}

fn reader_loop(
    sampling: &AtomicBool,
    running: &AtomicBool,
    last_press: &Mutex<Option<Press>>,
    period: Duration,
) {
    while sampling.load(Ordering::Acquire) {
        match event::poll(period) {
            Ok(true) => match event::read() {
                Ok(Event::Key(ev)) => handle_key(&ev, running, last_press),
                Ok(_) => {}
                Err(e) => {
                    warn!("Keyboard read failed: {}", e);
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                warn!("Keyboard poll failed: {}", e);
                break;
            }
        }
    }
    debug!("Keyboard reader exiting");
}

fn handle_key(ev: &KeyEvent, running: &AtomicBool, last_press: &Mutex<Option<Press>>) {
    if ev.kind == KeyEventKind::Release {
        return;
    }
    if is_quit(ev) {
        info!("Quit requested from keyboard");
        running.store(false, Ordering::Release);
        return;
    }
    if let Some(key) = translate(ev) {
        *last_press.lock().unwrap_or_else(PoisonError::into_inner) = Some(Press {
            key,
            at: Instant::now(),
        });
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    match ev.code {
        TermKey::Esc => true,
        TermKey::Char('c' | 'C') => ev.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Translate a terminal key event into the host's key numbering.
pub fn translate(ev: &KeyEvent) -> Option<KeyCode> {
    let base = match ev.code {
        TermKey::PageUp => KeyCode::new(keys::PAGE_UP),
        TermKey::PageDown => KeyCode::new(keys::PAGE_DOWN),
        TermKey::Up => KeyCode::new(keys::UP),
        TermKey::Down => KeyCode::new(keys::DOWN),
        TermKey::Left => KeyCode::new(keys::LEFT),
        TermKey::Right => KeyCode::new(keys::RIGHT),
        TermKey::Home => KeyCode::new(keys::HOME),
        TermKey::End => KeyCode::new(keys::END),
        TermKey::Char(c) => KeyCode::from_char(c)?,
        _ => return None,
    };

    let mut mods = 0;
    if ev.modifiers.contains(KeyModifiers::SHIFT) {
        mods |= keys::SHIFT;
    }
    if ev.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= keys::CONTROL;
    }
    if ev.modifiers.contains(KeyModifiers::ALT) {
        mods |= keys::ALT;
    }
    Some(base.with_modifiers(mods))
}
