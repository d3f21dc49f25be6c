use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::error::{Error, Result};

pub const TICK_RATE: Duration = Duration::from_secs(1);
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Events consumed by the engine loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// One second of countdown time.
    Tick,
    /// SIGINT, SIGTERM or SIGHUP delivered to the process.
    Interrupt,
}

pub trait EventSource {
    /// Blocks until the next event.
    fn next_event(&mut self) -> Result<AppEvent>;

    /// Starts a fresh tick period so the next tick is a full period away.
    fn restart_clock(&mut self) {}
}

/// Emits `Tick` every `rate` until its reset handle is dropped.
struct Ticker {
    reset: mpsc::Sender<()>,
    _handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(tx: mpsc::Sender<AppEvent>, rate: Duration) -> Self {
        let (reset, reset_rx) = mpsc::channel();
        let handle = thread::spawn(move || loop {
            match reset_rx.recv_timeout(rate) {
                Ok(()) => {}
                Err(RecvTimeoutError::Timeout) => {
                    if tx.send(AppEvent::Tick).is_err() {
                        return;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => return,
            }
        });

        Self {
            reset,
            _handle: handle,
        }
    }

    fn restart(&self) {
        let _ = self.reset.send(());
    }
}

fn read_terminal(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

/// Merges a one-second ticker and the terminal's key/resize events into one
/// channel with a single consumer.
///
/// The input thread waits at most `poll_interval` per read, so a key press
/// reaches the consumer within that interval even while it is waiting for a
/// tick. Signal interrupts join the same channel through [`Self::sender`].
pub struct TerminalEvents {
    rx: mpsc::Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
    pending: VecDeque<AppEvent>,
    stop: Arc<AtomicBool>,
    ticker: Ticker,
    _input: JoinHandle<()>,
}

impl TerminalEvents {
    pub fn spawn(tick_rate: Duration, poll_interval: Duration) -> Self {
        Self::with_reader(tick_rate, poll_interval, read_terminal)
    }

    /// Like [`Self::spawn`], with `read` standing in for the terminal. It is
    /// called with the poll interval and returns the next event, if any.
    pub fn with_reader<F>(tick_rate: Duration, poll_interval: Duration, mut read: F) -> Self
    where
        F: FnMut(Duration) -> io::Result<Option<Event>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let input_tx = tx.clone();
        let input_stop = Arc::clone(&stop);
        let input = thread::spawn(move || {
            while !input_stop.load(Ordering::Relaxed) {
                let forwarded = match read(poll_interval) {
                    Ok(Some(Event::Key(key))) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Ok(Some(Event::Resize(w, h))) => AppEvent::Resize(w, h),
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal input failed");
                        return;
                    }
                };

                if input_tx.send(forwarded).is_err() {
                    return;
                }
            }
        });

        let ticker = Ticker::spawn(tx.clone(), tick_rate);

        Self {
            rx,
            tx,
            pending: VecDeque::new(),
            stop,
            ticker,
            _input: input,
        }
    }

    /// A handle for feeding events from outside the reader threads.
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }

    /// Routes SIGINT, SIGTERM and SIGHUP into the channel as
    /// [`AppEvent::Interrupt`] instead of killing the process. Can only be
    /// installed once per process.
    pub fn forward_interrupts(&self) -> Result<()> {
        let tx = self.sender();
        ctrlc::set_handler(move || {
            let _ = tx.send(AppEvent::Interrupt);
        })?;
        Ok(())
    }
}

impl Default for TerminalEvents {
    fn default() -> Self {
        Self::spawn(TICK_RATE, POLL_INTERVAL)
    }
}

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> Result<AppEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(event);
        }
        self.rx.recv().map_err(|_| Error::InputClosed)
    }

    fn restart_clock(&mut self) {
        self.ticker.restart();
        // ticks from the previous period are stale; everything else keeps its order
        while let Ok(event) = self.rx.try_recv() {
            if event != AppEvent::Tick {
                self.pending.push_back(event);
            }
        }
    }
}

impl Drop for TerminalEvents {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    const FAR: Duration = Duration::from_secs(3600);

    fn idle(timeout: Duration) -> io::Result<Option<Event>> {
        thread::sleep(timeout);
        Ok(None)
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn ticks_arrive_at_the_tick_rate() {
        let mut events = TerminalEvents::with_reader(Duration::from_millis(20), Duration::from_millis(5), idle);

        let started = Instant::now();
        for _ in 0..5 {
            assert_eq!(events.next_event().unwrap(), AppEvent::Tick);
        }
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(90), "ticks too fast: {elapsed:?}");
        assert!(elapsed < Duration::from_secs(2), "ticks too slow: {elapsed:?}");
    }

    #[test]
    fn ticker_thread_ends_when_dropped() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::spawn(tx, Duration::from_millis(10));
        assert_eq!(rx.recv_timeout(Duration::from_secs(1)), Ok(AppEvent::Tick));

        drop(ticker);
        loop {
            match rx.recv_timeout(Duration::from_secs(1)) {
                Ok(AppEvent::Tick) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
                other => panic!("ticker still running: {other:?}"),
            }
        }
    }

    #[test]
    fn key_reaches_consumer_within_poll_interval() {
        let pressed_at = Instant::now() + Duration::from_millis(30);
        let mut sent = false;
        let reader = move |timeout: Duration| -> io::Result<Option<Event>> {
            if !sent && Instant::now() >= pressed_at {
                sent = true;
                return Ok(Some(Event::Key(key('p'))));
            }
            thread::sleep(timeout);
            Ok(None)
        };
        let mut events = TerminalEvents::with_reader(FAR, Duration::from_millis(5), reader);

        assert_eq!(events.next_event().unwrap(), AppEvent::Key(key('p')));
        let latency = Instant::now().saturating_duration_since(pressed_at);
        assert!(latency < POLL_INTERVAL, "key took {latency:?}");
    }

    #[test]
    fn input_thread_stops_when_dropped() {
        let (alive_tx, alive_rx) = mpsc::channel::<()>();
        let reader = move |timeout: Duration| {
            let _alive = &alive_tx;
            idle(timeout)
        };
        let events = TerminalEvents::with_reader(FAR, Duration::from_millis(5), reader);

        drop(events);
        assert_eq!(
            alive_rx.recv_timeout(Duration::from_secs(1)),
            Err(RecvTimeoutError::Disconnected)
        );
    }

    #[test]
    fn restart_clock_drops_stale_ticks_only() {
        let mut events = TerminalEvents::with_reader(FAR, Duration::from_millis(5), idle);
        let tx = events.sender();
        tx.send(AppEvent::Tick).unwrap();
        tx.send(AppEvent::Key(key('s'))).unwrap();
        tx.send(AppEvent::Tick).unwrap();
        tx.send(AppEvent::Interrupt).unwrap();

        events.restart_clock();
        tx.send(AppEvent::Tick).unwrap();

        assert_eq!(events.next_event().unwrap(), AppEvent::Key(key('s')));
        assert_eq!(events.next_event().unwrap(), AppEvent::Interrupt);
        assert_eq!(events.next_event().unwrap(), AppEvent::Tick);
    }

    #[test]
    fn termination_signal_becomes_an_interrupt_event() {
        let mut events = TerminalEvents::with_reader(FAR, Duration::from_millis(5), idle);
        events.forward_interrupts().unwrap();

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());
        assert_eq!(events.next_event().unwrap(), AppEvent::Interrupt);
    }
}
