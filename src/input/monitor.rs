//! Polling hotkey monitor.
//!
//! A background thread samples global key state every `poll_interval` and
//! fires each registered callback once per press of its chord. No system
//! keyboard hook is installed, so nothing here can stall the input path.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::chord::ChordTrigger;
use crate::error::HotkeyError;
use crate::model::constants::{DEFAULT_POLL_INTERVAL, DEFAULT_STOP_TIMEOUT};
use crate::model::{Hotkey, KeyStateSource};

/// Invoked on the monitor thread when a chord is pressed.
pub type HotkeyCallback = Box<dyn FnMut() + Send + 'static>;

struct Registration {
    hotkey: Hotkey,
    callback: HotkeyCallback,
    trigger: ChordTrigger,
}

/// Key-state source plus every registration; owned by whichever side
/// (caller or monitor thread) is currently polling.
struct Poller<K> {
    source: K,
    registrations: Vec<Registration>,
}

impl<K: KeyStateSource> Poller<K> {
    fn poll_once(&mut self) -> usize {
        let mut fired = 0;
        for entry in &mut self.registrations {
            let pressed = entry.hotkey.is_pressed(&self.source);
            if !entry.trigger.observe(pressed) {
                continue;
            }
            fired += 1;
            tracing::debug!(hotkey = %entry.hotkey, "Hotkey pressed");
            let callback = &mut entry.callback;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback())) {
                tracing::error!(
                    hotkey = %entry.hotkey,
                    "Hotkey callback panicked: {}",
                    panic_message(payload.as_ref())
                );
            }
        }
        fired
    }
}

struct Worker<K> {
    handle: JoinHandle<Poller<K>>,
    /// Disconnects when the thread exits.
    done: Receiver<()>,
}

/// Monitors any number of hotkeys from one poll loop.
pub struct HotkeyMonitor<K: KeyStateSource + Send + 'static> {
    poller: Option<Poller<K>>,
    worker: Option<Worker<K>>,
    running: Arc<AtomicBool>,
    poll_interval: Duration,
}

impl<K: KeyStateSource + Send + 'static> HotkeyMonitor<K> {
    pub fn new(source: K) -> Self {
        Self {
            poller: Some(Poller {
                source,
                registrations: Vec::new(),
            }),
            worker: None,
            running: Arc::new(AtomicBool::new(false)),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Single-hotkey convenience constructor.
    pub fn single<F>(source: K, hotkey: Hotkey, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let mut monitor = Self::new(source);
        if let Some(poller) = monitor.poller.as_mut() {
            poller.registrations.push(Registration {
                hotkey,
                callback: Box::new(callback),
                trigger: ChordTrigger::new(),
            });
        }
        monitor
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Add a chord. Only allowed while stopped.
    pub fn register<F>(&mut self, hotkey: Hotkey, callback: F) -> Result<(), HotkeyError>
    where
        F: FnMut() + Send + 'static,
    {
        let Some(poller) = self.poller.as_mut() else {
            return Err(HotkeyError::AlreadyRunning(hotkey.description().to_string()));
        };
        tracing::info!(hotkey = %hotkey, "Registered hotkey");
        poller.registrations.push(Registration {
            hotkey,
            callback: Box::new(callback),
            trigger: ChordTrigger::new(),
        });
        Ok(())
    }

    pub fn registered(&self) -> usize {
        self.poller
            .as_ref()
            .map_or(0, |poller| poller.registrations.len())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// One poll tick on the calling thread. Returns how many callbacks fired.
    ///
    /// Does nothing while the background loop owns the registrations.
    pub fn poll_once(&mut self) -> usize {
        self.poller.as_mut().map_or(0, Poller::poll_once)
    }

    /// Start the background poll loop. Calling it while running is a no-op.
    pub fn start(&mut self) -> Result<(), HotkeyError> {
        if self.is_running() {
            return Ok(());
        }
        let Some(mut poller) = self.poller.take() else {
            // A previous loop outlived its stop timeout and still owns the state.
            return Err(HotkeyError::AlreadyRunning("monitor".to_string()));
        };

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let interval = self.poll_interval;
        let (done_tx, done) = mpsc::channel::<()>();

        let spawned = thread::Builder::new()
            .name("hotkey-monitor".to_string())
            .spawn(move || {
                let _done = done_tx;
                while running.load(Ordering::SeqCst) {
                    poller.poll_once();
                    thread::sleep(interval);
                }
                poller
            });

        match spawned {
            Ok(handle) => {
                tracing::info!(interval_ms = interval.as_millis() as u64, "Hotkey monitor started");
                self.worker = Some(Worker { handle, done });
                Ok(())
            }
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                Err(HotkeyError::Spawn(err))
            }
        }
    }

    /// Stop the loop and wait up to `timeout` for the thread to exit.
    ///
    /// Returns true when the thread has been joined. On timeout the thread
    /// is left to finish on its own and the monitor cannot be restarted.
    pub fn stop(&mut self, timeout: Duration) -> bool {
        self.running.store(false, Ordering::SeqCst);
        let Some(worker) = self.worker.take() else {
            return true;
        };

        match worker.done.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "Hotkey monitor did not stop in time"
                );
                false
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => match worker.handle.join() {
                Ok(poller) => {
                    self.poller = Some(poller);
                    tracing::info!("Hotkey monitor stopped");
                    true
                }
                Err(payload) => {
                    tracing::error!(
                        "Hotkey monitor thread panicked: {}",
                        panic_message(payload.as_ref())
                    );
                    true
                }
            },
        }
    }
}

impl<K: KeyStateSource + Send + 'static> Drop for HotkeyMonitor<K> {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop(DEFAULT_STOP_TIMEOUT);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VirtualKey;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct SharedKeys(Arc<Mutex<HashSet<VirtualKey>>>);

    impl SharedKeys {
        fn press(&self, keys: &[VirtualKey]) {
            self.0.lock().unwrap().extend(keys.iter().copied());
        }
    }

    impl KeyStateSource for SharedKeys {
        fn is_down(&self, key: VirtualKey) -> bool {
            self.0.lock().unwrap().contains(&key)
        }
    }

    #[test]
    fn register_after_start_is_rejected() {
        let mut monitor =
            HotkeyMonitor::new(SharedKeys::default()).with_poll_interval(Duration::from_millis(5));
        monitor.start().unwrap();
        let err = monitor.register(Hotkey::default(), || {}).unwrap_err();
        assert!(matches!(err, HotkeyError::AlreadyRunning(_)));
        assert!(monitor.stop(Duration::from_secs(1)));
    }

    #[test]
    fn background_loop_fires_and_stops_promptly() {
        let keys = SharedKeys::default();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let mut monitor = HotkeyMonitor::single(keys.clone(), Hotkey::default(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .with_poll_interval(Duration::from_millis(5));

        monitor.start().unwrap();
        assert!(monitor.is_running());
        keys.press(&[VirtualKey::ALT, VirtualKey::P, VirtualKey::N]);

        let mut waited = Duration::ZERO;
        while count.load(Ordering::SeqCst) == 0 && waited < Duration::from_secs(2) {
            thread::sleep(Duration::from_millis(5));
            waited += Duration::from_millis(5);
        }
        // Still held: no refire across many ticks.
        thread::sleep(Duration::from_millis(50));

        assert!(monitor.stop(Duration::from_secs(1)));
        assert!(!monitor.is_running());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(monitor.registered(), 1);
    }

    #[test]
    fn stop_without_start_is_trivially_true() {
        let mut monitor = HotkeyMonitor::new(SharedKeys::default());
        assert!(monitor.stop(Duration::from_millis(1)));
    }

    #[test]
    fn panic_message_extracts_strings() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
    }
}
