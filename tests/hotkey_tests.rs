use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use norsk_lookup::input::HotkeyMonitor;
use norsk_lookup::model::{Hotkey, KeyStateSource, VirtualKey};

#[derive(Clone, Default)]
struct Keyboard(Arc<Mutex<HashSet<VirtualKey>>>);

impl Keyboard {
    fn down(&self, key: VirtualKey) {
        self.0.lock().unwrap().insert(key);
    }

    fn up(&self, key: VirtualKey) {
        self.0.lock().unwrap().remove(&key);
    }
}

impl KeyStateSource for Keyboard {
    fn is_down(&self, key: VirtualKey) -> bool {
        self.0.lock().unwrap().contains(&key)
    }
}

fn counting(count: &Arc<AtomicUsize>) -> impl FnMut() + Send + 'static {
    let count = Arc::clone(count);
    move || {
        count.fetch_add(1, Ordering::SeqCst);
    }
}

// === Chord scenarios ===

#[test]
fn alt_p_n_fires_once_per_press() {
    let keys = Keyboard::default();
    let count = Arc::new(AtomicUsize::new(0));
    let mut monitor = HotkeyMonitor::single(keys.clone(), Hotkey::default(), counting(&count));

    keys.down(VirtualKey::ALT);
    keys.down(VirtualKey::P);
    assert_eq!(monitor.poll_once(), 0);

    keys.down(VirtualKey::N);
    assert_eq!(monitor.poll_once(), 1);
    // Held across many ticks.
    for _ in 0..10 {
        assert_eq!(monitor.poll_once(), 0);
    }
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn reverse_press_order_fires_on_the_last_key() {
    let keys = Keyboard::default();
    let count = Arc::new(AtomicUsize::new(0));
    let mut monitor = HotkeyMonitor::single(keys.clone(), Hotkey::default(), counting(&count));

    keys.down(VirtualKey::N);
    assert_eq!(monitor.poll_once(), 0);
    keys.down(VirtualKey::P);
    assert_eq!(monitor.poll_once(), 0);
    keys.down(VirtualKey::ALT);
    assert_eq!(monitor.poll_once(), 1);

    for _ in 0..5 {
        assert_eq!(monitor.poll_once(), 0);
    }
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn whole_chord_between_two_ticks_fires_once() {
    let keys = Keyboard::default();
    let count = Arc::new(AtomicUsize::new(0));
    let mut monitor = HotkeyMonitor::single(keys.clone(), Hotkey::default(), counting(&count));

    assert_eq!(monitor.poll_once(), 0);
    for key in [VirtualKey::P, VirtualKey::ALT, VirtualKey::N] {
        keys.down(key);
    }
    assert_eq!(monitor.poll_once(), 1);
    assert_eq!(monitor.poll_once(), 0);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn releasing_one_key_rearms_the_chord() {
    let keys = Keyboard::default();
    let count = Arc::new(AtomicUsize::new(0));
    let mut monitor = HotkeyMonitor::single(keys.clone(), Hotkey::default(), counting(&count));

    for key in [VirtualKey::ALT, VirtualKey::P, VirtualKey::N] {
        keys.down(key);
    }
    monitor.poll_once();

    // Alt and N stay down; P is tapped again.
    keys.up(VirtualKey::P);
    monitor.poll_once();
    keys.down(VirtualKey::P);
    monitor.poll_once();

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn extra_keys_do_not_block_the_chord() {
    let keys = Keyboard::default();
    let count = Arc::new(AtomicUsize::new(0));
    let mut monitor = HotkeyMonitor::single(keys.clone(), Hotkey::default(), counting(&count));

    for key in [VirtualKey::SHIFT, VirtualKey::ALT, VirtualKey::P, VirtualKey::N] {
        keys.down(key);
    }
    assert_eq!(monitor.poll_once(), 1);
}

#[test]
fn panicking_callback_does_not_stop_other_hotkeys() {
    let keys = Keyboard::default();
    let count = Arc::new(AtomicUsize::new(0));
    let mut monitor = HotkeyMonitor::new(keys.clone());
    monitor
        .register(Hotkey::default(), || panic!("lookup exploded"))
        .unwrap();
    let ctrl_p = Hotkey::new([VirtualKey::CTRL, VirtualKey::P], "Ctrl+P").unwrap();
    monitor.register(ctrl_p, counting(&count)).unwrap();
    assert_eq!(monitor.registered(), 2);

    for key in [VirtualKey::CTRL, VirtualKey::ALT, VirtualKey::P, VirtualKey::N] {
        keys.down(key);
    }
    assert_eq!(monitor.poll_once(), 2);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // The panicking registration is still armed normally.
    keys.up(VirtualKey::N);
    monitor.poll_once();
    keys.down(VirtualKey::N);
    assert_eq!(monitor.poll_once(), 1);
}
