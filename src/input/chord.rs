//! Per-hotkey edge detection.

/// Edge-detector state for one registered chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChordState {
    /// At least one member key was up at the last tick; the next full
    /// press fires.
    #[default]
    Released,
    /// Fired on entering this state; waits for any member key to be released.
    Held,
}

/// Turns a stream of "is the whole chord down" samples into single fires.
#[derive(Debug, Clone, Default)]
pub struct ChordTrigger {
    state: ChordState,
}

impl ChordTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ChordState {
        self.state
    }

    /// Feed one poll sample. Returns true exactly on the Released → Held edge.
    pub fn observe(&mut self, pressed: bool) -> bool {
        match (self.state, pressed) {
            (ChordState::Released, true) => {
                self.state = ChordState::Held;
                true
            }
            (ChordState::Held, false) => {
                self.state = ChordState::Released;
                false
            }
            _ => false,
        }
    }
}
