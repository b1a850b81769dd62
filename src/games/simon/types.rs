//! Simon mode data structures.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How long a played or pressed note stays lit, in milliseconds.
pub const NOTE_HIGHLIGHT_MS: f64 = 300.0;

/// The seven piano keys, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Note {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Note {
    pub const ALL: [Note; 7] = [
        Note::C,
        Note::D,
        Note::E,
        Note::F,
        Note::G,
        Note::A,
        Note::B,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::D => "D",
            Note::E => "E",
            Note::F => "F",
            Note::G => "G",
            Note::A => "A",
            Note::B => "B",
        }
    }
}

/// Highlight colour attached to each step of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Pink,
}

impl NoteColor {
    pub const ALL: [NoteColor; 7] = [
        NoteColor::Red,
        NoteColor::Blue,
        NoteColor::Green,
        NoteColor::Yellow,
        NoteColor::Purple,
        NoteColor::Orange,
        NoteColor::Pink,
    ];
}

/// One note of the sequence to memorise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceStep {
    pub note: Note,
    pub color: NoteColor,
}

impl SequenceStep {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            note: Note::ALL[rng.gen_range(0..Note::ALL.len())],
            color: NoteColor::ALL[rng.gen_range(0..NoteColor::ALL.len())],
        }
    }
}

/// Tuning for Simon mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimonConfig {
    pub starting_lives: u32,
    /// Sequence length at level 0; level N plays `N + base_length` notes.
    pub base_length: usize,
    pub base_interval_ms: f64,
    /// Interval shortening per level.
    pub interval_step_ms: f64,
    pub min_interval_ms: f64,
}

impl Default for SimonConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            base_length: 3,
            base_interval_ms: 800.0,
            interval_step_ms: 50.0,
            min_interval_ms: 200.0,
        }
    }
}

impl SimonConfig {
    /// Clamp hand-edited values into a playable range.
    pub fn sanitized(mut self) -> Self {
        self.starting_lives = self.starting_lives.max(1);
        if !(self.min_interval_ms > 0.0) {
            self.min_interval_ms = Self::default().min_interval_ms;
        }
        if !(self.base_interval_ms >= self.min_interval_ms) {
            self.base_interval_ms = self.min_interval_ms;
        }
        if !(self.interval_step_ms >= 0.0) {
            self.interval_step_ms = 0.0;
        }
        self
    }

    /// Time between notes during playback at `level`.
    pub fn interval_ms(&self, level: u32) -> f64 {
        (self.base_interval_ms - self.interval_step_ms * level as f64).max(self.min_interval_ms)
    }

    pub fn sequence_length(&self, level: u32) -> usize {
        level as usize + self.base_length
    }
}

/// Where a Simon game is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimonPhase {
    #[default]
    Idle,
    /// Sequence is being played back; input is disabled.
    Showing,
    /// Waiting for the player to repeat the sequence.
    Repeating,
    GameOver,
}

/// Progress through a sequence playback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Playback {
    /// Next step to play.
    pub index: usize,
    pub elapsed_ms: f64,
}

/// Full state of a Simon game.
#[derive(Debug, Clone, Default)]
pub struct SimonState {
    pub phase: SimonPhase,
    pub sequence: Vec<SequenceStep>,
    /// Notes the player has repeated correctly this attempt.
    pub progress: usize,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub playback: Playback,
    /// Currently lit note and the time left on it.
    pub active_note: Option<(Note, f64)>,
}

impl SimonState {
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, SimonPhase::Showing | SimonPhase::Repeating)
    }

    /// The note the player must press next.
    pub fn expected_note(&self) -> Option<Note> {
        self.sequence.get(self.progress).map(|s| s.note)
    }

    /// Colour used to light the active note: the step being played back,
    /// or the step the player is about to enter.
    pub fn highlight_color(&self) -> Option<NoteColor> {
        let index = match self.phase {
            SimonPhase::Showing => self.playback.index.checked_sub(1)?,
            _ => self.progress,
        };
        self.sequence.get(index).map(|s| s.color)
    }
}
