//! RNG module - uniform random piece selection
//!
//! Each spawn picks one of the seven shapes uniformly at random from a small
//! seeded LCG, so a given seed replays the same game. The queue keeps one
//! piece of preview and lets a host script upcoming pieces.

use std::collections::VecDeque;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits have short periods; take the high half.
        (self.next_u32() >> 16) % max.max(1)
    }
}

/// Source of upcoming pieces with a one-piece preview
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: SimpleRng,
    next: PieceKind,
    scripted: VecDeque<PieceKind>,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::roll(&mut rng);
        Self {
            rng,
            next,
            scripted: VecDeque::new(),
        }
    }

    fn roll(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.scripted.front().copied().unwrap_or(self.next)
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        if let Some(kind) = self.scripted.pop_front() {
            return kind;
        }
        let kind = self.next;
        self.next = Self::roll(&mut self.rng);
        kind
    }

    /// Queue `kind` to be drawn before any random piece.
    ///
    /// Scripted pieces are drawn in the order they were pushed.
    pub fn push_scripted(&mut self, kind: PieceKind) {
        self.scripted.push_back(kind);
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
