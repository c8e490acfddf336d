use crate::catalog::QUOTES;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random index provider for the quote picker.
///
/// `Scripted` replays a fixed list of indices (wrapping around) so tests can
/// assert the exact quote shown.
#[derive(Debug, Clone)]
pub enum QuoteRng {
    Random(StdRng),
    Scripted { picks: Vec<usize>, next: usize },
}

impl QuoteRng {
    pub fn from_os() -> Self {
        Self::Random(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::Random(StdRng::seed_from_u64(seed))
    }

    pub fn scripted(picks: impl Into<Vec<usize>>) -> Self {
        Self::Scripted {
            picks: picks.into(),
            next: 0,
        }
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        match self {
            QuoteRng::Random(rng) => rng.random_range(0..len),
            QuoteRng::Scripted { picks, next } => {
                if picks.is_empty() {
                    return 0;
                }
                let pick = picks[*next % picks.len()];
                *next += 1;
                pick % len
            }
        }
    }
}

/// Index into `QUOTES` of a freshly picked quote.
pub fn pick_quote(rng: &mut QuoteRng) -> usize {
    rng.next_index(QUOTES.len())
}
