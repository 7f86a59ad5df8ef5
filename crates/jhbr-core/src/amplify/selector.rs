use std::f64::consts::PI;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use thiserror::Error;

use crate::types::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Width of the index space in bits.
    pub index_bits: u32,
    /// Number of sampled outcomes per selection.
    pub shots: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig { index_bits: 10, shots: 1000 }
    }
}

impl SelectorConfig {
    /// Number of states in the index space.
    pub fn index_space(&self) -> usize {
        1usize << self.index_bits
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("no candidate moves")]
    NoMoves,

    #[error("no marked move")]
    NoMarkedMoves,

    #[error("marked move {0} is not among the candidates")]
    MarkedNotFound(Move),

    #[error("{moves} candidate moves do not fit an index space of {capacity}")]
    TooManyMoves { moves: usize, capacity: usize },

    #[error("outcome distribution has no weight on any candidate")]
    DegenerateDistribution,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AmplifiedSelector {
    config: SelectorConfig,
}

impl AmplifiedSelector {
    pub fn new(config: SelectorConfig) -> Self {
        AmplifiedSelector { config }
    }

    pub fn config(&self) -> SelectorConfig {
        self.config
    }

    /// Amplification rounds for `marked` target states.
    pub fn rounds(&self, marked: usize) -> usize {
        if marked == 0 {
            return 0;
        }
        let n = self.config.index_space() as f64;
        (PI * (n / marked as f64).sqrt() / 4.0).floor() as usize
    }

    /// Amplitudes after all rounds, one per index state.
    pub fn amplitudes(&self, marked: &[usize]) -> Vec<f64> {
        let n = self.config.index_space();
        let mut amps = vec![1.0 / (n as f64).sqrt(); n];
        for _ in 0..self.rounds(marked.len()) {
            for &i in marked {
                amps[i] = -amps[i];
            }
            let mean = amps.iter().sum::<f64>() / n as f64;
            for a in &mut amps {
                *a = 2.0 * mean - *a;
            }
        }
        amps
    }

    /// Outcome probabilities over the whole index space.
    pub fn distribution(&self, marked: &[usize]) -> Vec<f64> {
        self.amplitudes(marked).into_iter().map(|a| a * a).collect()
    }

    /// Pick one of `moves`, biased towards `marked`.
    ///
    /// Outcomes that land on an index with no move are discarded and drawn
    /// again, so the result is always a member of `moves`.
    pub fn select<R: Rng + ?Sized>(
        &self,
        moves: &[Move],
        marked: &[Move],
        rng: &mut R,
    ) -> Result<Move, SelectError> {
        let index = self.select_index(moves, marked, rng)?;
        Ok(moves[index])
    }

    /// Like [`select`](Self::select), returning the index into `moves`.
    pub fn select_index<R: Rng + ?Sized>(
        &self,
        moves: &[Move],
        marked: &[Move],
        rng: &mut R,
    ) -> Result<usize, SelectError> {
        if moves.is_empty() {
            return Err(SelectError::NoMoves);
        }
        let capacity = self.config.index_space();
        if moves.len() > capacity {
            return Err(SelectError::TooManyMoves { moves: moves.len(), capacity });
        }
        if marked.is_empty() {
            return Err(SelectError::NoMarkedMoves);
        }

        let mut indices = Vec::with_capacity(marked.len());
        for m in marked {
            let i = moves.iter().position(|c| c == m).ok_or(SelectError::MarkedNotFound(*m))?;
            if !indices.contains(&i) {
                indices.push(i);
            }
        }

        let probs = self.distribution(&indices);
        let dist = WeightedIndex::new(&probs[..moves.len()])
            .map_err(|_| SelectError::DegenerateDistribution)?;

        let mut counts = vec![0u32; moves.len()];
        for _ in 0..self.config.shots {
            counts[dist.sample(rng)] += 1;
        }

        let mut best = 0;
        for (i, &c) in counts.iter().enumerate().skip(1) {
            if c > counts[best] {
                best = i;
            }
        }
        Ok(best)
    }
}
