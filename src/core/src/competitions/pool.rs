use crate::club::ClubId;
use crate::competitions::{KnockoutBracket, RoundOutcome};
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How an entrant list is cut down to a power of two before the bracket starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolPolicy {
    /// The lowest-rated clubs play a preliminary round for the spare places.
    PlayIn,
    /// Random clubs are dropped without playing.
    Sample,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedPool {
    pub entrants: Vec<ClubId>,
    pub play_in: Option<RoundOutcome>,
    /// Clubs dropped by `Sample`.
    pub dropped: Vec<ClubId>,
}

pub fn largest_power_of_two(n: usize) -> usize {
    if n == 0 { 0 } else { 1 << (usize::BITS - 1 - n.leading_zeros()) }
}

impl PoolPolicy {
    pub fn normalize<R: Rng + ?Sized>(
        &self,
        bracket: &KnockoutBracket<'_>,
        entrants: Vec<ClubId>,
        rng: &mut R,
    ) -> NormalizedPool {
        let target = largest_power_of_two(entrants.len());
        let excess = entrants.len() - target;

        if excess == 0 {
            return NormalizedPool {
                entrants,
                ..Default::default()
            };
        }

        match self {
            PoolPolicy::PlayIn => {
                let mut by_rating = entrants;
                by_rating.sort_by_key(|id| (bracket.rating(*id), *id));

                let contenders: Vec<ClubId> = by_rating.drain(..excess * 2).collect();
                let play_in = bracket.play_round(&contenders, rng);

                info!("play-in: {} clubs contest {} places", contenders.len(), excess);

                by_rating.extend(play_in.winners.iter().copied());

                NormalizedPool {
                    entrants: by_rating,
                    play_in: Some(play_in),
                    dropped: Vec::new(),
                }
            }
            PoolPolicy::Sample => {
                let mut shuffled = entrants;
                shuffled.shuffle(rng);
                let dropped = shuffled.split_off(target);

                warn!("{} clubs dropped from the draw without playing", dropped.len());

                NormalizedPool {
                    entrants: shuffled,
                    play_in: None,
                    dropped,
                }
            }
        }
    }
}
