//! Period evaluation engine.
//!
//! [`Evaluator::evaluate`] is a pure function from a user snapshot and
//! a clock reading to a new snapshot plus the events that explain the
//! difference. For every active habit it settles all period boundaries
//! that elapsed since the habit was last looked at:
//!
//! - a habit with no recorded boundary gets one anchored from `now`,
//!   with no reward or penalty;
//! - an elapsed period with the habit completed pays out streak, exp,
//!   and coins, and arms the habit for the next period;
//! - an elapsed period left incomplete costs one hp and resets the
//!   streak.
//!
//! Catching up after a long gap settles each missed boundary in order,
//! so the outcome is the same whether evaluation ran every tick or
//! once at the end. Hp never drops below zero in the returned
//! snapshot. The input snapshot is never modified.

pub mod period;

pub use period::{CompressedPeriods, Timing};

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

use crate::events::EvaluationEvent;
use crate::habit::HabitStatus;
use crate::user::User;

/// Experience needed to advance a level. Exp resets to zero on
/// level-up rather than carrying the remainder.
pub const LEVEL_UP_EXP: u32 = 100;
/// Upper bound of the random coin payout per rewarded period.
pub const COIN_REWARD_MAX: u32 = 15;
/// Hp lost per missed period.
pub const MISS_HP_PENALTY: i32 = 1;

/// Result of one evaluation pass.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The settled snapshot.
    pub user: User,
    /// What happened, in the order it was applied.
    pub events: Vec<EvaluationEvent>,
}

/// Settles elapsed period boundaries against a user snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    timing: Timing,
    coin_seed: Option<u64>,
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator {
            timing: Timing::Calendar,
            coin_seed: None,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Seed the coin payout. Evaluations with the same seed and input
    /// produce identical coin amounts.
    pub fn with_coin_seed(mut self, seed: u64) -> Self {
        self.coin_seed = Some(seed);
        self
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Evaluate every active habit against `now` and return the new
    /// snapshot together with the events that were applied.
    pub fn evaluate(&self, user: &User, now: DateTime<Utc>) -> Evaluation {
        let mut user = user.clone();
        let mut events = Vec::new();
        let mut rng = match self.coin_seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };

        let mut hp = user.hp;
        let mut level = user.level;
        let mut exp = user.exp;
        let mut coins = user.chocopie_coins;

        for habit in &mut user.habits.active {
            let mut boundary = match habit.last_period_end {
                Some(end) => end,
                None => {
                    let end = self.timing.period_end(now, habit.period);
                    habit.last_period_end = Some(end);
                    events.push(EvaluationEvent::Anchored {
                        habit_id: habit.id,
                        period_end: end,
                        at: now,
                    });
                    continue;
                }
            };

            while now > boundary {
                if habit.status == HabitStatus::Completed {
                    habit.status = HabitStatus::Default;
                    habit.streak += 1;
                    let exp_gained = experience_gain(habit.streak, level);
                    let coins_gained = rng.gen_range(0..=COIN_REWARD_MAX);
                    exp = exp.saturating_add(exp_gained);
                    coins = coins.saturating_add(coins_gained);
                    events.push(EvaluationEvent::Rewarded {
                        habit_id: habit.id,
                        streak: habit.streak,
                        exp_gained,
                        coins_gained,
                        at: now,
                    });
                    if exp >= LEVEL_UP_EXP {
                        level += 1;
                        exp = 0;
                        events.push(EvaluationEvent::LeveledUp { level, at: now });
                    }
                } else {
                    // Status is left as-is so an overdue marker
                    // survives the miss.
                    hp = hp.saturating_sub(MISS_HP_PENALTY);
                    habit.streak = 0;
                    events.push(EvaluationEvent::Missed {
                        habit_id: habit.id,
                        period_end: boundary,
                        at: now,
                    });
                }

                let next = self.timing.next_period_end(boundary, habit.period);
                if next <= boundary {
                    // Zero-length periods cannot advance; bail rather
                    // than spin.
                    break;
                }
                boundary = next;
            }

            habit.last_period_end = Some(boundary);
        }

        user.hp = hp.max(0);
        user.level = level;
        user.exp = exp;
        user.chocopie_coins = coins;

        Evaluation { user, events }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Experience for completing one period at the given streak and
/// level: `floor(10 * streak * level / (2 * level))`. The level
/// factors currently cancel out.
pub fn experience_gain(streak: u32, level: u32) -> u32 {
    let level = u128::from(level.max(1));
    let gained = (10 * u128::from(streak) * level) / (2 * level);
    gained.min(u128::from(u32::MAX)) as u32
}
