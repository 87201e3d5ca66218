//! Community comparison and health timeline data.
//!
//! There is no real data source behind these routes. `SimulatedInsights` produces randomised
//! filler for the dashboard and is the only `InsightSource` implementation; it must not be
//! presented as analytics. A real source would implement the same trait.

use api_shared::{CommunityStat, HealthTimelineRes};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of monthly points in the timeline.
pub const TIMELINE_POINTS: i64 = 6;

pub trait InsightSource: Send + Sync {
    fn community_stats(&self) -> Vec<CommunityStat>;

    /// Monthly series ending at `today`, oldest first.
    fn health_timeline(&self, today: NaiveDate) -> HealthTimelineRes;
}

/// Randomised placeholder data. A seed makes the output repeatable.
#[derive(Clone, Debug, Default)]
pub struct SimulatedInsights {
    seed: Option<u64>,
}

impl SimulatedInsights {
    pub fn new() -> Self {
        Self { seed: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl InsightSource for SimulatedInsights {
    fn community_stats(&self) -> Vec<CommunityStat> {
        let mut rng = self.rng();

        vec![
            CommunityStat {
                label: "Your Age Group Average Risk".into(),
                value: format!("{}%", rng.gen_range(35..=55)),
                percentile: percentile(&mut rng, 15, 85),
                better: rng.gen(),
            },
            CommunityStat {
                label: "Similar BMI Range".into(),
                value: format!("{}%", rng.gen_range(40..=60)),
                percentile: percentile(&mut rng, 20, 80),
                better: rng.gen(),
            },
            CommunityStat {
                label: "Regional Health Score".into(),
                value: format!("{}%", rng.gen_range(30..=50)),
                percentile: percentile(&mut rng, 25, 75),
                better: rng.gen(),
            },
            CommunityStat {
                label: "Exercise Habits Comparison".into(),
                value: "Above Average".into(),
                percentile: percentile(&mut rng, 60, 90),
                better: true,
            },
        ]
    }

    fn health_timeline(&self, today: NaiveDate) -> HealthTimelineRes {
        let mut rng = self.rng();
        let mut timeline = HealthTimelineRes::default();

        for i in 0..TIMELINE_POINTS {
            let date = today - Duration::days(30 * i);
            timeline.labels.insert(0, date.format("%b").to_string());
            timeline
                .risk_scores
                .insert(0, (80 - i * 8 + rng.gen_range(-5..=5)).max(20));
            timeline
                .fitness_scores
                .insert(0, (40 + i * 8 + rng.gen_range(-5..=5)).min(90));
        }

        timeline
    }
}

/// The suffix is always `th`, `21th` included.
fn percentile(rng: &mut impl Rng, low: u32, high: u32) -> String {
    format!("{}th percentile", rng.gen_range(low..=high))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percent(value: &str) -> u32 {
        value.trim_end_matches('%').parse().expect("percentage")
    }

    fn percentile_value(value: &str) -> u32 {
        value
            .strip_suffix("th percentile")
            .expect("th suffix")
            .parse()
            .expect("percentile")
    }

    #[test]
    fn community_stats_stay_in_their_bands() {
        for seed in 0..50 {
            let stats = SimulatedInsights::seeded(seed).community_stats();
            assert_eq!(stats.len(), 4);
            assert!((35..=55).contains(&percent(&stats[0].value)));
            assert!((15..=85).contains(&percentile_value(&stats[0].percentile)));
            assert!((40..=60).contains(&percent(&stats[1].value)));
            assert!((20..=80).contains(&percentile_value(&stats[1].percentile)));
            assert!((30..=50).contains(&percent(&stats[2].value)));
            assert!((25..=75).contains(&percentile_value(&stats[2].percentile)));
            assert_eq!(stats[3].value, "Above Average");
            assert!((60..=90).contains(&percentile_value(&stats[3].percentile)));
            assert!(stats[3].better);
        }
    }

    #[test]
    fn seeded_output_is_repeatable() {
        let a = SimulatedInsights::seeded(7).community_stats();
        let b = SimulatedInsights::seeded(7).community_stats();
        assert_eq!(a, b);
    }

    #[test]
    fn timeline_is_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let timeline = SimulatedInsights::seeded(3).health_timeline(today);
        assert_eq!(timeline.labels, ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        assert_eq!(timeline.risk_scores.len(), 6);
        assert_eq!(timeline.fitness_scores.len(), 6);

        // Index 5 is today (i = 0), index 0 is five months back (i = 5).
        for (pos, i) in (0..6).rev().enumerate() {
            let risk = timeline.risk_scores[pos];
            let fitness = timeline.fitness_scores[pos];
            assert!((risk - (80 - i * 8)).abs() <= 5, "risk {risk} at {i}");
            assert!((fitness - (40 + i * 8)).abs() <= 5, "fitness {fitness} at {i}");
        }
    }

    #[test]
    fn percentiles_always_use_th() {
        for seed in 0..50 {
            for stat in SimulatedInsights::seeded(seed).community_stats() {
                assert!(stat.percentile.ends_with("th percentile"), "{}", stat.percentile);
            }
        }
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(percentile(&mut rng, 21, 21), "21th percentile");
        assert_eq!(percentile(&mut rng, 22, 22), "22th percentile");
    }
}
