use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt::Debug;

use log::warn;
use serde::Serialize;

/// how an entrant's place among others on equal points was decided
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TieBreak {
    /// nobody else had the same points
    None,
    /// decided by the number of finishes in this position
    Countback(u32),
    /// countback ran out of positions, decided by best finish and when it was first achieved
    BestFinish,
    /// identical records, these entrants share a position
    Unresolved,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandingsRow<K> {
    pub key: K,
    pub position: u32,
    pub points: f64,
    pub tie_break: TieBreak,
}

/// points and classified finishes of every entrant in a season, in round order
#[derive(Clone, Debug)]
pub struct SeasonRecord<K: Ord> {
    pub points: BTreeMap<K, Vec<Option<f64>>>,
    pub finishes: BTreeMap<K, Vec<Vec<u32>>>,
}

impl<K: Ord + Copy + Debug> SeasonRecord<K> {
    pub fn new() -> SeasonRecord<K> {
        SeasonRecord {
            points: BTreeMap::new(),
            finishes: BTreeMap::new(),
        }
    }

    /// # record a result
    /// add the points and position of one entry to a round.
    /// an entrant can score more than once in a round (team cars, shared drives)
    ///
    /// ## Arguments
    /// * `key` - the entrant
    /// * `round` - 1-based round
    /// * `rounds` - total rounds in the season
    /// * `points` - points scored by this entry
    /// * `position` - classified position of this entry
    pub fn record(&mut self, key: K, round: usize, rounds: usize, points: f64, position: Option<u32>) {
        let series = self.points.entry(key).or_insert_with(|| vec![None; rounds]);
        let slot = &mut series[round - 1];
        *slot = Some(slot.unwrap_or(0.0) + points);

        let finishes = self.finishes.entry(key).or_insert_with(|| vec![Vec::new(); rounds]);
        if let Some(p) = position {
            finishes[round - 1].push(p);
        }
    }

    pub fn total(&self, key: &K) -> f64 {
        self.points.get(key).map(|s| s.iter().flatten().sum()).unwrap_or(0.0)
    }

    pub fn totals(&self) -> BTreeMap<K, f64> {
        self.points.keys().map(|k| (*k, self.total(k))).collect()
    }

    fn count_finishes(&self, key: &K, position: u32) -> usize {
        self.finishes
            .get(key)
            .map(|rounds| rounds.iter().flatten().filter(|p| **p == position).count())
            .unwrap_or(0)
    }

    /// best position and the first round it was achieved in
    fn best_finish(&self, key: &K) -> (u32, usize) {
        let mut best = (u32::MAX, usize::MAX);
        if let Some(rounds) = self.finishes.get(key) {
            for (round, positions) in rounds.iter().enumerate() {
                for p in positions {
                    if *p < best.0 {
                        best = (*p, round);
                    }
                }
            }
        }

        best
    }

    fn deepest_position(&self) -> u32 {
        self.finishes
            .values()
            .flat_map(|rounds| rounds.iter().flatten())
            .copied()
            .max()
            .unwrap_or(0)
    }
}

pub struct StandingsHelper {}

impl StandingsHelper {
    /// # rank entrants
    /// order entrants by points, breaking ties by countback: most wins, then most
    /// second places and so on. countback can not go deeper than the lowest position
    /// anyone finished in, after that the best single finish decides
    ///
    /// ## Arguments
    /// * `totals` - the points that count for each entrant
    /// * `record` - the season results used for countback
    /// * `year` - the season, used for logging
    ///
    /// ## Returns
    /// * `Vec<StandingsRow<K>>` - the standings, unresolved entrants share a position
    pub fn rank<K: Ord + Copy + Debug>(
        totals: &BTreeMap<K, f64>,
        record: &SeasonRecord<K>,
        year: u16,
    ) -> Vec<StandingsRow<K>> {
        let mut by_points: BTreeMap<Reverse<i64>, Vec<K>> = BTreeMap::new();
        for (key, points) in totals {
            by_points.entry(Reverse(points_key(*points))).or_default().push(*key);
        }

        let deepest = record.deepest_position();
        let mut rows = Vec::new();
        let mut position = 1;

        for (_, tied) in by_points {
            let points = totals[&tied[0]];
            let mut groups = Vec::new();
            if tied.len() == 1 {
                groups.push((tied, TieBreak::None));
            } else {
                StandingsHelper::countback(tied, 1, deepest, record, &mut groups);
            }

            for (keys, tie_break) in groups {
                if tie_break == TieBreak::Unresolved {
                    warn!(target:"helpers/standings:rank", "unresolved tie in {} between {:?}", year, keys);
                }

                let size = keys.len() as u32;
                for key in keys {
                    rows.push(StandingsRow {
                        key,
                        position,
                        points,
                        tie_break,
                    });
                }
                position += size;
            }
        }

        rows
    }

    fn countback<K: Ord + Copy + Debug>(
        tied: Vec<K>,
        finish_position: u32,
        deepest: u32,
        record: &SeasonRecord<K>,
        out: &mut Vec<(Vec<K>, TieBreak)>,
    ) {
        if finish_position > deepest {
            StandingsHelper::best_finish_fallback(tied, record, out);
            return;
        }

        let mut buckets: BTreeMap<Reverse<usize>, Vec<K>> = BTreeMap::new();
        for key in tied {
            let count = record.count_finishes(&key, finish_position);
            buckets.entry(Reverse(count)).or_default().push(key);
        }

        let split = buckets.len() > 1;
        for (_, bucket) in buckets {
            if bucket.len() == 1 && split {
                out.push((bucket, TieBreak::Countback(finish_position)));
            } else {
                StandingsHelper::countback(bucket, finish_position + 1, deepest, record, out);
            }
        }
    }

    fn best_finish_fallback<K: Ord + Copy + Debug>(
        tied: Vec<K>,
        record: &SeasonRecord<K>,
        out: &mut Vec<(Vec<K>, TieBreak)>,
    ) {
        let mut by_best: BTreeMap<(u32, usize), Vec<K>> = BTreeMap::new();
        for key in tied {
            by_best.entry(record.best_finish(&key)).or_default().push(key);
        }

        for ((best, _), group) in by_best {
            if group.len() == 1 && best != u32::MAX {
                out.push((group, TieBreak::BestFinish));
            } else {
                out.push((group, TieBreak::Unresolved));
            }
        }
    }
}

/// points compared at a millionth of a point, split bonuses are not exact in binary
fn points_key(points: f64) -> i64 {
    (points * 1_000_000.0).round() as i64
}
