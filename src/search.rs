use hashbrown::HashSet;
use log::trace;
use thiserror::Error;

use crate::{
    hand::{key, CanonicalKey, Hand},
    moves::{moves, Move},
    params::Num,
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("cannot search an empty hand")]
    EmptyHand,
    #[error("move `{0}` does not apply to the hand")]
    Inapplicable(Move),
}

/// Hands proven unable to reach one particular target.
///
/// Only failures are recorded, and only once every move from the hand has
/// been tried. A memo must not outlive the target it was filled for.
#[derive(Debug, Default)]
pub struct Memo {
    failed: HashSet<CanonicalKey>,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &CanonicalKey) -> bool {
        self.failed.contains(key)
    }

    pub fn len(&self) -> usize {
        self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn clear(&mut self) {
        self.failed.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &CanonicalKey> {
        self.failed.iter()
    }

    fn insert(&mut self, key: CanonicalKey) {
        self.failed.insert(key);
    }
}

/// Moves of a successful reduction, earliest applied first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace(Vec<Move>);

impl Trace {
    pub fn new(moves: Vec<Move>) -> Self {
        Self(moves)
    }

    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    /// Applies every move to `hand` with plain arithmetic, consuming one
    /// instance of each operand, and returns what is left.
    pub fn replay(&self, hand: &[Num]) -> Result<Hand, SearchError> {
        let mut hand = hand.to_vec();
        for mv in &self.0 {
            let inapplicable = || SearchError::Inapplicable(*mv);
            let i = hand.iter().position(|&v| v == mv.a).ok_or_else(inapplicable)?;
            hand.swap_remove(i);
            let j = hand.iter().position(|&v| v == mv.b).ok_or_else(inapplicable)?;
            hand.swap_remove(j);
            hand.push(mv.result().ok_or_else(inapplicable)?);
        }
        Ok(hand)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub memo_hits: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub success: bool,
    pub trace: Trace,
    pub stats: SearchStats,
}

struct Reducer<'m> {
    target: Num,
    memo: &'m mut Memo,
    path: Vec<Move>,
    stats: SearchStats,
}

impl Reducer<'_> {
    fn reduce(&mut self, hand: &[Num]) -> bool {
        self.stats.nodes += 1;
        if let [last] = hand {
            return *last == self.target;
        }

        let key = key(hand);
        if self.memo.contains(&key) {
            self.stats.memo_hits += 1;
            return false;
        }

        for candidate in moves(hand) {
            self.path.push(candidate.mv);
            if self.reduce(&candidate.residual) {
                return true;
            }
            self.path.pop();
        }

        self.memo.insert(key);
        false
    }
}

/// Depth-first search for any sequence of moves reducing `hand` to `target`.
///
/// Stops at the first success. `memo` must be empty or filled by earlier
/// searches for the same target.
pub fn search(hand: &[Num], target: Num, memo: &mut Memo) -> Result<SearchResult, SearchError> {
    if hand.is_empty() {
        return Err(SearchError::EmptyHand);
    }

    let mut reducer = Reducer {
        target,
        memo,
        path: Vec::with_capacity(hand.len() - 1),
        stats: SearchStats::default(),
    };
    let success = reducer.reduce(hand);
    let Reducer { path, stats, .. } = reducer;
    trace!(
        "search {} -> {target}: success={success} nodes={} memo_hits={}",
        crate::hand::describe(hand),
        stats.nodes,
        stats.memo_hits
    );

    Ok(SearchResult {
        success,
        trace: Trace(if success { path } else { Vec::new() }),
        stats,
    })
}

/// Searches with a memo of its own.
pub fn solve(hand: &[Num], target: Num) -> Result<SearchResult, SearchError> {
    search(hand, target, &mut Memo::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hand::from_ints, operator::Op};

    fn n(v: i64) -> Num {
        Num::from_integer(v)
    }

    #[test]
    fn empty_hand_is_an_error() {
        assert_eq!(solve(&[], n(1)), Err(SearchError::EmptyHand));
    }

    #[test]
    fn single_card() {
        let hit = solve(&from_ints([5]), n(5)).unwrap();
        assert!(hit.success && hit.trace.is_empty());
        let miss = solve(&from_ints([5]), n(6)).unwrap();
        assert!(!miss.success && miss.trace.is_empty());
    }

    #[test]
    fn trace_is_in_application_order() {
        let hand = from_ints([1, 1, 1, 1]);
        let result = solve(&hand, n(4)).unwrap();
        assert!(result.success);
        assert_eq!(
            result.trace.moves(),
            &[
                Move::new(n(1), n(1), Op::Add),
                Move::new(n(1), n(1), Op::Add),
                Move::new(n(2), n(2), Op::Add),
            ]
        );
        assert_eq!(result.trace.replay(&hand).unwrap(), vec![n(4)]);
    }

    #[test]
    fn failure_fills_memo_with_root() {
        let hand = from_ints([1, 1]);
        let mut memo = Memo::new();
        let result = search(&hand, n(3), &mut memo).unwrap();
        assert!(!result.success && result.trace.is_empty());
        assert!(memo.contains(&key(&hand)));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn success_does_not_memoize_the_winning_path() {
        let hand = from_ints([2, 3]);
        let mut memo = Memo::new();
        assert!(search(&hand, n(6), &mut memo).unwrap().success);
        assert!(!memo.contains(&key(&hand)));
    }

    #[test]
    fn memo_short_circuits() {
        let hand = from_ints([1, 2, 4]);
        let mut memo = Memo::new();
        let first = search(&hand, n(1000), &mut memo).unwrap();
        assert!(!first.success);
        let again = search(&hand, n(1000), &mut memo).unwrap();
        assert!(!again.success);
        assert_eq!(again.stats, SearchStats { nodes: 1, memo_hits: 1 });
        assert!(again.stats.nodes < first.stats.nodes);
    }

    #[test]
    fn replay_rejects_foreign_moves() {
        let trace = Trace::new(vec![Move::new(n(9), n(1), Op::Add)]);
        assert_eq!(
            trace.replay(&from_ints([1, 2])),
            Err(SearchError::Inapplicable(Move::new(n(9), n(1), Op::Add)))
        );
    }
}
