use std::fmt::Display;

use crate::params::Num;
use crate::Error;

/// Multiset of values still in play.
pub type Hand = Vec<Num>;

/// Order-independent fingerprint of a hand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(Box<[Num]>);

impl CanonicalKey {
    pub fn values(&self) -> &[Num] {
        &self.0
    }
}

impl Display for CanonicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&describe(&self.0))
    }
}

pub fn key(hand: &[Num]) -> CanonicalKey {
    let mut values = hand.to_vec();
    values.sort_unstable();
    CanonicalKey(values.into_boxed_slice())
}

/// Renders a hand as `[1, 2, 3/4]`.
pub fn describe(hand: &[Num]) -> String {
    let items: Vec<String> = hand.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

pub fn from_ints<I: IntoIterator<Item = i64>>(values: I) -> Hand {
    values.into_iter().map(Num::from_integer).collect()
}

/// Parses `7`, `-2` or `3/4`.
pub fn parse_num(s: &str) -> Result<Num, Error> {
    let s = s.trim();
    let (numer, denom) = match s.split_once('/') {
        Some((numer, denom)) => (numer.trim(), denom.trim()),
        None => (s, "1"),
    };
    let bad = || Error::ParseNum(s.to_string());
    let numer: i64 = numer.parse().map_err(|_| bad())?;
    let denom: i64 = denom.parse().map_err(|_| bad())?;
    if denom == 0 {
        return Err(bad());
    }
    Ok(Num::new(numer, denom))
}

pub fn parse_hand<S: AsRef<str>>(items: &[S]) -> Result<Hand, Error> {
    items.iter().map(|s| parse_num(s.as_ref())).collect()
}
