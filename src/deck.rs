use rand::{seq::SliceRandom, Rng};

use crate::{
    hand::{from_ints, Hand},
    params::{Num, DECK_LEN, FACES, MAX_TARGET, MIN_TARGET, TEN},
};

pub type Card = u8;

pub fn deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_LEN);
    for face in FACES {
        deck.extend(std::iter::repeat(face.value).take(face.copies as usize));
    }
    deck
}

pub fn to_hand(cards: &[Card]) -> Hand {
    from_ints(cards.iter().map(|&c| c as i64))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    pub cards: Vec<Card>,
    pub target: u32,
}

/// Shuffles a fresh deck, deals `hand_size` cards, then reads the target from
/// the next non-ten cards, least significant digit first.
pub fn deal<R: Rng + ?Sized>(rng: &mut R, hand_size: usize, digits: usize) -> Option<Deal> {
    let mut deck = deck();
    deck.shuffle(rng);
    if hand_size > deck.len() {
        return None;
    }
    let (cards, rest) = deck.split_at(hand_size);
    let digit_cards: Vec<Card> = rest.iter().copied().filter(|&c| c != TEN).take(digits).collect();
    if digit_cards.len() < digits {
        return None;
    }
    let target = digit_cards
        .iter()
        .rev()
        .try_fold(0u32, |acc, &d| acc.checked_mul(10)?.checked_add(d as u32))?;
    Some(Deal {
        cards: cards.to_vec(),
        target,
    })
}

/// Copies of each face left in the deck once a target's digits are drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Limits([u8; FACES.len()]);

impl Default for Limits {
    fn default() -> Self {
        let mut copies = [0; FACES.len()];
        for (slot, face) in copies.iter_mut().zip(FACES) {
            *slot = face.copies;
        }
        Self(copies)
    }
}

fn face_index(card: Card) -> Option<usize> {
    FACES.iter().position(|f| f.value == card)
}

impl Limits {
    pub fn for_target(target: u32) -> Self {
        let mut limits = Self::default();
        let mut rest = target;
        while rest > 0 {
            let digit = (rest % 10) as Card;
            if let Some(idx) = face_index(digit) {
                limits.0[idx] = limits.0[idx].saturating_sub(1);
            }
            rest /= 10;
        }
        limits
    }

    pub fn copies(&self, card: Card) -> u8 {
        face_index(card).map_or(0, |idx| self.0[idx])
    }

    pub fn allows(&self, cards: &[Card]) -> bool {
        FACES.iter().zip(self.0.iter()).all(|(face, &limit)| {
            cards.iter().filter(|&&c| c == face.value).count() <= limit as usize
        }) && cards.iter().all(|&c| face_index(c).is_some())
    }
}

fn fill_hands(limits: &Limits, face: usize, remaining: usize, current: &mut Vec<Card>, out: &mut Vec<Vec<Card>>) {
    if remaining == 0 {
        out.push(current.clone());
        return;
    }
    if face == FACES.len() {
        return;
    }
    let most = remaining.min(limits.0[face] as usize);
    for count in (0..=most).rev() {
        let len = current.len();
        current.extend(std::iter::repeat(FACES[face].value).take(count));
        fill_hands(limits, face + 1, remaining - count, current, out);
        current.truncate(len);
    }
}

/// Every sorted hand of `size` cards the limits allow, in lexicographic order.
pub fn hands(limits: &Limits, size: usize) -> Vec<Vec<Card>> {
    let mut out = Vec::new();
    fill_hands(limits, 0, size, &mut Vec::with_capacity(size), &mut out);
    out
}

fn has_zero_digit(mut n: u32) -> bool {
    while n > 0 {
        if n % 10 == 0 {
            return true;
        }
        n /= 10;
    }
    false
}

/// Targets that can be spelled with non-ten cards.
pub fn targets() -> Vec<u32> {
    (MIN_TARGET..=MAX_TARGET).filter(|&t| !has_zero_digit(t)).collect()
}

pub fn target_num(target: u32) -> Num {
    Num::from_integer(target as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn deck_composition() {
        let deck = deck();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.iter().filter(|&&c| c == TEN).count(), 16);
        assert_eq!(deck.iter().filter(|&&c| c == 7).count(), 4);
    }

    #[test]
    fn deal_is_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        let deal = deal(&mut rng, 7, 3).unwrap();
        assert_eq!(deal.cards.len(), 7);
        assert!((111..=999).contains(&deal.target));
        assert!(!has_zero_digit(deal.target));
        let mut all = deal.cards.clone();
        let mut t = deal.target;
        while t > 0 {
            all.push((t % 10) as Card);
            t /= 10;
        }
        assert!(Limits::default().allows(&all));
    }

    #[test]
    fn deal_rejects_oversized_hands() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(deal(&mut rng, 60, 3), None);
    }

    #[test]
    fn target_digits_consume_copies() {
        let limits = Limits::for_target(344);
        assert_eq!(limits.copies(3), 3);
        assert_eq!(limits.copies(4), 2);
        assert_eq!(limits.copies(5), 4);
        assert_eq!(limits.copies(TEN), 16);
        assert!(!limits.allows(&[4, 4, 4]));
        assert!(limits.allows(&[4, 4, 3, 3, 3]));
        assert!(!limits.allows(&[11]));
    }

    #[test]
    fn hands_are_sorted_and_unique() {
        let limits = Limits::default();
        let all = hands(&limits, 3);
        assert_eq!(all.first().unwrap(), &vec![1, 1, 1]);
        assert_eq!(all.last().unwrap(), &vec![TEN, TEN, TEN]);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert!(all.iter().all(|h| h.windows(2).all(|p| p[0] <= p[1])));
        assert!(all.iter().all(|h| limits.allows(h)));
        // 220 multisets of size 3 over 10 faces
        assert_eq!(all.len(), 220);
    }

    #[test]
    fn hands_respect_limits() {
        let limits = Limits::for_target(111);
        let all = hands(&limits, 4);
        assert!(!all.contains(&vec![1, 1, 1, 1]));
        assert!(!all.contains(&vec![1, 1, 2, 3]));
        assert!(all.contains(&vec![1, 2, 2, 2]));
        // 715 multisets of size 4, less the 55 holding two or more aces
        assert_eq!(all.len(), 715 - 55);
    }

    #[test]
    fn target_range() {
        let targets = targets();
        assert_eq!(targets.len(), 729);
        assert_eq!(targets[0], 111);
        assert_eq!(*targets.last().unwrap(), 999);
    }
}
