use std::fmt::Display;

use crate::{
    hand::Hand,
    operator::Op,
    params::Num,
};

/// A single pairwise combination `a op b`. For `Sub` and `Div` the first
/// operand is `a`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub a: Num,
    pub b: Num,
    pub op: Op,
}

impl Move {
    pub fn new(a: Num, b: Num, op: Op) -> Self {
        Self { a, b, op }
    }

    pub fn result(&self) -> Option<Num> {
        self.op.apply(self.a, self.b)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.a, self.op, self.b)
    }
}

#[derive(Clone, Debug)]
pub struct Candidate {
    pub i: usize,
    pub j: usize,
    pub mv: Move,
    pub result: Num,
    pub residual: Hand,
}

// Operator order within a pair; `true` swaps the operands.
const PAIR_ORDER: [(Op, bool); 6] = [
    (Op::Add, false),
    (Op::Mul, false),
    (Op::Sub, false),
    (Op::Sub, true),
    (Op::Div, false),
    (Op::Div, true),
];

/// Every valid move from a snapshot of a hand, pair by pair.
pub struct Moves<'a> {
    hand: &'a [Num],
    i: usize,
    j: usize,
    step: usize,
}

pub fn moves(hand: &[Num]) -> Moves<'_> {
    Moves {
        hand,
        i: 0,
        j: 1,
        step: 0,
    }
}

impl Moves<'_> {
    fn advance_pair(&mut self) {
        self.step = 0;
        self.j += 1;
        if self.j >= self.hand.len() {
            self.i += 1;
            self.j = self.i + 1;
        }
    }

    fn residual(&self, result: Num) -> Hand {
        let mut residual = Hand::with_capacity(self.hand.len() - 1);
        residual.extend(
            self.hand
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != self.i && k != self.j)
                .map(|(_, &v)| v),
        );
        residual.push(result);
        residual
    }
}

impl Iterator for Moves<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            if self.j >= self.hand.len() {
                return None;
            }
            let Some(&(op, swapped)) = PAIR_ORDER.get(self.step) else {
                self.advance_pair();
                continue;
            };
            self.step += 1;
            let (a, b) = (self.hand[self.i], self.hand[self.j]);
            let mv = if swapped {
                Move::new(b, a, op)
            } else {
                Move::new(a, b, op)
            };
            if let Some(result) = mv.result() {
                return Some(Candidate {
                    i: self.i,
                    j: self.j,
                    mv,
                    result,
                    residual: self.residual(result),
                });
            }
        }
    }
}
