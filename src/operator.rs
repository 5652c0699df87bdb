use std::fmt::Display;

use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};

use crate::params::Num;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

pub type Prec = u8;

impl Op {
    /// Returns `None` when the result is undefined (division by zero) or
    /// does not fit in `Num`.
    pub fn apply(self, a: Num, b: Num) -> Option<Num> {
        match self {
            Op::Add => a.checked_add(&b),
            Op::Sub => a.checked_sub(&b),
            Op::Mul => a.checked_mul(&b),
            Op::Div => {
                if b.is_zero() {
                    None
                } else {
                    a.checked_div(&b)
                }
            }
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
        }
    }

    pub fn prec(self) -> Prec {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }

    pub fn is_commutative(self) -> bool {
        matches!(self, Op::Add | Op::Mul)
    }

    pub fn is_additive(self) -> bool {
        self.prec() == 1
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> Num {
        Num::from_integer(v)
    }

    #[test]
    fn division_is_exact() {
        assert_eq!(Op::Div.apply(n(1), n(3)), Some(Num::new(1, 3)));
        assert_eq!(Op::Mul.apply(Num::new(1, 3), n(3)), Some(n(1)));
    }

    #[test]
    fn division_by_zero_is_undefined() {
        assert_eq!(Op::Div.apply(n(4), n(0)), None);
        assert_eq!(Op::Div.apply(n(0), n(4)), Some(n(0)));
    }

    #[test]
    fn overflow_is_undefined() {
        assert_eq!(Op::Mul.apply(n(i64::MAX), n(2)), None);
        assert_eq!(Op::Add.apply(n(i64::MAX), n(1)), None);
    }

    #[test]
    fn precedence() {
        assert!(Op::Mul.prec() > Op::Add.prec());
        assert_eq!(Op::Sub.prec(), Op::Add.prec());
        assert!(Op::Add.is_commutative() && !Op::Div.is_commutative());
    }
}
