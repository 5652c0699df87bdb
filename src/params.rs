use num_rational::Ratio;

/// Exact rational value of a card or of any intermediate result.
pub type Num = Ratio<i64>;

pub struct Face {
    pub value: u8,
    pub copies: u8,
}

/// One suit-less deck: every face card counts as ten.
pub const FACES: &[Face] = &[
    Face { value: 1, copies: 4 },
    Face { value: 2, copies: 4 },
    Face { value: 3, copies: 4 },
    Face { value: 4, copies: 4 },
    Face { value: 5, copies: 4 },
    Face { value: 6, copies: 4 },
    Face { value: 7, copies: 4 },
    Face { value: 8, copies: 4 },
    Face { value: 9, copies: 4 },
    Face { value: 10, copies: 16 },
];

/// Face that never forms a target digit.
pub const TEN: u8 = 10;

pub const HAND_SIZE: usize = 7;
pub const TARGET_DIGITS: usize = 3;

pub const MIN_TARGET: u32 = 100;
pub const MAX_TARGET: u32 = 999;

pub const fn deck_len() -> usize {
    let mut len = 0;
    let mut idx = 0;
    while idx < FACES.len() {
        len += FACES[idx].copies as usize;
        idx += 1;
    }
    len
}

pub const DECK_LEN: usize = deck_len();
