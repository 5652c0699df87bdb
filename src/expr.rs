use std::collections::VecDeque;

use hashbrown::HashMap;
use log::debug;
use thiserror::Error;

use crate::{
    moves::Move,
    operator::Op,
    params::Num,
    search::Trace,
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("an empty trace cannot combine {0} cards")]
    EmptyTrace(usize),
    #[error("no available operands for move `{0}`")]
    Unsatisfiable(Move),
    #[error("move `{0}` has no result")]
    Undefined(Move),
    #[error("{0} expressions remain after the last move")]
    Incomplete(usize),
}

/// Printable sub-expression, tagged with its top-level operator.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Token {
    text: String,
    op: Option<Op>,
}

impl Token {
    fn leaf(value: Num) -> Self {
        let text = if value.is_integer() && *value.numer() >= 0 {
            value.to_string()
        } else {
            format!("({value})")
        };
        Self { text, op: None }
    }

    fn is_atom(&self) -> bool {
        self.op.is_none()
    }

    fn is_additive(&self) -> bool {
        self.op.is_some_and(Op::is_additive)
    }

    fn operand(&self, wrap: bool) -> String {
        if wrap {
            format!("({})", self.text)
        } else {
            self.text.clone()
        }
    }

    fn combine(left: Token, op: Op, right: Token) -> Token {
        let (wrap_left, wrap_right) = match op {
            // Sums and differences chain left to right; products bind tighter.
            Op::Add => (false, false),
            Op::Mul => (left.is_additive(), right.is_additive()),
            Op::Sub | Op::Div => (!left.is_atom(), !right.is_atom()),
        };
        Token {
            text: format!(
                "{} {op} {}",
                left.operand(wrap_left),
                right.operand(wrap_right)
            ),
            op: Some(op),
        }
    }
}

/// Queues of printable expressions for every value in play, one entry per
/// physical instance.
#[derive(Debug, Default)]
struct TokenStore {
    queues: HashMap<Num, VecDeque<Token>>,
}

impl TokenStore {
    fn seed(hand: &[Num]) -> Self {
        let mut store = Self::default();
        for &card in hand {
            store.put(card, Token::leaf(card));
        }
        store
    }

    fn available(&self, value: &Num) -> usize {
        self.queues.get(value).map_or(0, VecDeque::len)
    }

    fn can_apply(&self, mv: &Move) -> bool {
        if mv.a == mv.b {
            self.available(&mv.a) >= 2
        } else {
            self.available(&mv.a) >= 1 && self.available(&mv.b) >= 1
        }
    }

    fn take(&mut self, value: &Num) -> Option<Token> {
        let queue = self.queues.get_mut(value)?;
        let token = queue.pop_front();
        if queue.is_empty() {
            self.queues.remove(value);
        }
        token
    }

    fn put(&mut self, value: Num, token: Token) {
        self.queues.entry(value).or_default().push_back(token);
    }

    fn len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    fn into_single(mut self) -> Result<Token, RenderError> {
        match self.len() {
            1 => self
                .queues
                .drain()
                .find_map(|(_, mut queue)| queue.pop_front())
                .ok_or(RenderError::Incomplete(0)),
            remaining => Err(RenderError::Incomplete(remaining)),
        }
    }
}

/// Rebuilds a parenthesized expression over `hand` from a successful trace.
///
/// Moves whose operands are not available yet are deferred and retried after
/// the others; the trace is rejected once a full pass makes no progress.
pub fn render(trace: &Trace, hand: &[Num]) -> Result<String, RenderError> {
    if trace.is_empty() {
        return match hand {
            [only] => Ok(Token::leaf(*only).text),
            _ => Err(RenderError::EmptyTrace(hand.len())),
        };
    }

    let mut store = TokenStore::seed(hand);
    let mut pending: VecDeque<Move> = trace.iter().copied().collect();
    let mut stalled = 0;
    while let Some(mv) = pending.pop_front() {
        if !store.can_apply(&mv) {
            debug!("deferring move {mv}");
            pending.push_back(mv);
            stalled += 1;
            if stalled >= pending.len() {
                return Err(RenderError::Unsatisfiable(mv));
            }
            continue;
        }
        stalled = 0;

        let result = mv.result().ok_or(RenderError::Undefined(mv))?;
        let left = store.take(&mv.a).ok_or(RenderError::Unsatisfiable(mv))?;
        let right = store.take(&mv.b).ok_or(RenderError::Unsatisfiable(mv))?;
        store.put(result, Token::combine(left, mv.op, right));
    }

    store.into_single().map(|token| token.text)
}
