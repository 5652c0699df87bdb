//! Decides whether a hand of cards can be combined with `+ - * /` into a
//! target number, and prints a parenthesized expression when it can.

pub mod campaign;
pub mod compress;
pub mod deck;
pub mod expr;
pub mod hand;
pub mod moves;
pub mod operator;
pub mod params;
pub mod search;

pub use expr::{render, RenderError};
pub use hand::{key, CanonicalKey, Hand};
pub use moves::{moves, Move};
pub use operator::Op;
pub use params::Num;
pub use search::{search, solve, Memo, SearchError, SearchResult, Trace};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("invalid number `{0}`")]
    ParseNum(String),
    #[error("malformed hand key `{0}`")]
    BadKey(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
