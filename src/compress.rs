use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{campaign::Solvable, deck::Card, Error, Result};

/// Faces packed into a key; tens are implied by the hand size.
const KEY_FACES: u8 = 9;
const COUNT_BITS: u32 = 3;

pub type Compressed = BTreeMap<String, String>;

/// Packs 3-bit counts of faces 1..=9 (face 1 most significant) into a
/// big-endian `u32` and encodes it as base64.
pub fn encode_key(cards: &[Card]) -> Result<String> {
    let mut packed: u32 = 0;
    for face in 1..=KEY_FACES {
        let count = cards.iter().filter(|&&c| c == face).count() as u32;
        if count >= 1 << COUNT_BITS {
            return Err(Error::BadKey(format!("{cards:?}")));
        }
        packed = (packed << COUNT_BITS) | count;
    }
    Ok(STANDARD.encode(packed.to_be_bytes()))
}

/// Inverse of [`encode_key`]: face counts, face 1 first.
pub fn decode_key(key: &str) -> Result<[u8; KEY_FACES as usize]> {
    let bad = || Error::BadKey(key.to_string());
    let bytes: [u8; 4] = STANDARD
        .decode(key)
        .map_err(|_| bad())?
        .try_into()
        .map_err(|_| bad())?;
    let mut packed = u32::from_be_bytes(bytes);
    let mut counts = [0; KEY_FACES as usize];
    for slot in counts.iter_mut().rev() {
        *slot = (packed & ((1 << COUNT_BITS) - 1)) as u8;
        packed >>= COUNT_BITS;
    }
    Ok(counts)
}

/// Bitset over `all`, most significant bit first, as base64.
pub fn encode_targets(targets: &[u32], all: &[u32]) -> String {
    let mut bytes = vec![0u8; all.len().div_ceil(8)];
    for (idx, value) in all.iter().enumerate() {
        if targets.contains(value) {
            bytes[idx / 8] |= 1 << (7 - idx % 8);
        }
    }
    STANDARD.encode(bytes)
}

pub fn decode_targets(encoded: &str, all: &[u32]) -> Result<Vec<u32>> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|_| Error::BadKey(encoded.to_string()))?;
    Ok(all
        .iter()
        .enumerate()
        .filter(|&(idx, _)| {
            bytes
                .get(idx / 8)
                .is_some_and(|byte| byte & (1 << (7 - idx % 8)) != 0)
        })
        .map(|(_, &value)| value)
        .collect())
}

pub fn compress(solvable: &Solvable, all: &[u32]) -> Result<Compressed> {
    let mut compressed = Compressed::new();
    for (description, targets) in solvable {
        let cards: Vec<Card> = serde_json::from_str(description)
            .map_err(|_| Error::BadKey(description.clone()))?;
        compressed.insert(encode_key(&cards)?, encode_targets(targets, all));
    }
    Ok(compressed)
}
