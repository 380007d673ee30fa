//! In-memory ledger of positions keyed by (account, instrument).

use log::debug;

use crate::errors::Result;

use super::{NewPosition, Position, PositionKey};

/// Ordered collection of positions with unique identities.
///
/// Insertion order is kept for display; replacing a position keeps its slot.
/// `keys[i]` is always `positions[i].key()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    positions: Vec<Position>,
    keys: Vec<PositionKey>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the input and inserts it, replacing any position with the
    /// same identity. The ledger is untouched when validation fails.
    pub fn upsert(&mut self, input: NewPosition) -> Result<Position> {
        let position = Position::try_from(input)?;
        self.upsert_position(position.clone());
        Ok(position)
    }

    /// Inserts an already validated position. Returns the replaced position,
    /// if any. The replacement takes over the display names of the new
    /// position.
    pub fn upsert_position(&mut self, position: Position) -> Option<Position> {
        let key = position.key();
        match self.index_of(&key) {
            Some(index) => {
                debug!(
                    "Replacing position {}/{} in ledger",
                    position.account, position.instrument
                );
                Some(std::mem::replace(&mut self.positions[index], position))
            }
            None => {
                self.positions.push(position);
                self.keys.push(key);
                None
            }
        }
    }

    /// Removes the position with the given identity. Absent identities are a
    /// no-op.
    pub fn remove(&mut self, account: &str, instrument: &str) -> Option<Position> {
        let index = self.index_of(&PositionKey::new(account, instrument))?;
        self.keys.remove(index);
        Some(self.positions.remove(index))
    }

    /// Current positions in insertion order. The iterator is `Clone`, so it
    /// can be restarted without another borrow of the ledger.
    pub fn all(&self) -> std::slice::Iter<'_, Position> {
        self.positions.iter()
    }

    /// Positions in canonical report order.
    pub fn sorted(&self) -> Vec<&Position> {
        let mut positions: Vec<&Position> = self.positions.iter().collect();
        positions.sort_by(|a, b| a.canonical_cmp(b));
        positions
    }

    /// Looks a position up by identity. Instrument names match on their
    /// canonical key, so width and separator variants find the same position.
    pub fn get(&self, account: &str, instrument: &str) -> Option<&Position> {
        self.get_by_key(&PositionKey::new(account, instrument))
    }

    pub fn get_by_key(&self, key: &PositionKey) -> Option<&Position> {
        self.index_of(key).map(|index| &self.positions[index])
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Sum of all valuations in JPY. Accumulates in `u128` so any number of
    /// `u64` valuations fits.
    pub fn total_value(&self) -> u128 {
        self.positions
            .iter()
            .map(|p| u128::from(p.valuation_jpy))
            .sum()
    }

    fn index_of(&self, key: &PositionKey) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }
}

impl FromIterator<Position> for Ledger {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut ledger = Ledger::new();
        for position in iter {
            ledger.upsert_position(position);
        }
        ledger
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}
