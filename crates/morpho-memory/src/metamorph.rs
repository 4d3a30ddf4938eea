//! Metamorph — a remembered (fingerprint, response) case.
//!
//! The stored fingerprint is a disconnected deep copy of the live one,
//! pinned to the canonical orientation so stored cases compare in one
//! shared frame. Mutating the live fingerprint afterward never changes a
//! stored case.

use morpho_core::error::Result;
use morpho_core::fingerprint::Morphognostic;
use morpho_core::types::Orientation;
use morpho_core::wire;
use std::io::{Read, Write};

/// A stored case: the fingerprint snapshot at decision time and the
/// response the agent took.
#[derive(Debug, Clone)]
pub struct Metamorph {
    fingerprint: Morphognostic,
    /// Response id the owning agent executed.
    pub response: i32,
    /// Human-readable response label ("forage", "turn-left", …).
    pub response_name: String,
    /// Indexes of events judged causal for the response, for later
    /// inspection by training tooling.
    pub effect_indexes: Vec<u32>,
}

impl Metamorph {
    /// Capture a case. The snapshot is taken by value and pinned to the
    /// canonical orientation (North).
    pub fn new(mut fingerprint: Morphognostic, response: i32) -> Self {
        fingerprint.set_orientation(Orientation::North);
        Self {
            fingerprint,
            response,
            response_name: String::new(),
            effect_indexes: Vec::new(),
        }
    }

    pub fn with_response_name(mut self, name: impl Into<String>) -> Self {
        self.response_name = name.into();
        self
    }

    pub fn with_effect_indexes(mut self, indexes: Vec<u32>) -> Self {
        self.effect_indexes = indexes;
        self
    }

    pub fn fingerprint(&self) -> &Morphognostic {
        &self.fingerprint
    }

    /// Whether two cases are interchangeable: same response, zero
    /// fingerprint distance.
    pub fn equivalent(&self, other: &Metamorph) -> Result<bool> {
        if self.response != other.response {
            return Ok(false);
        }
        Ok(self.fingerprint.compare(&other.fingerprint)? == 0.0)
    }

    pub fn save(&self, w: &mut impl Write) -> Result<()> {
        self.fingerprint.save(w)?;
        wire::write_i32(w, self.response)?;
        wire::write_string(w, &self.response_name)?;
        wire::write_i32(w, self.effect_indexes.len() as i32)?;
        for &index in &self.effect_indexes {
            wire::write_i32(w, index as i32)?;
        }
        Ok(())
    }

    pub fn load(r: &mut impl Read) -> Result<Self> {
        let fingerprint = Morphognostic::load(r)?;
        let response = wire::read_i32(r)?;
        let response_name = wire::read_string(r)?;
        let count = wire::read_i32(r)?;
        if count < 0 {
            return Err(morpho_core::MorphoError::malformed(format!(
                "negative effect index count {}",
                count
            )));
        }
        let mut effect_indexes = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let index = wire::read_i32(r)?;
            if index < 0 {
                return Err(morpho_core::MorphoError::malformed(format!(
                    "negative effect index {}",
                    index
                )));
            }
            effect_indexes.push(index as u32);
        }
        Ok(Self {
            fingerprint,
            response,
            response_name,
            effect_indexes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::prelude::*;
    use std::io::Cursor;

    fn live_fingerprint() -> Morphognostic {
        let mut f = Morphognostic::new(
            Orientation::East,
            EventShape::new(vec![1]).unwrap(),
            21,
            21,
            FingerprintConfig::default(),
        )
        .unwrap();
        f.update(&[Some(5)], 10, 10).unwrap();
        f
    }

    #[test]
    fn snapshot_is_pinned_to_north() {
        let m = Metamorph::new(live_fingerprint().clone(), 3);
        assert_eq!(m.fingerprint().orientation(), Orientation::North);
    }

    #[test]
    fn snapshot_does_not_alias_the_live_fingerprint() {
        let mut live = live_fingerprint();
        let m = Metamorph::new(live.clone(), 3);
        live.update(&[Some(9)], 11, 10).unwrap();
        assert_eq!(m.fingerprint().event_time(), 1);
        assert_eq!(
            m.fingerprint().neighborhoods()[0].sector(1, 1).density(0, 0),
            5.0
        );
    }

    #[test]
    fn wire_round_trip() {
        let m = Metamorph::new(live_fingerprint(), 7)
            .with_response_name("forage")
            .with_effect_indexes(vec![0, 2]);
        let mut buf = Vec::new();
        m.save(&mut buf).unwrap();
        let n = Metamorph::load(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(n.response, 7);
        assert_eq!(n.response_name, "forage");
        assert_eq!(n.effect_indexes, vec![0, 2]);
        assert!(m.equivalent(&n).unwrap());
    }
}
