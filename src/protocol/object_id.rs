//! # Object Identifiers
//!
//! 64-bit object ids with reserved flag bits.
//!
//! ```text
//! bit 60  CHARACTER
//! bit 58  SPAWNED
//! bit 46  CLIENT
//! bit 32  PERSISTENT
//! bits 0..32  random
//! ```
//!
//! Generation is stateless. Nothing checks for collisions; with 32 random bits a
//! clash is possible and accepted.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags::bitflags! {
    /// Reserved flag bits of an object id
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjectIdFlags: u64 {
        /// Stored in the database
        const PERSISTENT = 1 << 32;
        /// Created by a client
        const CLIENT = 1 << 46;
        /// Spawned at runtime
        const SPAWNED = 1 << 58;
        /// A player character
        const CHARACTER = 1 << 60;
    }
}

const RANDOM_MASK: u64 = u32::MAX as u64;

/// A 64-bit object id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Mint a fresh id with the thread-local RNG
    pub fn generate(flags: ObjectIdFlags) -> Self {
        Self::generate_with(&mut rand::rng(), flags)
    }

    /// Mint a fresh id from a caller-supplied RNG
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, flags: ObjectIdFlags) -> Self {
        let random = u64::from(rng.random::<u32>());
        ObjectId(random | flags.bits())
    }

    /// Flag-argument form: each `true` sets its reserved bit
    pub fn generate_flagged(persistent: bool, client: bool, spawned: bool, character: bool) -> Self {
        let mut flags = ObjectIdFlags::empty();
        flags.set(ObjectIdFlags::PERSISTENT, persistent);
        flags.set(ObjectIdFlags::CLIENT, client);
        flags.set(ObjectIdFlags::SPAWNED, spawned);
        flags.set(ObjectIdFlags::CHARACTER, character);
        Self::generate(flags)
    }

    /// The reserved flags set in this id
    pub fn flags(self) -> ObjectIdFlags {
        ObjectIdFlags::from_bits_truncate(self.0)
    }

    /// The low 32 random bits
    pub fn random_part(self) -> u32 {
        (self.0 & RANDOM_MASK) as u32
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<ObjectId> for u64 {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl From<u64> for ObjectId {
    fn from(raw: u64) -> Self {
        ObjectId(raw)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_character_flags_over_many_trials() {
        for _ in 0..2000 {
            let id = ObjectId::generate_flagged(true, false, false, true);
            assert_ne!(id.0 & (1 << 32), 0);
            assert_ne!(id.0 & (1 << 60), 0);
            assert_eq!(id.0 & (1 << 46), 0);
            assert_eq!(id.0 & (1 << 58), 0);
        }
    }

    #[test]
    fn test_no_flags_stays_in_low_word() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let id = ObjectId::generate_with(&mut rng, ObjectIdFlags::empty());
            assert!(id.0 <= u64::from(u32::MAX));
            assert!(id.flags().is_empty());
        }
    }

    #[test]
    fn test_flag_round_trip() {
        let flags = ObjectIdFlags::CLIENT | ObjectIdFlags::SPAWNED;
        let id = ObjectId::generate(flags);
        assert_eq!(id.flags(), flags);
        assert_eq!(id.0 & !RANDOM_MASK, flags.bits());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = ObjectId::generate_with(&mut StdRng::seed_from_u64(99), ObjectIdFlags::PERSISTENT);
        let b = ObjectId::generate_with(&mut StdRng::seed_from_u64(99), ObjectIdFlags::PERSISTENT);
        assert_eq!(a, b);
        assert_eq!(a.random_part() as u64 | (1 << 32), a.0);
    }
}
