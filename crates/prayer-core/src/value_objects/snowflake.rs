//! Snowflake identifiers for every prayer-domain row
//!
//! Layout (most significant bit first):
//! - 41 bits: milliseconds since [`Snowflake::EPOCH`]
//! - 10 bits: worker ID (0-1023)
//! - 12 bits: per-millisecond sequence (0-4095)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const WORKER_BITS: i64 = 10;
const SEQUENCE_BITS: i64 = 12;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const MAX_WORKER_ID: u16 = 1 << WORKER_BITS;

/// 64-bit, time-ordered identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// 2025-01-01 00:00:00 UTC, in Unix milliseconds
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Unix milliseconds at which the ID was minted
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> (WORKER_BITS + SEQUENCE_BITS)) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & i64::from(MAX_WORKER_ID - 1)) as u16
    }

    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 & SEQUENCE_MASK) as u16
    }

    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.trim()
            .parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
    #[error("worker id {0} out of range (must be < 1024)")]
    WorkerIdOutOfRange(u16),
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Browsers lose precision above 2^53, so IDs travel as JSON strings
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct SnowflakeVisitor;

        impl Visitor<'_> for SnowflakeVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a snowflake ID as a string or integer")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Snowflake, E> {
                Ok(Snowflake(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Snowflake, E> {
                i64::try_from(value)
                    .map(Snowflake)
                    .map_err(|_| E::custom("snowflake out of range"))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Snowflake, E> {
                Snowflake::parse(value).map_err(|_| E::custom("invalid snowflake string"))
            }
        }

        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

/// Lock-free ID generator, shareable behind an `Arc`
pub struct SnowflakeGenerator {
    worker_id: u16,
    sequence: AtomicI64,
    last_timestamp: AtomicI64,
}

impl SnowflakeGenerator {
    /// Create a generator for `worker_id`, which must fit in 10 bits
    pub fn new(worker_id: u16) -> Result<Self, SnowflakeParseError> {
        if worker_id >= MAX_WORKER_ID {
            return Err(SnowflakeParseError::WorkerIdOutOfRange(worker_id));
        }
        Ok(Self {
            worker_id,
            sequence: AtomicI64::new(0),
            last_timestamp: AtomicI64::new(0),
        })
    }

    pub fn generate(&self) -> Snowflake {
        loop {
            let mut timestamp = current_millis();
            let last = self.last_timestamp.load(Ordering::Acquire);

            if timestamp < last {
                // Clock went backwards; never reuse a past millisecond
                timestamp = last;
            }

            let sequence = if timestamp == last {
                let seq = self.sequence.fetch_add(1, Ordering::Relaxed) & SEQUENCE_MASK;
                if seq == 0 {
                    while current_millis() <= last {
                        std::hint::spin_loop();
                    }
                    timestamp = current_millis();
                    self.sequence.store(1, Ordering::Relaxed);
                    0
                } else {
                    seq
                }
            } else {
                self.sequence.store(1, Ordering::Relaxed);
                0
            };

            if self
                .last_timestamp
                .compare_exchange(last, timestamp, Ordering::Release, Ordering::Relaxed)
                .is_ok()
            {
                let id = ((timestamp - Snowflake::EPOCH) << (WORKER_BITS + SEQUENCE_BITS))
                    | (i64::from(self.worker_id) << SEQUENCE_BITS)
                    | sequence;
                return Snowflake::new(id);
            }
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self {
            worker_id: 0,
            sequence: AtomicI64::new(0),
            last_timestamp: AtomicI64::new(0),
        }
    }
}

#[inline]
fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_parse_accepts_padded_digits() {
        assert_eq!(Snowflake::parse(" 42 ").unwrap().into_inner(), 42);
        assert_eq!(
            Snowflake::parse("forty-two"),
            Err(SnowflakeParseError::InvalidFormat)
        );
    }

    #[test]
    fn test_json_uses_string_form() {
        let json = serde_json::to_string(&Snowflake::new(987_654_321_012_345)).unwrap();
        assert_eq!(json, "\"987654321012345\"");
    }

    #[test]
    fn test_json_accepts_string_or_number() {
        let from_str: Snowflake = serde_json::from_str("\"77\"").unwrap();
        let from_num: Snowflake = serde_json::from_str("77").unwrap();
        assert_eq!(from_str, from_num);
        assert!(serde_json::from_str::<Snowflake>("\"abc\"").is_err());
    }

    #[test]
    fn test_generator_rejects_wide_worker_id() {
        assert!(matches!(
            SnowflakeGenerator::new(1024),
            Err(SnowflakeParseError::WorkerIdOutOfRange(1024))
        ));
        assert!(SnowflakeGenerator::new(1023).is_ok());
    }

    #[test]
    fn test_generated_ids_increase_and_carry_worker() {
        let gen = SnowflakeGenerator::new(7).unwrap();
        let mut last = Snowflake::default();
        for _ in 0..2000 {
            let id = gen.generate();
            assert!(id > last);
            assert_eq!(id.worker_id(), 7);
            last = id;
        }
    }

    #[test]
    fn test_timestamp_round_trips_through_layout() {
        let gen = SnowflakeGenerator::default();
        let before = current_millis();
        let id = gen.generate();
        let after = current_millis();
        assert!((before..=after).contains(&id.timestamp()));
    }

    #[test]
    fn test_generator_unique_across_threads() {
        let gen = Arc::new(SnowflakeGenerator::new(3).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gen = Arc::clone(&gen);
                thread::spawn(move || (0..1000).map(|_| gen.generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 4000);
    }
}
