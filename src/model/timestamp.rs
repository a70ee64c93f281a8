use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike};

use crate::wire::CodecError;

/// Layout of every date-bearing field. The bank never sends an offset.
pub const TIMESTAMP_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

/// Moscow time. The zone has had no daylight saving since 2014.
pub const MOSCOW_UTC_OFFSET_SECS: i32 = 3 * 3600;

const MOSCOW: FixedOffset = match FixedOffset::east_opt(MOSCOW_UTC_OFFSET_SECS) {
    Some(zone) => zone,
    None => panic!("UTC+03:00 is out of the offset range"),
};

/// `YYYY-MM-DDTHH:MM:SS`, byte by byte: `d` is an ASCII digit, anything else
/// is matched literally.
const TIMESTAMP_SHAPE: &[u8; 19] = b"dddd-dd-ddTdd:dd:dd";

/// Binds offset-less wire timestamps to the bank's local time zone.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TimestampCodec {
    zone: FixedOffset,
}

impl TimestampCodec {
    pub fn new(zone: FixedOffset) -> Self {
        Self { zone }
    }

    pub fn moscow() -> Self {
        Self::new(MOSCOW)
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    pub fn decode(&self, input: &str) -> Result<DateTime<FixedOffset>, CodecError> {
        let malformed = || CodecError::MalformedTimestamp {
            input: input.to_string(),
        };
        if !has_timestamp_shape(input) {
            return Err(malformed());
        }
        let local =
            NaiveDateTime::parse_from_str(input, TIMESTAMP_PATTERN).map_err(|_| malformed())?;
        // chrono reads second 60 as a leap second.
        if local.nanosecond() >= 1_000_000_000 {
            return Err(malformed());
        }
        self.zone
            .from_local_datetime(&local)
            .single()
            .ok_or_else(malformed)
    }

    /// Shifts `timestamp` into the bank's zone before formatting it.
    pub fn encode<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> String {
        timestamp
            .with_timezone(&self.zone)
            .format(TIMESTAMP_PATTERN)
            .to_string()
    }
}

fn has_timestamp_shape(input: &str) -> bool {
    input.len() == TIMESTAMP_SHAPE.len()
        && input
            .bytes()
            .zip(TIMESTAMP_SHAPE)
            .all(|(byte, expected)| match expected {
                b'd' => byte.is_ascii_digit(),
                literal => byte == *literal,
            })
}

impl Default for TimestampCodec {
    fn default() -> Self {
        Self::moscow()
    }
}
