//! Logical temporal types layered over integral encodings.
//!
//! | Logical type | Schema name | Encoding |
//! |---|---|---|
//! | [`Date`] | `org.apache.kafka.connect.data.Date` | `int32` days since the epoch |
//! | [`Time`] | `org.apache.kafka.connect.data.Time` | `int32` millis since UTC midnight |
//! | [`Timestamp`] | `org.apache.kafka.connect.data.Timestamp` | `int64` millis since the epoch |
//!
//! Every conversion checks that the schema is tagged with the expected
//! logical name first. All arithmetic is done in UTC.
//!
//! Logical values are [`UtcInstant`]s, which span every `i64` millisecond,
//! so Date and Timestamp decoding cannot fail once the schema matches.
//!
//! Time has an asymmetric window: encoding accepts `[0, 86_400_000)` while
//! decoding accepts `[0, 86_400_000]`. Decoding the upper boundary succeeds
//! but no instant encodes back to it.

use crate::error::{DataError, Result};
use crate::schema::{Schema, SchemaBuilder, SchemaType};
use crate::instant::UtcInstant;
use crate::values::Value;

/// Milliseconds in one UTC day.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Version carried by every canonical logical schema.
pub const LOGICAL_VERSION: i32 = 1;

// ============================================================================
// LogicalType
// ============================================================================

/// Closed set of logical temporal types.
///
/// Resolve it once from a schema with [`LogicalType::from_schema`] and
/// dispatch through it instead of comparing schema names at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Date,
    Time,
    Timestamp,
}

impl LogicalType {
    pub const ALL: [LogicalType; 3] = [LogicalType::Date, LogicalType::Time, LogicalType::Timestamp];

    /// Canonical schema name identifying this logical type.
    pub const fn logical_name(self) -> &'static str {
        match self {
            LogicalType::Date => Date::LOGICAL_NAME,
            LogicalType::Time => Time::LOGICAL_NAME,
            LogicalType::Timestamp => Timestamp::LOGICAL_NAME,
        }
    }

    /// Short label used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            LogicalType::Date => "Date",
            LogicalType::Time => "Time",
            LogicalType::Timestamp => "Timestamp",
        }
    }

    /// Primitive base encoding.
    pub const fn schema_type(self) -> SchemaType {
        match self {
            LogicalType::Date | LogicalType::Time => SchemaType::Int32,
            LogicalType::Timestamp => SchemaType::Int64,
        }
    }

    /// Resolve a logical type from a schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.logical_name() == name)
    }

    /// Resolve the logical type a schema is tagged with.
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        schema
            .logical_type()
            .ok_or_else(|| DataError::InvalidSchema {
                expected: "a logical temporal type",
                found: schema.name().map(str::to_string),
            })
    }

    /// Check whether `schema` is tagged with this logical type.
    pub fn matches(self, schema: &Schema) -> bool {
        schema.name() == Some(self.logical_name())
    }

    /// Builder preset with this type's base encoding, name and version.
    pub fn builder(self) -> SchemaBuilder {
        SchemaBuilder::new(self.schema_type())
            .name(self.logical_name())
            .version(LOGICAL_VERSION)
    }

    /// Canonical (required) schema for this logical type.
    pub fn schema(self) -> Schema {
        Schema::primitive(self.schema_type()).named(self.logical_name(), LOGICAL_VERSION)
    }

    /// Encode an instant into the matching integral [`Value`].
    pub fn encode_value(self, schema: &Schema, value: &UtcInstant) -> Result<Value> {
        match self {
            LogicalType::Date => Date::encode(schema, value).map(Value::Int32),
            LogicalType::Time => Time::encode(schema, value).map(Value::Int32),
            LogicalType::Timestamp => Timestamp::encode(schema, value).map(Value::Int64),
        }
    }

    /// Decode an integral [`Value`] back into an instant.
    ///
    /// Date and Time expect `Value::Int32`, Timestamp expects `Value::Int64`.
    pub fn decode_value(self, schema: &Schema, encoded: &Value) -> Result<UtcInstant> {
        match (self, encoded) {
            (LogicalType::Date, Value::Int32(days)) => Date::decode(schema, *days),
            (LogicalType::Time, Value::Int32(millis)) => Time::decode(schema, *millis),
            (LogicalType::Timestamp, Value::Int64(millis)) => Timestamp::decode(schema, *millis),
            (_, other) => Err(DataError::SchemaTypeMismatch {
                expected: self.schema_type().to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    fn check_schema(self, schema: &Schema) -> Result<()> {
        if self.matches(schema) {
            Ok(())
        } else {
            Err(DataError::InvalidSchema {
                expected: self.logical_name(),
                found: schema.name().map(str::to_string),
            })
        }
    }

    fn out_of_range(self, message: impl Into<String>) -> DataError {
        DataError::OutOfRange {
            logical_type: self.label(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Codecs
// ============================================================================

/// Typed codec for one logical type.
pub trait LogicalCodec {
    /// Canonical schema name.
    const LOGICAL_NAME: &'static str;
    /// Matching [`LogicalType`] variant.
    const LOGICAL_TYPE: LogicalType;
    /// Integral wire shape.
    type Encoded: Copy;

    /// Convert a logical value into its encoded form.
    fn encode(schema: &Schema, value: &UtcInstant) -> Result<Self::Encoded>;

    /// Convert an encoded value back into the logical value.
    fn decode(schema: &Schema, encoded: Self::Encoded) -> Result<UtcInstant>;

    fn builder() -> SchemaBuilder {
        Self::LOGICAL_TYPE.builder()
    }

    fn schema() -> Schema {
        Self::LOGICAL_TYPE.schema()
    }
}

/// Calendar day without time of day, encoded as days since the epoch.
#[derive(Debug, Clone, Copy)]
pub struct Date;

impl LogicalCodec for Date {
    const LOGICAL_NAME: &'static str = "org.apache.kafka.connect.data.Date";
    const LOGICAL_TYPE: LogicalType = LogicalType::Date;
    type Encoded = i32;

    fn encode(schema: &Schema, value: &UtcInstant) -> Result<i32> {
        Self::LOGICAL_TYPE.check_schema(schema)?;
        if !value.is_midnight() {
            return Err(Self::LOGICAL_TYPE.out_of_range(format!("{value} has non-zero time fields")));
        }
        let days = value.days();
        i32::try_from(days).map_err(|_| {
            Self::LOGICAL_TYPE.out_of_range(format!("{days} days does not fit in int32"))
        })
    }

    fn decode(schema: &Schema, encoded: i32) -> Result<UtcInstant> {
        Self::LOGICAL_TYPE.check_schema(schema)?;
        // |i32| * MILLIS_PER_DAY stays well inside i64.
        Ok(UtcInstant::from_millis(i64::from(encoded) * MILLIS_PER_DAY))
    }
}

/// Time of day without a date, encoded as millis since UTC midnight.
#[derive(Debug, Clone, Copy)]
pub struct Time;

impl LogicalCodec for Time {
    const LOGICAL_NAME: &'static str = "org.apache.kafka.connect.data.Time";
    const LOGICAL_TYPE: LogicalType = LogicalType::Time;
    type Encoded = i32;

    fn encode(schema: &Schema, value: &UtcInstant) -> Result<i32> {
        Self::LOGICAL_TYPE.check_schema(schema)?;
        let millis = value.millis();
        if !(0..MILLIS_PER_DAY).contains(&millis) {
            return Err(Self::LOGICAL_TYPE
                .out_of_range(format!("{value} is not within the first epoch day")));
        }
        // Bounded by MILLIS_PER_DAY above.
        Ok(millis as i32)
    }

    fn decode(schema: &Schema, encoded: i32) -> Result<UtcInstant> {
        Self::LOGICAL_TYPE.check_schema(schema)?;
        let millis = i64::from(encoded);
        if !(0..=MILLIS_PER_DAY).contains(&millis) {
            return Err(Self::LOGICAL_TYPE.out_of_range(format!(
                "{encoded} ms must be between 0 and {MILLIS_PER_DAY}"
            )));
        }
        Ok(UtcInstant::from_millis(millis))
    }
}

/// Absolute instant, encoded as millis since the epoch.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp;

impl LogicalCodec for Timestamp {
    const LOGICAL_NAME: &'static str = "org.apache.kafka.connect.data.Timestamp";
    const LOGICAL_TYPE: LogicalType = LogicalType::Timestamp;
    type Encoded = i64;

    fn encode(schema: &Schema, value: &UtcInstant) -> Result<i64> {
        Self::LOGICAL_TYPE.check_schema(schema)?;
        Ok(value.millis())
    }

    fn decode(schema: &Schema, encoded: i64) -> Result<UtcInstant> {
        Self::LOGICAL_TYPE.check_schema(schema)?;
        Ok(UtcInstant::from_millis(encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn utc_dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> UtcInstant {
        utc_dt(y, mo, d, h, mi, s).into()
    }

    fn millis(ms: i64) -> UtcInstant {
        UtcInstant::from_millis(ms)
    }

    // ========================================================================
    // Canonical schemas
    // ========================================================================

    #[test]
    fn test_canonical_schemas() {
        let date = Date::schema();
        assert_eq!(date.name(), Some("org.apache.kafka.connect.data.Date"));
        assert_eq!(date.version(), Some(1));
        assert_eq!(date.schema_type(), SchemaType::Int32);
        assert!(!date.is_optional());

        let time = Time::schema();
        assert_eq!(time.name(), Some("org.apache.kafka.connect.data.Time"));
        assert_eq!(time.schema_type(), SchemaType::Int32);

        let ts = Timestamp::schema();
        assert_eq!(ts.name(), Some("org.apache.kafka.connect.data.Timestamp"));
        assert_eq!(ts.schema_type(), SchemaType::Int64);

        // Builder and prebuilt schema agree.
        assert_eq!(Date::builder().build().unwrap(), Date::schema());
        let optional = Timestamp::builder().optional().build().unwrap();
        assert!(optional.is_optional());
        assert_eq!(optional.logical_type(), Some(LogicalType::Timestamp));
    }

    #[test]
    fn test_from_name_and_schema() {
        for logical in LogicalType::ALL {
            assert_eq!(LogicalType::from_name(logical.logical_name()), Some(logical));
            assert_eq!(LogicalType::from_schema(&logical.schema()).unwrap(), logical);
        }
        assert_eq!(LogicalType::from_name("date"), None);

        let plain = SchemaBuilder::int32().build().unwrap();
        assert!(matches!(
            LogicalType::from_schema(&plain),
            Err(DataError::InvalidSchema { found: None, .. })
        ));
    }

    // ========================================================================
    // Date
    // ========================================================================

    #[test]
    fn test_date_roundtrip_at_midnight() {
        let schema = Date::schema();
        for value in [
            utc(1970, 1, 1, 0, 0, 0),
            utc(1970, 1, 2, 0, 0, 0),
            utc(1969, 12, 31, 0, 0, 0),
            utc(2024, 2, 29, 0, 0, 0),
            utc(1900, 1, 1, 0, 0, 0),
        ] {
            let encoded = Date::encode(&schema, &value).unwrap();
            assert_eq!(Date::decode(&schema, encoded).unwrap(), value);
        }
    }

    #[test]
    fn test_date_encoding_is_days_since_epoch() {
        let schema = Date::schema();
        assert_eq!(Date::encode(&schema, &utc(1970, 1, 1, 0, 0, 0)).unwrap(), 0);
        assert_eq!(Date::encode(&schema, &utc(1970, 1, 11, 0, 0, 0)).unwrap(), 10);
        assert_eq!(Date::encode(&schema, &utc(1969, 12, 31, 0, 0, 0)).unwrap(), -1);
    }

    #[test]
    fn test_date_rejects_time_fields() {
        let schema = Date::schema();
        let midnight = utc_dt(2024, 5, 17, 0, 0, 0);
        for offending in [
            midnight + Duration::hours(1),
            midnight + Duration::minutes(1),
            midnight + Duration::seconds(1),
            midnight + Duration::milliseconds(1),
            midnight + Duration::nanoseconds(1),
        ] {
            assert!(matches!(
                Date::encode(&schema, &offending.into()),
                Err(DataError::OutOfRange { logical_type: "Date", .. })
            ));
        }
    }

    #[test]
    fn test_date_full_int32_range_roundtrips() {
        let schema = Date::schema();
        for days in [i32::MIN, -100_000_000, 100_000_000, i32::MAX] {
            let decoded = Date::decode(&schema, days).unwrap();
            assert_eq!(decoded.millis(), i64::from(days) * MILLIS_PER_DAY);
            assert_eq!(Date::encode(&schema, &decoded).unwrap(), days);
        }
        // Past chrono's calendar, still a valid logical value.
        assert!(Date::decode(&schema, i32::MAX).unwrap().to_datetime().is_none());
    }

    #[test]
    fn test_date_encode_rejects_days_beyond_int32() {
        let schema = Date::schema();
        let too_late = millis((i64::from(i32::MAX) + 1) * MILLIS_PER_DAY);
        assert!(matches!(
            Date::encode(&schema, &too_late),
            Err(DataError::OutOfRange { logical_type: "Date", .. })
        ));
    }

    // ========================================================================
    // Time
    // ========================================================================

    #[test]
    fn test_time_roundtrip_within_day() {
        let schema = Time::schema();
        for ms in [0, 1, 999, 3_600_000, 45_296_789, MILLIS_PER_DAY - 1] {
            let encoded = Time::encode(&schema, &millis(ms)).unwrap();
            assert_eq!(i64::from(encoded), ms);
            assert_eq!(Time::decode(&schema, encoded).unwrap(), millis(ms));
        }
    }

    #[test]
    fn test_time_boundary_asymmetry() {
        let schema = Time::schema();
        let boundary = MILLIS_PER_DAY as i32;

        // Decoding the upper boundary is accepted...
        let decoded = Time::decode(&schema, boundary).unwrap();
        assert_eq!(decoded, millis(MILLIS_PER_DAY));

        // ...but that instant does not encode back to the boundary.
        assert!(matches!(
            Time::encode(&schema, &decoded),
            Err(DataError::OutOfRange { logical_type: "Time", .. })
        ));
    }

    #[test]
    fn test_time_rejects_date_component() {
        let schema = Time::schema();
        assert!(Time::encode(&schema, &utc(1970, 1, 2, 0, 0, 1)).is_err());
        assert!(Time::encode(&schema, &millis(-1)).is_err());
        assert!(Time::encode(&schema, &utc(2024, 1, 1, 10, 0, 0)).is_err());
    }

    #[test]
    fn test_time_decode_rejects_out_of_window() {
        let schema = Time::schema();
        for encoded in [-1, i32::MIN, MILLIS_PER_DAY as i32 + 1, i32::MAX] {
            assert!(matches!(
                Time::decode(&schema, encoded),
                Err(DataError::OutOfRange { .. })
            ));
        }
    }

    // ========================================================================
    // Timestamp
    // ========================================================================

    #[test]
    fn test_timestamp_roundtrip() {
        let schema = Timestamp::schema();
        for ms in [
            0,
            1,
            -1,
            1_700_000_000_123,
            -62_135_596_800_000,
            253_402_300_799_999,
        ] {
            let decoded = Timestamp::decode(&schema, ms).unwrap();
            assert_eq!(Timestamp::encode(&schema, &decoded).unwrap(), ms);
        }
    }

    #[test]
    fn test_timestamp_full_int64_range_roundtrips() {
        let schema = Timestamp::schema();
        for ms in [i64::MIN, -9_000_000_000_000_000, 9_000_000_000_000_000, i64::MAX] {
            let decoded = Timestamp::decode(&schema, ms).unwrap();
            assert_eq!(decoded.millis(), ms);
            assert_eq!(Timestamp::encode(&schema, &decoded).unwrap(), ms);
        }
    }

    #[test]
    fn test_timestamp_encode_truncates_sub_millis() {
        let schema = Timestamp::schema();
        let value = utc_dt(2023, 11, 14, 22, 13, 20) + Duration::microseconds(123_456);
        let value = UtcInstant::from(value);
        assert_eq!(Timestamp::encode(&schema, &value).unwrap(), 1_700_000_000_123);
    }

    // ========================================================================
    // Schema mismatch
    // ========================================================================

    #[test]
    fn test_schema_mismatch_rejected_for_every_type() {
        let unnamed = SchemaBuilder::int64().build().unwrap();
        let wrong = SchemaBuilder::int32().name("date").version(1).build().unwrap();
        let instant = utc(1970, 1, 1, 0, 0, 0);

        for schema in [&unnamed, &wrong, &Time::schema()] {
            assert!(matches!(
                Date::encode(schema, &instant),
                Err(DataError::InvalidSchema { .. })
            ));
            assert!(matches!(
                Date::decode(schema, 0),
                Err(DataError::InvalidSchema { .. })
            ));
        }
        for schema in [&unnamed, &wrong, &Date::schema()] {
            assert!(matches!(
                Time::encode(schema, &instant),
                Err(DataError::InvalidSchema { .. })
            ));
            assert!(matches!(
                Time::decode(schema, 0),
                Err(DataError::InvalidSchema { .. })
            ));
        }
        for schema in [&unnamed, &wrong, &Date::schema()] {
            assert!(matches!(
                Timestamp::encode(schema, &instant),
                Err(DataError::InvalidSchema { .. })
            ));
            assert!(matches!(
                Timestamp::decode(schema, 0),
                Err(DataError::InvalidSchema { .. })
            ));
        }
    }

    #[test]
    fn test_schema_check_runs_before_range_check() {
        // Out-of-range value against the wrong schema reports the schema.
        let err = Time::decode(&Date::schema(), -5).unwrap_err();
        assert!(matches!(err, DataError::InvalidSchema { .. }));
        assert!(err.to_string().contains("org.apache.kafka.connect.data.Date"));
    }

    // ========================================================================
    // Dynamic dispatch
    // ========================================================================

    #[test]
    fn test_encode_decode_value() {
        let instant = utc(2001, 9, 9, 0, 0, 0);

        let date = LogicalType::Date.encode_value(&Date::schema(), &instant).unwrap();
        assert_eq!(date, Value::Int32(11574));
        assert_eq!(
            LogicalType::Date.decode_value(&Date::schema(), &date).unwrap(),
            instant
        );

        let ts = LogicalType::Timestamp
            .encode_value(&Timestamp::schema(), &instant)
            .unwrap();
        assert_eq!(ts, Value::Int64(1_000_000_000_000 - 6_400_000));

        assert!(matches!(
            LogicalType::Timestamp.decode_value(&Timestamp::schema(), &Value::Int32(0)),
            Err(DataError::SchemaTypeMismatch { .. })
        ));
    }
}
