//! Change event → source record → JSON bytes → offset commit → resume.

use cdc_connect::{
    DefaultSourceRecordGenerator, FormattedData, GeneratorConfig, OffsetMode, OpType, Operation,
    SourceRecordGenerator, TableName, Transaction,
};
use chrono::{DateTime, TimeZone, Utc};
use connect_core::{
    Converter, ConverterConfigs, Date, LogicalCodec, Schema, SchemaBuilder, Struct, Time,
    Timestamp, Value,
};
use connect_json::JsonConverter;
use offset_store::{FilesystemOffsetStore, OffsetStore};
use tempfile::TempDir;

/// Initialize logging for tests
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .try_init();
}

fn key_schema() -> Schema {
    SchemaBuilder::structure()
        .name("HR.EMPLOYEES.key")
        .field("EMP_ID", SchemaBuilder::int32().build().unwrap())
        .build()
        .unwrap()
}

fn row_schema() -> Schema {
    SchemaBuilder::structure()
        .name("HR.EMPLOYEES")
        .field("EMP_ID", SchemaBuilder::int32().build().unwrap())
        .field("NAME", SchemaBuilder::string().build().unwrap())
        .field("HIRE_DATE", Date::schema())
        .field("SHIFT_START", Time::builder().optional().build().unwrap())
        .field("OP_TS", Timestamp::schema())
        .build()
        .unwrap()
}

fn key(id: i32) -> Struct {
    Struct::new(key_schema()).unwrap().with("EMP_ID", id).unwrap()
}

fn row(id: i32, name: &str) -> Struct {
    Struct::new(row_schema())
        .unwrap()
        .with("EMP_ID", id)
        .unwrap()
        .with("NAME", name)
        .unwrap()
        .with("HIRE_DATE", Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap())
        .unwrap()
        .with("SHIFT_START", DateTime::from_timestamp_millis(8 * 3_600_000).unwrap())
        .unwrap()
        .with("OP_TS", DateTime::from_timestamp_millis(1_700_000_000_123).unwrap())
        .unwrap()
}

fn operation(op_type: OpType, position: &str) -> Operation {
    Operation::new(
        TableName::new("HR", "EMPLOYEES"),
        op_type,
        position,
        Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap(),
    )
}

#[tokio::test]
async fn test_generate_convert_and_resume() {
    init_logging();
    let tmp = TempDir::new().unwrap();

    let generator = DefaultSourceRecordGenerator::new(GeneratorConfig {
        offset_mode: OffsetMode::Position,
        ..GeneratorConfig::default()
    });

    let mut key_converter = JsonConverter::new();
    key_converter
        .configure(&ConverterConfigs::new(), true)
        .unwrap();
    let mut value_converter = JsonConverter::new();
    value_converter
        .configure(&ConverterConfigs::new(), false)
        .unwrap();

    let tx = Transaction::new("12.4.1077", Utc::now(), 1);
    let op = operation(OpType::PrimaryKeyUpdate, "000000001234");
    let mut data = FormattedData::new();
    data.push(Some(key(1)), row(1, "before")).unwrap();
    data.push(Some(key(2)), row(2, "after")).unwrap();

    let records = generator.create_source_records(&tx, &op, data);
    assert_eq!(records.len(), 2);

    let store = FilesystemOffsetStore::new(tmp.path());
    for record in &records {
        let topic = record.topic();
        let key = record.key().unwrap();

        let key_bytes = key_converter
            .from_connect_data(topic, key.schema().map(|s| s.as_ref()), key.value())
            .unwrap();
        let value_bytes = value_converter
            .from_connect_data(
                topic,
                record.value_schema().map(|s| s.as_ref()),
                record.value().value(),
            )
            .unwrap();

        // The consumer side reads back exactly what was produced.
        assert_eq!(&key_converter.to_connect_data(topic, &key_bytes).unwrap(), key);
        assert_eq!(
            &value_converter.to_connect_data(topic, &value_bytes).unwrap(),
            record.value()
        );

        store.commit_record(record).await.unwrap();
    }

    // A restarted source finds the position of the last delivered change.
    let restarted = FilesystemOffsetStore::new(tmp.path());
    let resumed = restarted
        .read(records[1].source_partition())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resumed.offset["position"].as_str(), Some("000000001234"));
}

#[test]
fn test_logical_fields_on_the_wire() {
    init_logging();
    let generator = DefaultSourceRecordGenerator::default();
    let converter = JsonConverter::new();

    let tx = Transaction::new("1", Utc::now(), 1);
    let record = generator.create_source_record(
        &tx,
        &operation(OpType::Insert, "000000000001"),
        None,
        row(9, "carol"),
    );

    let bytes = converter
        .from_connect_data(
            record.topic(),
            record.value_schema().map(|s| s.as_ref()),
            record.value().value(),
        )
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["payload"]["HIRE_DATE"], 17956);
    assert_eq!(json["payload"]["SHIFT_START"], 28_800_000);
    assert_eq!(json["payload"]["OP_TS"], 1_700_000_000_123i64);
    assert_eq!(
        json["schema"]["fields"][2]["name"],
        "org.apache.kafka.connect.data.Date"
    );

    let back = converter.to_connect_data(record.topic(), &bytes).unwrap();
    let Value::Struct(back) = back.value() else {
        panic!("expected struct payload");
    };
    assert_eq!(
        back.get("HIRE_DATE").unwrap(),
        &Value::from(Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_incomplete_struct_aborts_serialization() {
    init_logging();
    let converter = JsonConverter::new();
    let schema = row_schema();

    // Midday is not a calendar date.
    let mut record = Struct::new(schema.clone()).unwrap();
    assert!(record
        .put("HIRE_DATE", Utc.with_ymd_and_hms(2019, 3, 1, 12, 0, 0).unwrap())
        .is_err());

    // Required fields left unset are rejected rather than written as null.
    let err = converter
        .from_connect_data("HR.EMPLOYEES", Some(&schema), &Value::Struct(record))
        .unwrap_err();
    assert!(matches!(
        err,
        connect_core::ConverterError::Serialization { ref topic, .. } if topic == "HR.EMPLOYEES"
    ));
}
