//! Bind → execute → fetch round trips against a live database.
//!
//! Connection parameters come from DBNAME, DBUSER and DBPASS, like the
//! rest of the suite.

use chrono::{Duration, NaiveDate};
use oci8::{Environment, Error, Result, Timestamp, Value, Zone};

fn connect(oracle: &Environment) -> Result<oci8::Connection> {
    let dbname = std::env::var("DBNAME").expect("database name");
    let dbuser = std::env::var("DBUSER").expect("user name");
    let dbpass = std::env::var("DBPASS").expect("password");
    oracle.connect(&format!("{}:{}@{}", dbuser, dbpass, dbname))
}

fn create_test_table(conn: &oci8::Connection, name: &str, columns: &str) -> Result<()> {
    let stmt = conn.prepare(&format!("
        DECLARE
            name_already_used EXCEPTION; PRAGMA EXCEPTION_INIT(name_already_used, -955);
        BEGIN
            EXECUTE IMMEDIATE 'CREATE TABLE {} ({})';
        EXCEPTION
            WHEN name_already_used THEN
                EXECUTE IMMEDIATE 'TRUNCATE TABLE {}';
        END;
    ", name, columns, name))?;
    stmt.execute(&[])?;
    Ok(())
}

#[test]
fn eight_value_scenario() -> Result<()> {
    let oracle = oci8::env()?;
    let conn = connect(oracle)?;
    create_test_table(&conn, "test_eight_values", "
        c0 VARCHAR2(10),
        c1 VARCHAR2(10),
        c2 VARCHAR2(10),
        c3 NUMBER(19),
        c4 TIMESTAMP(9) WITH TIME ZONE,
        c5 CHAR(5),
        c6 RAW(8),
        c7 BINARY_DOUBLE
    ")?;

    let hired = Timestamp::from_parts(
        2012, 7, 20, 20, 18, 4, 123_456_789,
        Zone::resolve("America/New_York", 0, 0)?,
    )?;
    let raw: Vec<u8> = (0x3D..=0x44).collect();

    let stmt = conn.prepare("
        INSERT INTO test_eight_values (c0, c1, c2, c3, c4, c5, c6, c7)
        VALUES (:0, :1, :2, :3, :4, :5, :6, :7)
    ")?;
    assert_eq!(stmt.param_count()?, 8);
    let count = stmt.execute(&[
        Value::Null,
        Value::Bool(true),
        Value::Bool(false),
        Value::Int(1234567890123456789),
        Value::Timestamp(hired.clone()),
        Value::Text(String::from("bee")),
        Value::Bytes(raw.clone()),
        Value::Float(3.14),
    ])?;
    assert_eq!(count, 1);

    let stmt = conn.prepare("SELECT c0, c1, c2, c3, c4, c5, c6, c7 FROM test_eight_values")?;
    let mut rows = stmt.query(&[])?;
    let row = rows.next()?.expect("the inserted row");

    assert_eq!(row[0], Value::Null);
    assert_eq!(row[1], Value::Text(String::from("true")));
    assert_eq!(row[2], Value::Text(String::from("false")));
    match &row[3] {
        Value::Text(num) => assert_eq!(num.parse::<i64>().expect("numeric text"), 1234567890123456789),
        other => panic!("unexpected c3: {:?}", other),
    }
    match &row[4] {
        Value::Timestamp(ts) => {
            assert_eq!(ts.to_utc(), hired.to_utc());
            assert_eq!(ts.zone_name(), "America/New_York");
        }
        other => panic!("unexpected c4: {:?}", other),
    }
    // CHAR(5) keeps its trailing padding.
    assert_eq!(row[5], Value::Text(String::from("bee  ")));
    assert_eq!(row[6], Value::Bytes(raw));
    match row[7] {
        Value::Float(val) => assert_eq!(val.to_bits(), 3.14f64.to_bits()),
        ref other => panic!("unexpected c7: {:?}", other),
    }

    assert!(rows.next()?.is_none());
    Ok(())
}

#[test]
fn multi_byte_text_uses_width_headroom() -> Result<()> {
    let oracle = oci8::env()?;
    let conn = connect(oracle)?;
    create_test_table(&conn, "test_wide_text", "txt VARCHAR2(12 CHAR)")?;

    // 12 characters, 3 bytes each in AL32UTF8: only the 4x sizing
    // strategy fetches this without truncation.
    let text = "日本語の文字列です、ね?".to_string();
    assert!(text.as_bytes().len() > 12);

    let stmt = conn.prepare("INSERT INTO test_wide_text (txt) VALUES (:0)")?;
    stmt.execute(&[Value::Text(text.clone())])?;

    let stmt = conn.prepare("SELECT txt FROM test_wide_text")?;
    let mut rows = stmt.query(&[])?;
    let row = rows.next()?.expect("the inserted row");
    assert_eq!(row[0], Value::Text(text));
    Ok(())
}

#[test]
fn large_binary_takes_the_lob_path() -> Result<()> {
    let oracle = oci8::env()?;
    let conn = connect(oracle)?;
    create_test_table(&conn, "test_large_binary", "bin BLOB")?;

    // Over the inline bind threshold: binds through a temporary BLOB,
    // fetches back through the piecewise read loop.
    let data: Vec<u8> = (0..6000u32).map(|i| (i % 251) as u8).collect();

    let stmt = conn.prepare("INSERT INTO test_large_binary (bin) VALUES (:0)")?;
    stmt.execute(&[Value::Bytes(data.clone())])?;

    let stmt = conn.prepare("SELECT bin FROM test_large_binary")?;
    let mut rows = stmt.query(&[])?;
    let row = rows.next()?.expect("the inserted row");
    assert_eq!(row[0], Value::Bytes(data));
    Ok(())
}

#[test]
fn null_round_trip() -> Result<()> {
    let oracle = oci8::env()?;
    let conn = connect(oracle)?;

    let stmt = conn.prepare("SELECT :0 FROM dual")?;
    let mut rows = stmt.query(&[Value::Null])?;
    let row = rows.next()?.expect("one row");
    assert!(row[0].is_null());
    Ok(())
}

#[test]
fn synthetic_zone_decodes_to_fixed_offset() -> Result<()> {
    let oracle = oci8::env()?;
    let conn = connect(oracle)?;

    let ts = Timestamp::from_parts(2020, 2, 29, 23, 59, 59, 0, Zone::fixed(5, 30)?)?;
    let stmt = conn.prepare("SELECT :0 FROM dual")?;
    let mut rows = stmt.query(&[Value::Timestamp(ts.clone())])?;
    let row = rows.next()?.expect("one row");
    match &row[0] {
        Value::Timestamp(fetched) => {
            assert_eq!(fetched.to_utc(), ts.to_utc());
            assert_eq!(fetched.offset(), ts.offset());
        }
        other => panic!("unexpected value: {:?}", other),
    }
    Ok(())
}

#[test]
fn day_second_intervals() -> Result<()> {
    let oracle = oci8::env()?;
    let conn = connect(oracle)?;

    let stmt = conn.prepare("SELECT INTERVAL '3 11:45:28.15' DAY TO SECOND(9) FROM dual")?;
    let mut rows = stmt.query(&[])?;
    let row = rows.next()?.expect("one row");
    let expected = Duration::days(3) + Duration::hours(11) + Duration::minutes(45)
        + Duration::seconds(28) + Duration::nanoseconds(150_000_000);
    assert_eq!(row[0], Value::IntervalDS(expected));

    let stmt = conn.prepare("SELECT INTERVAL '-0 00:00:01.000000001' DAY TO SECOND(9) FROM dual")?;
    let mut rows = stmt.query(&[])?;
    let row = rows.next()?.expect("one row");
    assert_eq!(row[0], Value::IntervalDS(-(Duration::seconds(1) + Duration::nanoseconds(1))));
    Ok(())
}

#[test]
fn year_month_intervals() -> Result<()> {
    let oracle = oci8::env()?;
    let conn = connect(oracle)?;

    let stmt = conn.prepare("SELECT INTERVAL '2-3' YEAR TO MONTH FROM dual")?;
    let mut rows = stmt.query(&[])?;
    let row = rows.next()?.expect("one row");
    assert_eq!(row[0], Value::IntervalYM(27));

    let stmt = conn.prepare("SELECT INTERVAL '-2-3' YEAR TO MONTH FROM dual")?;
    let mut rows = stmt.query(&[])?;
    let row = rows.next()?.expect("one row");
    assert_eq!(row[0], Value::IntervalYM(-27));
    Ok(())
}

#[test]
fn zoneless_timestamp_gets_the_configured_location() -> Result<()> {
    let oracle = oci8::env()?;
    let dbname = std::env::var("DBNAME").expect("database name");
    let dbuser = std::env::var("DBUSER").expect("user name");
    let dbpass = std::env::var("DBPASS").expect("password");
    let conn = oracle.connect(&format!("{}:{}@{}?loc=Europe/Paris", dbuser, dbpass, dbname))?;

    let stmt = conn.prepare("SELECT TIMESTAMP '2021-06-01 10:30:00' FROM dual")?;
    let mut rows = stmt.query(&[])?;
    let row = rows.next()?.expect("one row");
    match &row[0] {
        Value::Timestamp(ts) => {
            let wall = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap().and_hms_opt(10, 30, 0).unwrap();
            assert_eq!(ts.local(), wall);
            assert_eq!(ts.zone_name(), "Europe/Paris");
        }
        other => panic!("unexpected value: {:?}", other),
    }
    Ok(())
}

#[test]
fn legacy_date_reads_as_timestamp() -> Result<()> {
    let oracle = oci8::env()?;
    let conn = connect(oracle)?;

    let stmt = conn.prepare("SELECT DATE '1950-08-07' FROM dual")?;
    let mut rows = stmt.query(&[])?;
    let row = rows.next()?.expect("one row");
    match &row[0] {
        Value::Timestamp(ts) => {
            let wall = NaiveDate::from_ymd_opt(1950, 8, 7).unwrap().and_hms_opt(0, 0, 0).unwrap();
            assert_eq!(ts.local(), wall);
        }
        other => panic!("unexpected value: {:?}", other),
    }
    Ok(())
}

#[test]
fn select_needs_query_and_vice_versa() -> Result<()> {
    let oracle = oci8::env()?;
    let conn = connect(oracle)?;

    let stmt = conn.prepare("SELECT 1 FROM dual")?;
    match stmt.execute(&[]) {
        Err(Error::Interface(msg)) => assert_eq!(msg, "use query to execute SELECT"),
        other => panic!("unexpected result: {:?}", other),
    }

    // The statement-type check runs before execute, so the statement
    // never has to be executable.
    let stmt = conn.prepare("DELETE FROM dual WHERE 1 = 0")?;
    match stmt.query(&[]) {
        Err(Error::Interface(msg)) => assert_eq!(msg, "use execute for statements other than SELECT"),
        other => panic!("unexpected result: {:?}", other),
    }
    Ok(())
}
