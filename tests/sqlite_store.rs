mod common;
use common::{assert_sqlite_pragmas, setup_store};

use cable_progress::db::connection::connect_sqlite;
use cable_progress::store::{Cell, Row, Table, TabularStore};
use chrono::NaiveDate;

fn sample_table() -> Table {
    let mut table = Table::new(vec!["Cable Type".into(), "Date".into(), "Length (m)".into()]);
    table.text_columns = vec![1];
    table.rows.push(Row {
        cells: vec![Cell::text("# type | date | length")],
        note: true,
    });
    table.rows.push(Row::data(vec![
        Cell::text("HV"),
        Cell::text("05/01/2025"),
        Cell::Number(400.0),
    ]));
    table.rows.push(Row::data(vec![
        Cell::text("LV"),
        Cell::Date {
            date: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
        },
        Cell::Empty,
    ]));
    table
}

#[test]
fn connection_applies_pragmas() {
    let (db, _store) = setup_store();
    let mut conn = connect_sqlite(&db.path).expect("connect");
    assert_sqlite_pragmas(&mut conn);
}

#[test]
fn tables_round_trip_exactly() {
    let (_db, mut store) = setup_store();
    let table = sample_table();
    store.put_table("SRN", &table).expect("put");

    let back = store.get_table("SRN").expect("get");
    assert_eq!(back, table, "cells, note flags, and format hints survive");
}

#[test]
fn missing_sheet_is_an_empty_table() {
    let (_db, mut store) = setup_store();
    let back = store.get_table("Dashboard").expect("get");
    assert!(back.is_empty());
    assert!(back.columns.is_empty());
}

#[test]
fn put_replaces_rows_wholesale() {
    let (_db, mut store) = setup_store();
    store.put_table("SRN", &sample_table()).expect("put");

    let mut smaller = Table::new(vec!["Cable Type".into()]);
    smaller.rows.push(Row::data(vec![Cell::text("HV")]));
    store.put_table("SRN", &smaller).expect("replace");

    let back = store.get_table("SRN").expect("get");
    assert_eq!(back.rows.len(), 1);
    assert_eq!(back.columns, vec!["Cable Type"]);
}

#[test]
fn sheets_are_independent() {
    let (_db, mut store) = setup_store();
    store.put_table("SRN", &sample_table()).expect("put srn");

    let mut other = Table::new(vec!["Key".into(), "Value".into()]);
    other.rows.push(Row::data(vec![
        Cell::text("projectName"),
        Cell::text("Feeder 9"),
    ]));
    store.put_table("Config", &other).expect("put config");

    assert_eq!(store.get_table("SRN").expect("srn").rows.len(), 3);
    assert_eq!(store.get_table("Config").expect("config").rows.len(), 1);
}

#[test]
fn store_survives_reopen() {
    let (db, mut store) = setup_store();
    store.put_table("SRN", &sample_table()).expect("put");
    drop(store);

    let mut reopened = cable_progress::store::sqlite::SqliteStore::open(&db.path).expect("reopen");
    assert_eq!(reopened.get_table("SRN").expect("get"), sample_table());
}
