//! Property-based invariant tests for table operations.
//!
//! 1. `add` grows the table by exactly one row carrying the added value.
//! 2. `add` assigns `max(id) + 1`, or 0 on an empty table.
//! 3. `update`/`delete` with an absent id leave the rows unchanged.
//! 4. `copy` appends a value-equal row; copying an absent id fails.
//! 5. Sorting orders values and is a fixed point when repeated.
//! 6. Producing descendants never changes the parent.
//! 7. Ids stay unique across arbitrary operation sequences.
//! 8. `Value::sort_cmp` is a total order, including across numeric kinds.

use std::cmp::Ordering;
use std::collections::HashSet;

use milkytables::model::{Column, Record, RowId, Value};
use milkytables::{Direction, Error, PlainTable, Table, TableConfig};
use proptest::prelude::*;
use rust_decimal::Decimal;

// ── Strategies ──────────────────────────────────────────────────────────

/// 2^53, where `f64` stops representing every integer.
const PRECISION_EDGE: i64 = 1 << 53;

fn number() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-50i64..50).prop_map(Value::Int),
        (-50.0f64..50.0).prop_map(Value::Float),
        (-5000i64..5000, 0u32..3).prop_map(|(m, scale)| Value::Decimal(Decimal::new(m, scale))),
        (-4i64..4).prop_map(|d| Value::Int(PRECISION_EDGE + d)),
        (-4i64..4).prop_map(|d| Value::Float((PRECISION_EDGE + d) as f64)),
        (-40i64..40).prop_map(|d| Value::Decimal(Decimal::new(PRECISION_EDGE * 10 + d, 1))),
    ]
}

fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        number(),
        "[a-c]{0,3}".prop_map(Value::String),
    ]
}

fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => field_value(),
        1 => prop_oneof![
            Just(f64::NAN),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
            Just(-0.0),
            Just(0.0),
        ]
        .prop_map(Value::Float),
    ]
}

fn record() -> impl Strategy<Value = Record> {
    (field_value(), -5i64..5).prop_map(|(score, age)| {
        Record::new().set("score", score).set("age", age)
    })
}

fn records() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(record(), 0..12)
}

#[derive(Debug, Clone)]
enum Op {
    Add(Record),
    Update(u64, Record),
    Delete(u64),
    Copy(u64),
    Sort(Direction),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => record().prop_map(Op::Add),
        2 => (0u64..16, record()).prop_map(|(id, r)| Op::Update(id, r)),
        2 => (0u64..16).prop_map(Op::Delete),
        2 => (0u64..16).prop_map(Op::Copy),
        1 => prop_oneof![Just(Direction::Asc), Just(Direction::Desc)].prop_map(Op::Sort),
        1 => Just(Op::Clear),
    ]
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn key(name: &str) -> String {
    name.to_string()
}

fn build(rows: Vec<Record>) -> PlainTable<Record> {
    Table::create(
        TableConfig::unchecked()
            .with_rows(rows)
            .with_column(Column::new(key("score"), "Score"))
            .with_column(Column::new(key("age"), "Age")),
    )
    .unwrap()
}

fn snapshot(table: &PlainTable<Record>) -> Vec<(RowId, Record)> {
    table
        .rows()
        .iter()
        .map(|row| (row.id(), row.value().clone()))
        .collect()
}

fn absent_id(table: &PlainTable<Record>) -> RowId {
    table.next_id().unwrap()
}

fn apply(table: &PlainTable<Record>, op: &Op) -> PlainTable<Record> {
    match op {
        Op::Add(r) => table.add(r.clone()).unwrap(),
        Op::Update(id, r) => table.update(RowId(*id), r.clone()).unwrap(),
        Op::Delete(id) => table.delete(RowId(*id)),
        Op::Copy(id) => match table.copy(RowId(*id)) {
            Ok(copied) => copied,
            Err(Error::RowNotFound(_)) => table.clone(),
            Err(other) => panic!("unexpected error {other:?}"),
        },
        Op::Sort(direction) => table.sort_by_column(&key("score"), *direction),
        Op::Clear => table.clear_all(),
    }
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn add_grows_by_one(rows in records(), extra in record()) {
        let table = build(rows);
        let added = table.add(extra.clone()).unwrap();

        prop_assert_eq!(added.get_rows().len(), table.get_rows().len() + 1);

        let projected = added.get_rows().pop().unwrap();
        prop_assert_eq!(projected.value(&key("score")), extra.get("score"));
        prop_assert_eq!(projected.value(&key("age")), extra.get("age"));
    }

    #[test]
    fn add_assigns_max_plus_one(rows in records(), ops in proptest::collection::vec(op(), 0..10), extra in record()) {
        let table = ops.iter().fold(build(rows), |t, op| apply(&t, op));
        let expected = table.ids().into_iter().max().map_or(0, |max| max.0 + 1);

        let added = table.add(extra).unwrap();
        prop_assert_eq!(added.ids().last().copied(), Some(RowId(expected)));
    }

    #[test]
    fn absent_update_and_delete_are_noops(rows in records(), replacement in record()) {
        let table = build(rows);
        let missing = absent_id(&table);

        prop_assert_eq!(snapshot(&table.update(missing, replacement).unwrap()), snapshot(&table));
        prop_assert_eq!(snapshot(&table.delete(missing)), snapshot(&table));
    }

    #[test]
    fn copy_appends_equal_value(rows in proptest::collection::vec(record(), 1..12), pick in any::<prop::sample::Index>()) {
        let table = build(rows);
        let source = table.rows()[pick.index(table.len())].clone();
        let next = table.next_id().unwrap();

        let copied = table.copy(source.id()).unwrap();
        let last = copied.rows().last().unwrap();
        prop_assert_eq!(copied.len(), table.len() + 1);
        prop_assert_eq!(last.id(), next);
        prop_assert_eq!(last.value(), source.value());

        let missing = absent_id(&table);
        prop_assert_eq!(table.copy(missing).err(), Some(Error::RowNotFound(missing)));
    }

    #[test]
    fn sort_orders_and_is_idempotent(rows in records(), descending in any::<bool>()) {
        let direction = if descending { Direction::Desc } else { Direction::Asc };
        let table = build(rows);
        let sorted = table.sort_by_column(&key("score"), direction);

        let values: Vec<Value> = sorted
            .get_rows()
            .iter()
            .map(|row| row.value(&key("score")).unwrap().clone())
            .collect();
        for pair in values.windows(2) {
            let ordering = pair[0].sort_cmp(&pair[1]);
            match direction {
                Direction::Asc => prop_assert_ne!(ordering, Ordering::Greater),
                Direction::Desc => prop_assert_ne!(ordering, Ordering::Less),
            }
        }

        let twice = sorted.sort_by_column(&key("score"), direction);
        prop_assert_eq!(twice.ids(), sorted.ids());
    }

    #[test]
    fn sort_is_stable(rows in records()) {
        let table = build(rows);
        let sorted = table.sort_by_column(&key("age"), Direction::Asc);

        // within equal ages, ids keep their original (ascending) order
        for pair in sorted.rows().windows(2) {
            let a = pair[0].value().get_int("age").unwrap();
            let b = pair[1].value().get_int("age").unwrap();
            if a == b {
                prop_assert!(pair[0].id() < pair[1].id());
            }
        }
    }

    #[test]
    fn parent_unaffected_by_descendants(rows in records(), ops in proptest::collection::vec(op(), 1..10)) {
        let table = build(rows);
        let before = snapshot(&table);
        let labels_before: Vec<String> = table
            .get_header_labels()
            .labels()
            .into_iter()
            .cloned()
            .collect();

        for op in &ops {
            let _ = apply(&table, op);
        }

        prop_assert_eq!(snapshot(&table), before);
        let labels_after: Vec<String> = table.get_header_labels().labels().into_iter().cloned().collect();
        prop_assert_eq!(labels_after, labels_before);
    }

    #[test]
    fn ids_stay_unique(rows in records(), ops in proptest::collection::vec(op(), 0..30)) {
        let table = ops.iter().fold(build(rows), |t, op| apply(&t, op));
        let unique: HashSet<RowId> = table.ids().into_iter().collect();

        prop_assert_eq!(unique.len(), table.len());
    }

    #[test]
    fn sort_cmp_is_a_total_order(a in any_value(), b in any_value(), c in any_value()) {
        prop_assert_eq!(a.sort_cmp(&b), b.sort_cmp(&a).reverse());
        prop_assert_eq!(a.sort_cmp(&a), Ordering::Equal);

        if a.sort_cmp(&b) != Ordering::Greater && b.sort_cmp(&c) != Ordering::Greater {
            prop_assert_ne!(a.sort_cmp(&c), Ordering::Greater);
        }
        if a.sort_cmp(&b) == Ordering::Equal && b.sort_cmp(&c) == Ordering::Equal {
            prop_assert_eq!(a.sort_cmp(&c), Ordering::Equal);
        }
    }

    #[test]
    fn sort_orders_values_near_precision_edge(values in proptest::collection::vec(number(), 0..24)) {
        let rows = values.iter().map(|v| Record::new().set("score", v.clone()).set("age", 0));
        let sorted = build(rows.collect()).sort_by_column(&key("score"), Direction::Asc);

        let scores: Vec<Value> = sorted
            .rows()
            .iter()
            .map(|row| row.value().get("score").cloned().unwrap_or_default())
            .collect();
        for pair in scores.windows(2) {
            prop_assert_ne!(pair[0].sort_cmp(&pair[1]), Ordering::Greater);
        }
    }
}
