//! Criterion timing of statement synthesis alone, with no database involved.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sql_record::prelude::*;

sql_record! {
    #[derive(Debug, Clone)]
    pub struct Account => "tblaccount" {
        #[primary_key]
        pub player_key: String,
        pub user_uuid: i64,
        pub connect_ip: String,
        pub game_db_id: i32,
        #[nullable]
        pub sns_id: String,
        pub platform_idx: u8,
    }
}

fn account(i: usize) -> Account {
    Account {
        player_key: Some(format!("player-{i}")),
        user_uuid: i64::try_from(i).ok(),
        connect_ip: Some("127.0.0.1".into()),
        game_db_id: Some(21),
        sns_id: None,
        platform_idx: Some(1),
    }
}

fn bench_select(c: &mut Criterion) {
    let builder = StatementBuilder::default();
    let target = Account {
        user_uuid: Some(0),
        game_db_id: Some(0),
        ..Account::blank()
    };
    let filter = Account {
        player_key: Some("player-1".into()),
        ..Account::blank()
    };
    c.bench_function("select_two_columns_one_condition", |b| {
        b.iter(|| builder.select(black_box(&target), black_box(&filter), None));
    });
}

fn bench_insert(c: &mut Criterion) {
    let builder = StatementBuilder::default();
    let mut group = c.benchmark_group("insert_rows");
    for rows in [1usize, 10, 100] {
        let records: Vec<Account> = (0..rows).map(account).collect();
        let erased: Vec<&dyn AnyRecord> = records.iter().map(|r| r as &dyn AnyRecord).collect();
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &erased, |b, erased| {
            b.iter(|| builder.insert(black_box(erased)));
        });
    }
    group.finish();
}

fn bench_upsert(c: &mut Criterion) {
    let builder = StatementBuilder::default();
    let record = account(7);
    c.bench_function("upsert_full_record", |b| {
        b.iter(|| builder.upsert(black_box(&record)));
    });
}

criterion_group!(benches, bench_select, bench_insert, bench_upsert);
criterion_main!(benches);
