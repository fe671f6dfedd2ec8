use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kassa_teller::Teller;

fn bench_command_execution_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_execution_latency");
    group.sample_size(1000);

    group.bench_function("open_account_fresh", |b| {
        let mut teller = Teller::new();
        b.iter(|| {
            let account_id = teller.open_account_with_balance(black_box(100)).unwrap();
            black_box(account_id);
        });
    });

    group.bench_function("deposit_existing", |b| {
        let mut teller = Teller::new();
        let account_id = teller.open_account().unwrap();
        b.iter(|| {
            teller.deposit(account_id, black_box(1)).unwrap();
        });
    });

    group.bench_function("withdraw_existing", |b| {
        let mut teller = Teller::new();
        // Enough headroom that the bench never drains the account.
        let account_id = teller.open_account_with_balance(1_000_000_000_000).unwrap();
        b.iter(|| {
            teller.withdraw(account_id, black_box(1)).unwrap();
        });
    });

    group.bench_function("balance_query", |b| {
        let mut teller = Teller::new();
        let account_id = teller.open_account_with_balance(1_000).unwrap();
        b.iter(|| {
            black_box(teller.balance(account_id).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_command_execution_latency);
criterion_main!(benches);
