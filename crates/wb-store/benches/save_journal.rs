use chrono::{Duration, NaiveDate};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wb_core::{DailyLog, Emotion, Journal, Symptom};
use wb_store::Store;

fn make_journal(years: i64) -> Journal {
    let base = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let mut journal = Journal::new();
    for i in 0..years * 13 {
        let start = base + Duration::days(i * 28);
        journal
            .tracker
            .log_period(start, start + Duration::days(4))
            .unwrap();

        let mut log = DailyLog::new(start);
        log.toggle_symptom(Symptom::Cramps);
        journal.tracker.log_day(log);
        journal.emotions.record(start, Emotion::Tired, "");
    }
    journal
}

fn bench_save_load(c: &mut Criterion) {
    let store = Store::open_in_memory().unwrap();
    let journal = make_journal(10);

    c.bench_function("save_journal_10y", |b| {
        b.iter(|| store.save_journal(black_box(&journal)).unwrap())
    });

    store.save_journal(&journal).unwrap();
    c.bench_function("load_journal_10y", |b| b.iter(|| store.load_journal().unwrap()));
}

criterion_group!(benches, bench_save_load);
criterion_main!(benches);
