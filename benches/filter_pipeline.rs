use criterion::{black_box, criterion_group, criterion_main, Criterion};

use agrodash::data::records::{RentalRecord, RentalStatus};
use agrodash::data::table_view::{StatusFilter, TableView};

fn create_test_rentals(rows: usize) -> Vec<RentalRecord> {
    let locations = vec![
        "Manila", "Cebu", "Davao", "Iloilo", "Ormoc", "Baguio", "Tacloban", "Bacolod",
    ];
    let equipment = vec![
        "Tractor X200",
        "Rice Harvester Pro",
        "Hand Tractor",
        "Thresher",
        "Water Pump",
    ];
    let statuses = [
        RentalStatus::Pending,
        RentalStatus::Approved,
        RentalStatus::Rejected,
    ];

    (0..rows)
        .map(|i| RentalRecord {
            id: i.to_string(),
            name: format!("Renter {:05}", i),
            equipment: equipment[i % equipment.len()].to_string(),
            date: "Dec 1, 2025".to_string(),
            duration: format!("{} days", 1 + i % 14),
            location: locations[i % locations.len()].to_string(),
            email: format!("renter{:05}@example.com", i),
            status: statuses[i % statuses.len()],
        })
        .collect()
}

fn benchmark_search(c: &mut Criterion) {
    let rentals_10k = create_test_rentals(10_000);
    let rentals_50k = create_test_rentals(50_000);
    let rentals_100k = create_test_rentals(100_000);

    let mut group = c.benchmark_group("search");

    group.bench_function("10k_rows", |b| {
        let mut view = TableView::new(rentals_10k.clone());
        b.iter(|| {
            view.set_search(black_box("manila"));
            assert!(view.filtered_len() > 0);
            view.set_search("");
        });
    });

    group.bench_function("50k_rows", |b| {
        let mut view = TableView::new(rentals_50k.clone());
        b.iter(|| {
            view.set_search(black_box("manila"));
            assert!(view.filtered_len() > 0);
            view.set_search("");
        });
    });

    group.bench_function("100k_rows", |b| {
        let mut view = TableView::new(rentals_100k.clone());
        b.iter(|| {
            view.set_search(black_box("manila"));
            assert!(view.filtered_len() > 0);
            view.set_search("");
        });
    });

    group.finish();
}

fn benchmark_filter_and_page(c: &mut Criterion) {
    let rentals_100k = create_test_rentals(100_000);

    let mut group = c.benchmark_group("filter_and_page");

    group.bench_function("status_filter", |b| {
        let mut view = TableView::new(rentals_100k.clone());
        b.iter(|| {
            view.set_filter(black_box(StatusFilter::Approved));
            assert!(view.filtered_len() > 0);
            view.set_filter(StatusFilter::All);
        });
    });

    group.bench_function("combined_filter_search", |b| {
        let mut view = TableView::new(rentals_100k.clone());
        view.set_filter(StatusFilter::Pending);
        b.iter(|| {
            view.set_search(black_box("cebu"));
            assert!(view.filtered_len() > 0);
            view.set_search("");
        });
    });

    group.bench_function("last_page_rows", |b| {
        let mut view = TableView::new(rentals_100k.clone());
        view.last_page();
        b.iter(|| {
            let rows = view.page_rows();
            assert!(!black_box(rows).is_empty());
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_search, benchmark_filter_and_page);
criterion_main!(benches);
