//! Availability on a busy night: every venue fully staffed, a pool of 40 staff.
//!
//! The resolver runs on every dropdown change, so it has to stay well under a
//! frame even unmemoized.

use criterion::{criterion_group, criterion_main, Criterion};
use shift_engine::catalog::time_options;
use shift_engine::{get_available_employees, Assignment, Role, TimeSlot, Venue};
use std::hint::black_box;

fn busy_night() -> Vec<Assignment> {
    let starts = time_options();
    let mut day = Vec::new();
    for (v, venue) in Venue::ALL.into_iter().enumerate() {
        for (r, role) in Role::ALL.into_iter().enumerate() {
            for k in 0..4 {
                let start = starts[(v * 5 + r + k * 7) % 24];
                let slot = TimeSlot::new(start, starts[starts.len() - 1 - k]);
                let mut a = Assignment::unassigned(venue, role, slot);
                a.employee_id = Some(format!("emp-{}", (v * 20 + r * 4 + k) % 40));
                day.push(a);
            }
        }
    }
    day
}

fn bench_availability(c: &mut Criterion) {
    let day = busy_night();
    let pool: Vec<String> = (0..40).map(|n| format!("emp-{n}")).collect();
    let candidate = TimeSlot::parse("23:00", "03:00").unwrap();
    let editing = day[0].id;

    c.bench_function("get_available_employees/100x40", |b| {
        b.iter(|| {
            get_available_employees(
                black_box(&pool),
                black_box(&candidate),
                black_box(&day),
                Some(editing),
            )
        })
    });
}

criterion_group!(benches, bench_availability);
criterion_main!(benches);
