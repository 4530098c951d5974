use super::*;

#[test]
fn split_even_covers_range_without_gaps() {
    let parts = split_even(3..13, 4);
    assert_eq!(parts, vec![3..6, 6..9, 9..11, 11..13]);
}

#[test]
fn split_even_pads_with_empty_ranges() {
    let parts = split_even(0..2, 4);
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0], 0..1);
    assert_eq!(parts[1], 1..2);
    assert!(parts[2].is_empty() && parts[3].is_empty());
}

#[test]
fn split_even_single_part_is_identity() {
    assert_eq!(split_even(5..9, 1), vec![5..9]);
}

#[test]
fn fan_out_runs_every_item_once() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let pool = ThreadPool::new(3).unwrap();
    let mut slots = vec![0usize; 10];
    let calls = AtomicUsize::new(0);
    let items: Vec<(usize, &mut usize)> = slots.iter_mut().enumerate().collect();
    fan_out(&pool, items, |(i, slot)| {
        *slot = i * 2;
        calls.fetch_add(1, Ordering::Relaxed);
    });
    assert_eq!(calls.load(Ordering::Relaxed), 10);
    assert_eq!(slots, (0..10).map(|i| i * 2).collect::<Vec<_>>());
}

#[test]
fn fan_out_supports_a_full_rendezvous() {
    let pool = ThreadPool::new(4).unwrap();
    let parts = pool.size() + 1;
    let barrier = std::sync::Barrier::new(parts);
    fan_out(&pool, (0..parts).collect(), |_| {
        barrier.wait();
    });
}
