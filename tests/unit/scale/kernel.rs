use proptest::prelude::*;

use super::*;

fn sums(kernel: &Kernel) -> Vec<i32> {
    kernel
        .outputs
        .iter()
        .map(|o| kernel.weights_of(o).iter().map(|&w| i32::from(w)).sum())
        .collect()
}

#[test]
fn filter_windows_match_reference_values() {
    assert_eq!(Filter::Box.weight(0.25), 1.0);
    assert_eq!(Filter::Box.weight(0.5), 0.5);
    assert_eq!(Filter::Linear.weight(-0.25), 0.75);
    assert_eq!(Filter::Cubic.weight(0.0), 1.0);
    assert_eq!(Filter::Cubic.weight(1.0), 0.0);
    assert_eq!(Filter::Mks13.weight(0.0), 17.0 / 16.0);
    assert_eq!(Filter::Mks13.weight(1.0), 0.0);
    assert_eq!(Filter::Mks13.weight(2.0), -1.0 / 32.0);
    assert_eq!(Filter::Mks13.weight(2.6), 0.0);
}

#[test]
fn filter_names_parse_back() {
    for f in Filter::ALL {
        assert_eq!(f.name().parse::<Filter>().unwrap(), f);
    }
    assert_eq!("MKS13".parse::<Filter>().unwrap(), Filter::Mks13);
    assert!("lanczos".parse::<Filter>().is_err());
}

#[test]
fn unit_scale_linear_is_identity() {
    let k = Kernel::build(5, 5, 0, 1.0, Filter::Linear);
    assert_eq!((k.start_out, k.n_out, k.start_in, k.n_in), (0, 5, 0, 5));
    for (i, o) in k.outputs.iter().enumerate() {
        assert_eq!(o.first, i);
        assert_eq!(k.weights_of(o), &[16384]);
    }
}

#[test]
fn upscale_linear_interpolates_neighbours() {
    let k = Kernel::build(4, 8, 0, 2.0, Filter::Linear);
    assert_eq!(k.n_out, 8);
    assert_eq!(k.weights_of(&k.outputs[0]), &[16384]);
    assert_eq!(k.outputs[1].first, 0);
    assert_eq!(k.weights_of(&k.outputs[1]), &[12288, 4096]);
}

#[test]
fn downscale_box_averages_pairs() {
    let k = Kernel::build(4, 2, 0, 0.5, Filter::Box);
    assert_eq!(k.n_out, 2);
    assert_eq!(k.outputs[0].first, 0);
    assert_eq!(k.outputs[1].first, 2);
    for o in &k.outputs {
        assert_eq!(k.weights_of(o), &[8192, 8192]);
    }
}

#[test]
fn mks13_keeps_negative_lobes() {
    let k = Kernel::build(8, 8, 0, 1.0, Filter::Mks13);
    let middle = &k.outputs[4];
    assert_eq!(middle.first, 2);
    assert_eq!(k.weights_of(middle), &[-512, 0, 17408, 0, -512]);
}

#[test]
fn offsets_clip_outputs_to_the_footprint() {
    let k = Kernel::build(4, 3, 1, 1.0, Filter::Linear);
    assert_eq!((k.start_out, k.n_out), (1, 2));
    assert_eq!((k.start_in, k.n_in), (0, 2));
    assert_eq!(k.end_out(), 3);
}

#[test]
fn negative_offset_matches_full_kernel_tail() {
    let full = Kernel::build(4, 8, 0, 2.0, Filter::Mks13);
    let shifted = Kernel::build(4, 8, -2, 2.0, Filter::Mks13);
    assert_eq!((shifted.start_out, shifted.n_out), (0, 6));
    for (a, b) in full.outputs[2..].iter().zip(&shifted.outputs) {
        assert_eq!(a.first, b.first);
        assert_eq!(full.weights_of(a), shifted.weights_of(b));
    }
}

#[test]
fn invisible_placement_yields_empty_kernel() {
    assert!(Kernel::build(4, 8, 8, 1.0, Filter::Cubic).is_empty());
    assert!(Kernel::build(4, 8, -4, 1.0, Filter::Cubic).is_empty());
    assert!(Kernel::build(0, 8, 0, 1.0, Filter::Cubic).is_empty());
    assert!(Kernel::build(1, 8, 0, 0.1, Filter::Cubic).is_empty());
}

#[test]
#[should_panic]
fn non_positive_scale_panics() {
    let _ = Kernel::build(4, 4, 0, 0.0, Filter::Box);
}

#[test]
fn filter_deserializes_lowercase() {
    let f: Filter = serde_json::from_str("\"cubic\"").unwrap();
    assert_eq!(f, Filter::Cubic);
    assert_eq!(serde_json::to_string(&Filter::Mks13).unwrap(), "\"mks13\"");
}

fn filter_strategy() -> impl Strategy<Value = Filter> {
    prop_oneof![
        Just(Filter::Box),
        Just(Filter::Linear),
        Just(Filter::Cubic),
        Just(Filter::Mks13),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_weights_sum_to_fixed_one(
        src_len in 1usize..=64,
        dst_len in 1usize..=128,
        offset in -64i64..=64,
        scale in 0.05f64..8.0,
        filter in filter_strategy(),
    ) {
        let k = Kernel::build(src_len, dst_len, offset, scale, filter);
        prop_assert_eq!(k.outputs.len(), k.n_out);
        prop_assert!(k.end_out() <= dst_len);
        for s in sums(&k) {
            prop_assert_eq!(s, 1 << 14);
        }
        for o in &k.outputs {
            prop_assert!(o.n > 0);
            prop_assert!(o.first >= k.start_in);
            prop_assert!(o.first + o.n <= k.start_in + k.n_in);
            prop_assert!(k.start_in + k.n_in <= src_len);
            let w = k.weights_of(o);
            prop_assert!(w[0] != 0 && w[w.len() - 1] != 0);
        }
    }
}
