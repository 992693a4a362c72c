use super::*;

fn spill() -> RangeMap<f64> {
    RangeMap::new(&[0.0, 0.3, 0.6], vec![1.0, 3.0, 1.5]).unwrap()
}

#[test]
fn interpolates_between_breakpoints() {
    let m = RangeMap::new(&[0.4, 0.6], vec![100.0, 0.0]).unwrap();
    assert!((m.map(0.5) - 50.0).abs() < 1e-9);
    let m = spill();
    assert!((m.map(0.15) - 2.0).abs() < 1e-9);
    assert!((m.map(0.45) - 2.25).abs() < 1e-9);
}

#[test]
fn clamps_outside_the_table() {
    let m = spill();
    assert_eq!(m.map(-5.0), 1.0);
    assert_eq!(m.map(0.0), 1.0);
    assert_eq!(m.map(0.6), 1.5);
    assert_eq!(m.map(2.0), 1.5);
    assert_eq!(m.map(f64::NAN), 1.0);
}

#[test]
fn monotonic_table_gives_monotonic_output() {
    let m = RangeMap::new(&[0.0, 0.2, 0.8, 1.0], vec![0.0, 1.0, 1.0, 4.0]).unwrap();
    let mut prev = m.map(0.0);
    assert_eq!(prev, 0.0);
    for i in 1..=1000 {
        let p = f64::from(i) / 1000.0;
        let v = m.map(p);
        assert!(v >= prev, "not monotonic at p={p}");
        prev = v;
    }
    assert_eq!(m.map(1.0), 4.0);
}

#[test]
fn rejects_invalid_tables() {
    assert!(RangeMap::<f64>::new(&[], vec![]).is_err());
    assert!(RangeMap::new(&[0.5, 0.5], vec![0.0, 1.0]).is_err());
    assert!(RangeMap::new(&[0.6, 0.4], vec![0.0, 1.0]).is_err());
    assert!(RangeMap::new(&[0.0, 1.0], vec![0.0]).is_err());
    assert!(RangeMap::new(&[0.0, f64::INFINITY], vec![0.0, 1.0]).is_err());
}

#[test]
fn single_breakpoint_is_constant() {
    let m = RangeMap::new(&[0.5], vec![7.0]).unwrap();
    assert_eq!(m.map(0.0), 7.0);
    assert_eq!(m.map(0.9), 7.0);
}

#[test]
fn segment_eases_shape_each_segment() {
    let m = RangeMap::new(&[0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0])
        .unwrap()
        .with_segment_eases(vec![Ease::InQuad, Ease::Linear])
        .unwrap();
    assert!((m.map(0.5) - 0.25).abs() < 1e-9);
    assert!((m.map(1.5) - 1.5).abs() < 1e-9);
    assert!(
        RangeMap::new(&[0.0, 1.0], vec![0.0, 1.0])
            .unwrap()
            .with_segment_eases(vec![])
            .is_err()
    );
}

#[test]
fn colors_and_vectors_interpolate() {
    let m = RangeMap::new(&[0.0, 1.0], vec![Rgba8::WHITE, Rgba8::BLACK]).unwrap();
    assert_eq!(m.map(0.5), Rgba8::rgb(128, 128, 128));
    let m = RangeMap::new(&[0.0, 1.0], vec![Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0)]).unwrap();
    assert_eq!(m.map(0.25), Vec2::new(2.5, 7.5));
}

#[test]
fn mapper_set_fans_out_one_input() {
    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Channel {
        Opacity,
        Y,
    }

    let set = MapperSet::new()
        .with(
            Channel::Opacity,
            RangeMap::new(&[0.4, 0.6], vec![0.0, 1.0]).unwrap(),
        )
        .with(Channel::Y, RangeMap::new(&[0.4, 0.6], vec![100.0, 0.0]).unwrap());
    assert_eq!(set.len(), 2);

    let sampled: Vec<_> = set.sample(0.5).collect();
    assert_eq!(sampled.len(), 2);
    assert!((set.get(Channel::Opacity, 0.5).unwrap() - 0.5).abs() < 1e-9);
    assert!((set.get(Channel::Y, 0.5).unwrap() - 50.0).abs() < 1e-9);

    let replaced = set.with(Channel::Y, RangeMap::new(&[0.0], vec![3.0]).unwrap());
    assert_eq!(replaced.len(), 2);
    assert_eq!(replaced.get(Channel::Y, 0.9), Some(3.0));
}

#[test]
fn mapping_table_builds_range_map() {
    let table: MappingTable =
        serde_json::from_str("{\"input\": [0, 0.2], \"output\": [0, 1]}").unwrap();
    let m = table.to_range_map().unwrap();
    assert!((m.map(0.1) - 0.5).abs() < 1e-9);
    assert!(MappingTable::new(&[0.2, 0.2], &[0.0, 1.0]).to_range_map().is_err());
}
