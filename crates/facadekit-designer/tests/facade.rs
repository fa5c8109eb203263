use facadekit_core::Point;
use facadekit_designer::{
    FacadeGenerator, FacadeParameters, ShapeSetKind, StairWindowParameters,
};
use proptest::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_reference_facade_windows() {
    let gen = FacadeGenerator::new(FacadeParameters::default()).unwrap();
    let windows = gen.windows().unwrap();
    assert_eq!(windows.len(), 12);

    let centers = gen.column_centers();
    assert!(close(centers[0], 2.828));
    assert!(close(centers[1], 10.0));
    assert!(close(centers[2], 17.172));

    let first = windows[0].points();
    let expected = [
        (2.328, 2.5),
        (3.328, 2.5),
        (3.328, 3.5),
        (2.328, 3.5),
        (2.328, 2.5),
    ];
    assert_eq!(first.len(), expected.len());
    for (p, (x, y)) in first.iter().zip(expected) {
        assert!(close(p.x, x) && close(p.y, y), "{} != ({}, {})", p, x, y);
    }
}

#[test]
fn test_windows_are_column_major() {
    let gen = FacadeGenerator::new(FacadeParameters::default()).unwrap();
    let windows = gen.windows().unwrap();
    let sills: Vec<f64> = windows[..4].iter().map(|w| w.first().y).collect();
    assert_eq!(sills, vec![2.5, 5.5, 8.5, 11.5]);
    assert!(close(windows[4].first().x, 9.5));
}

#[test]
fn test_doors_stand_on_ground() {
    let gen = FacadeGenerator::new(FacadeParameters::default()).unwrap();
    let doors = gen.doors().unwrap();
    assert_eq!(doors.len(), 3);
    for (door, x_c) in doors.iter().zip(gen.column_centers()) {
        let (min_x, min_y, max_x, max_y) = door.bounds();
        assert_eq!(min_y, 0.0);
        assert_eq!(max_y, 2.0);
        assert!(close((min_x + max_x) / 2.0, x_c));
        assert_eq!(door.len(), 5);
    }
}

#[test]
fn test_valley_lines_span_ground_to_eave() {
    let gen = FacadeGenerator::new(FacadeParameters::default()).unwrap();
    let valleys = gen.valley_lines();
    assert_eq!(valleys.len(), 2);
    assert!(close(valleys[0].start.x, 5.657));
    assert!(close(valleys[1].start.x, 14.343));
    for v in &valleys {
        assert_eq!(v.start.y, 0.0);
        assert_eq!(v.end.y, 15.0);
        assert_eq!(v.start.x, v.end.x);
    }
}

#[test]
fn test_stair_windows_at_offset_columns() {
    let params = FacadeParameters {
        stair_windows: Some(StairWindowParameters {
            offset: 1.0,
            width: 0.6,
            sill: 1.0,
            head: 13.0,
        }),
        ..Default::default()
    };
    let gen = FacadeGenerator::new(params).unwrap();
    let stairs = gen.stair_windows().unwrap();
    assert_eq!(stairs.len(), 2);

    let (l_min_x, l_min_y, l_max_x, l_max_y) = stairs[0].bounds();
    let (r_min_x, _, r_max_x, _) = stairs[1].bounds();
    assert!(close((l_min_x + l_max_x) / 2.0, gen.inset() + 1.0));
    assert!(close((r_min_x + r_max_x) / 2.0, 20.0 - (gen.inset() + 1.0)));
    assert_eq!(l_min_y, 1.0);
    assert_eq!(l_max_y, 13.0);
}

#[test]
fn test_gable_outline_matches_reference_points() {
    let gen = FacadeGenerator::new(FacadeParameters::default()).unwrap();
    let outline = gen.gable_outline().unwrap();
    let pts = outline.points();
    assert_eq!(pts.len(), 8);
    assert_eq!(pts[0], Point::new(0.0, 0.0));
    assert!(close(pts[3].x, 14.343146) && close(pts[3].y, 15.0));
    assert_eq!(pts[4], Point::new(10.0, 17.83));
    assert!(close(pts[5].x, 5.656854));
    assert_eq!(outline.first(), outline.last());
}

#[test]
fn test_generate_is_deterministic() {
    let gen = FacadeGenerator::new(FacadeParameters::default()).unwrap();
    assert_eq!(gen.generate().unwrap(), gen.generate().unwrap());
}

#[test]
fn test_shape_sets() {
    let geometry = FacadeGenerator::new(FacadeParameters::default())
        .unwrap()
        .generate()
        .unwrap();
    assert_eq!(geometry.shapes(ShapeSetKind::Windows).len(), 12);
    assert_eq!(geometry.shapes(ShapeSetKind::Doors).len(), 3);
    assert_eq!(geometry.shapes(ShapeSetKind::Valleys).len(), 2);
    assert_eq!(geometry.shapes(ShapeSetKind::StairWindows).len(), 0);
    assert_eq!(geometry.shapes(ShapeSetKind::Outline).len(), 1);
    assert_eq!(geometry.shape_count(), 18);

    let valley_edges: usize = geometry
        .shapes(ShapeSetKind::Valleys)
        .iter()
        .map(|s| s.edges().len())
        .sum();
    assert_eq!(valley_edges, 2);
}

#[test]
fn test_sill_above_eave_is_not_rejected() {
    let params = FacadeParameters {
        sill_heights: vec![14.5],
        ..Default::default()
    };
    let gen = FacadeGenerator::new(params).unwrap();
    assert_eq!(gen.windows().unwrap().len(), 3);
}

#[test]
fn test_rejects_non_positive_dimensions() {
    for params in [
        FacadeParameters {
            window_width: 0.0,
            ..Default::default()
        },
        FacadeParameters {
            door_height: -1.0,
            ..Default::default()
        },
        FacadeParameters {
            eave_height: f64::NAN,
            ..Default::default()
        },
    ] {
        assert!(FacadeGenerator::new(params).is_err());
    }
}

proptest! {
    #[test]
    fn columns_are_symmetric(
        width in 12.0f64..60.0,
        k in 0.5f64..4.0,
        eave in 5.0f64..30.0,
    ) {
        let params = FacadeParameters {
            width,
            eave_height: eave,
            inset_factor: k,
            ridge_height: eave + 3.0,
            ..Default::default()
        };
        let gen = FacadeGenerator::new(params).unwrap();
        let [left, mid, right] = gen.column_centers();
        prop_assert!((left + right - width).abs() < 1e-9);
        prop_assert!((mid - width / 2.0).abs() < 1e-12);
    }

    #[test]
    fn every_window_is_a_closed_rectangle(
        sills in prop::collection::vec(0.0f64..14.0, 0..6),
        w in 0.1f64..2.0,
        h in 0.1f64..2.0,
    ) {
        let params = FacadeParameters {
            window_width: w,
            window_height: h,
            sill_heights: sills.clone(),
            ..Default::default()
        };
        let windows = FacadeGenerator::new(params).unwrap().windows().unwrap();
        prop_assert_eq!(windows.len(), 3 * sills.len());
        for window in &windows {
            prop_assert_eq!(window.len(), 5);
            prop_assert_eq!(window.first(), window.last());
        }
    }
}
