mod common;

use common::FaultyDrawing;
use facadekit_cadtools::{CadToolError, LayerSynchronizer, SkipReason, SyncOptions};
use facadekit_communication::{DrawingClient, MemoryDrawing, Space};
use facadekit_core::{Point, Polygon, Segment, Shape};
use facadekit_designer::{FacadeGenerator, FacadeParameters, ShapeSetKind};
use proptest::prelude::*;

fn window_shapes() -> Vec<Shape> {
    let geometry = FacadeGenerator::new(FacadeParameters::default())
        .unwrap()
        .generate()
        .unwrap();
    geometry.shapes(ShapeSetKind::Windows)
}

fn document_with(layers: &[&str]) -> MemoryDrawing {
    let mut doc = MemoryDrawing::new("Facade");
    for layer in layers {
        doc.add_layer(layer);
    }
    doc
}

#[test]
fn test_send_draws_every_edge_on_layer() {
    let mut doc = document_with(&["A-GLAZ"]);
    let shapes = window_shapes();
    let sync = LayerSynchronizer::default();

    let summary = sync.send(&mut doc, &shapes, "A-GLAZ").unwrap();

    assert_eq!(summary.shapes, 12);
    assert_eq!(summary.lines_created, 48);
    assert_eq!(summary.lines_assigned, 48);
    assert_eq!(summary.partial_writes(), 0);
    assert_eq!(doc.objects_on_layer("A-GLAZ").len(), 48);
}

#[test]
fn test_send_to_missing_layer_is_partial_write() {
    let mut doc = document_with(&[]);
    let shapes = vec![Shape::from(Segment::new(
        Point::new(0.0, 0.0),
        Point::new(0.0, 15.0),
    ))];
    let sync = LayerSynchronizer::default();

    let summary = sync.send(&mut doc, &shapes, "A-WALL-INT").unwrap();

    assert_eq!(summary.lines_created, 1);
    assert_eq!(summary.lines_assigned, 0);
    assert_eq!(summary.partial_writes(), 1);
    assert!(matches!(
        summary.failures[0].reason,
        SkipReason::PartialWrite { .. }
    ));
    // The line still exists, on the default layer
    assert_eq!(doc.objects_on_layer("0").len(), 1);
}

#[test]
fn test_send_creates_missing_layer_when_asked() {
    let mut doc = document_with(&[]);
    let square = Polygon::rectangle(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
    let sync = LayerSynchronizer::new(SyncOptions {
        create_missing: true,
    });

    let summary = sync.send(&mut doc, &[square.into()], "A-DOOR").unwrap();

    assert!(summary.layer_created);
    assert_eq!(summary.lines_assigned, 4);
    assert!(doc.layer_names().contains(&"A-DOOR"));
}

#[test]
fn test_clear_is_case_insensitive() {
    let mut doc = document_with(&["A-GLAZ", "A-DOOR"]);
    let sync = LayerSynchronizer::default();
    sync.send(&mut doc, &window_shapes(), "A-GLAZ").unwrap();
    let door = Polygon::rectangle(Point::new(9.5, 0.0), Point::new(10.5, 2.0)).unwrap();
    sync.send(&mut doc, &[door.into()], "A-DOOR").unwrap();

    let summary = sync.clear_layer(&mut doc, "a-glaz").unwrap();

    assert_eq!(summary.deleted, 48);
    assert_eq!(summary.scanned, 52);
    assert!(doc.objects_on_layer("A-GLAZ").is_empty());
    assert_eq!(doc.objects_on_layer("A-DOOR").len(), 4);
}

#[test]
fn test_clear_twice_deletes_nothing_the_second_time() {
    let mut doc = document_with(&["A-GLAZ"]);
    let sync = LayerSynchronizer::default();
    sync.send(&mut doc, &window_shapes(), "A-GLAZ").unwrap();

    assert_eq!(sync.clear_layer(&mut doc, "A-GLAZ").unwrap().deleted, 48);
    assert_eq!(sync.clear_layer(&mut doc, "A-GLAZ").unwrap().deleted, 0);
}

#[test]
fn test_clear_empty_layer_returns_zero() {
    let mut doc = document_with(&["A-ELEV"]);
    let sync = LayerSynchronizer::default();

    let summary = sync.clear_layer(&mut doc, "A-ELEV").unwrap();

    assert_eq!(summary.deleted, 0);
    assert!(summary.failures.is_empty());
}

#[test]
fn test_clear_skips_objects_without_layer() {
    let mut doc = FaultyDrawing::new(document_with(&["A-GLAZ"]));
    let sync = LayerSynchronizer::default();
    sync.send(&mut doc, &window_shapes(), "A-GLAZ").unwrap();
    let first = doc.inner.objects(Space::Model).unwrap()[0];
    doc.faults.unreadable_layer.insert(first);

    let summary = sync.clear_layer(&mut doc, "A-GLAZ").unwrap();

    assert_eq!(summary.no_layer, 1);
    assert_eq!(summary.deleted, 47);
    assert_eq!(doc.inner.object_count(Space::Model).unwrap(), 1);
}

#[test]
fn test_clear_aborts_on_connection_loss() {
    let mut doc = FaultyDrawing::new(document_with(&["A-GLAZ"]));
    let sync = LayerSynchronizer::default();
    sync.send(&mut doc, &window_shapes(), "A-GLAZ").unwrap();
    doc.faults.connection_lost = true;

    let err = sync.clear_layer(&mut doc, "A-GLAZ").unwrap_err();

    assert!(matches!(err, CadToolError::Connection(_)));
    assert_eq!(doc.inner.object_count(Space::Model).unwrap(), 48);
}

#[test]
fn test_replace_leaves_only_fresh_geometry() {
    let mut doc = document_with(&["A-GLAZ"]);
    let shapes = window_shapes();
    let sync = LayerSynchronizer::default();
    sync.send(&mut doc, &shapes, "A-GLAZ").unwrap();

    let summary = sync.replace(&mut doc, &shapes, "A-GLAZ").unwrap();

    assert_eq!(summary.cleared.deleted, 48);
    assert_eq!(summary.sent.lines_assigned, 48);
    assert_eq!(doc.objects_on_layer("A-GLAZ").len(), 48);
}

proptest! {
    #[test]
    fn prop_send_clear_resend_round_trip(
        rects in prop::collection::vec((0.0f64..50.0, 0.0f64..50.0, 0.5f64..5.0, 0.5f64..5.0), 1..8),
    ) {
        let shapes: Vec<Shape> = rects
            .iter()
            .map(|&(x, y, w, h)| {
                Polygon::rectangle(Point::new(x, y), Point::new(x + w, y + h))
                    .unwrap()
                    .into()
            })
            .collect();
        let mut doc = document_with(&["A-GLAZ"]);
        let sync = LayerSynchronizer::default();

        let first = sync.send(&mut doc, &shapes, "A-GLAZ").unwrap();
        let count_after_first = doc.objects_on_layer("A-GLAZ").len();

        let cleared = sync.clear_layer(&mut doc, "A-GLAZ").unwrap();
        prop_assert_eq!(cleared.deleted, count_after_first);

        let second = sync.send(&mut doc, &shapes, "A-GLAZ").unwrap();
        prop_assert_eq!(first.lines_created, second.lines_created);
        prop_assert_eq!(doc.objects_on_layer("A-GLAZ").len(), count_after_first);
        prop_assert_eq!(count_after_first, shapes.len() * 4);
    }
}
