use facadekit_designer::{export_dxf, facade_to_dxf, FacadeGenerator, FacadeParameters, ShapeSetKind};
use std::collections::BTreeMap;

fn layers() -> BTreeMap<ShapeSetKind, String> {
    let mut layers = BTreeMap::new();
    layers.insert(ShapeSetKind::Windows, "A-GLAZ".to_string());
    layers.insert(ShapeSetKind::Doors, "A-DOOR".to_string());
    layers
}

#[test]
fn test_every_edge_becomes_a_line() {
    let geometry = FacadeGenerator::new(FacadeParameters::default())
        .unwrap()
        .generate()
        .unwrap();
    let (drawing, written) = facade_to_dxf(&geometry, &layers());

    // 12 windows and 3 doors of 4 edges, 2 valleys, 7-edge outline
    assert_eq!(written, 12 * 4 + 3 * 4 + 2 + 7);
    assert_eq!(drawing.entities().count(), written);

    let on_doors = drawing
        .entities()
        .filter(|e| e.common.layer == "A-DOOR")
        .count();
    assert_eq!(on_doors, 12);

    let unassigned = drawing
        .entities()
        .filter(|e| e.common.layer == "0")
        .count();
    assert_eq!(unassigned, 9);
}

#[test]
fn test_export_writes_loadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("facade.dxf");
    let geometry = FacadeGenerator::new(FacadeParameters::default())
        .unwrap()
        .generate()
        .unwrap();

    let written = export_dxf(&geometry, &layers(), &path).unwrap();
    assert!(path.exists());

    let loaded = dxf::Drawing::load_file(&path).unwrap();
    assert_eq!(loaded.entities().count(), written);
}
