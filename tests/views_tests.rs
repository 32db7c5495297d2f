use glam::Vec3;
use room_viewer::views::{View, ViewCatalog};
use std::io::Write;

#[test]
fn test_default_catalog_has_interior_views() {
    let catalog = ViewCatalog::default();
    let names: Vec<&str> = catalog.iter().map(|v| v.name.as_str()).collect();

    assert_eq!(
        names,
        [
            "Room Overview",
            "Bed & Wall Art",
            "Play Area",
            "TV Corner",
            "Sofa View",
            "Bird's Eye"
        ]
    );
    assert!(!catalog.is_empty());
}

#[test]
fn test_default_catalog_first_view() {
    let catalog = ViewCatalog::default();
    let first = catalog.first();
    assert_eq!(first.position, Vec3::new(3.0, 2.5, 3.0));
    assert_eq!(first.target, Vec3::new(-1.0, 1.0, 0.0));
}

#[test]
fn test_get_out_of_range() {
    let catalog = ViewCatalog::default();
    assert!(catalog.get(catalog.len()).is_none());
    assert_eq!(catalog.get(5).map(|v| v.name.as_str()), Some("Bird's Eye"));
}

#[test]
fn test_from_json() {
    let json = r#"[
        { "name": "Door", "position": { "x": 0, "y": 1.7, "z": 5 }, "target": { "x": 0, "y": 1, "z": 0 } },
        { "name": "Window", "position": { "x": -2, "y": 1.5, "z": 0 }, "target": { "x": 2, "y": 1.5, "z": 0 } }
    ]"#;

    let catalog = ViewCatalog::from_json_str(json).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get(1),
        Some(&View::new("Window", Vec3::new(-2.0, 1.5, 0.0), Vec3::new(2.0, 1.5, 0.0)))
    );
}

#[test]
fn test_empty_catalog_rejected() {
    assert!(ViewCatalog::from_json_str("[]").is_err());
    assert!(ViewCatalog::new(Vec::new()).is_err());
}

#[test]
fn test_blank_name_rejected() {
    let json = r#"[{ "name": "  ", "position": { "x": 0, "y": 0, "z": 1 }, "target": { "x": 0, "y": 0, "z": 0 } }]"#;
    let err = ViewCatalog::from_json_str(json).unwrap_err();
    assert!(err.to_string().contains("empty name"), "unexpected error: {}", err);
}

#[test]
fn test_missing_component_rejected() {
    let json = r#"[{ "name": "Door", "position": { "x": 0, "y": 0 }, "target": { "x": 0, "y": 0, "z": 0 } }]"#;
    assert!(ViewCatalog::from_json_str(json).is_err());
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("room_viewer_views_{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"[{{ "name": "Desk", "position": {{ "x": 1, "y": 2, "z": 3 }}, "target": {{ "x": 0, "y": 1, "z": 0 }} }}]"#
    )
    .unwrap();
    drop(file);

    let catalog = ViewCatalog::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.first().name, "Desk");
}

#[test]
fn test_load_missing_file() {
    assert!(ViewCatalog::load("/nonexistent/views.json").is_err());
}

#[test]
fn test_json_round_trip_of_default_catalog() {
    let catalog = ViewCatalog::default();
    let views: Vec<View> = catalog.iter().cloned().collect();
    let json = serde_json::to_string(&views).unwrap();

    assert_eq!(ViewCatalog::from_json_str(&json).unwrap(), catalog);
}
