use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use serde_json::json;

use s2_tile_metadata::{
    DrawType, Face, LayerMetaData, LonLatBounds, Metadata, MetadataBuilder, Shape, to_metadata,
};

fn water_lines_layer() -> LayerMetaData {
    let shape: Shape = serde_json::from_value(json!({
        "class": "string",
        "offset": "f64",
        "info": { "name": "string", "value": "i64" },
    }))
    .unwrap();
    LayerMetaData {
        description: None,
        minzoom: 0,
        maxzoom: 13,
        draw_types: vec![DrawType::Lines],
        shape,
        m_shape: None,
    }
}

#[test]
fn mixed_wm_and_s2_tile_set() {
    let mut builder = MetadataBuilder::default();

    builder.set_name("OSM".into());
    builder.set_description("A free editable map of the whole world.".into());
    builder.set_version("1.0.0".into());
    builder.add_attribution("OpenStreetMap", "https://www.openstreetmap.org/copyright/");
    builder.add_layer("water_lines", &water_lines_layer());

    builder.add_tile_wm(0, 0, 0, &LonLatBounds::new(-60.0, -20.0, 5.0, 60.0));
    builder.add_tile_s2(Face::Face1, 5, 22, 37, &LonLatBounds::new(-120.0, -7.0, 44.0, 72.0));

    let metadata = builder.commit();

    assert_eq!(
        serde_json::to_value(&metadata).unwrap(),
        json!({
            "s2tilejson": "1.0.0",
            "version": "1.0.0",
            "name": "OSM",
            "scheme": "fzxy",
            "description": "A free editable map of the whole world.",
            "type": "vector",
            "extension": "pbf",
            "encoding": "none",
            "faces": [0, 1],
            "bounds": [-120.0, -20.0, 44.0, 72.0],
            "wmbounds": { "0": [0, 0, 0, 0] },
            "s2bounds": {
                "0": {},
                "1": { "5": [22, 37, 22, 37] },
                "2": {},
                "3": {},
                "4": {},
                "5": {}
            },
            "minzoom": 0,
            "maxzoom": 13,
            "centerpoint": { "lon": -38.0, "lat": 26.0, "zoom": 6 },
            "attributions": {
                "OpenStreetMap": "https://www.openstreetmap.org/copyright/"
            },
            "layers": {
                "water_lines": {
                    "minzoom": 0,
                    "maxzoom": 13,
                    "drawTypes": [2],
                    "shape": {
                        "class": "string",
                        "info": { "name": "string", "value": "i64" },
                        "offset": "f64"
                    }
                }
            },
            "tilestats": { "total": 2, "0": 1, "1": 1, "2": 0, "3": 0, "4": 0, "5": 0 },
            "vector_layers": [
                { "id": "water_lines", "minzoom": 0, "maxzoom": 13, "fields": {} }
            ]
        })
    );
}

#[test]
fn committed_documents_round_trip_through_conversion() {
    let mut builder = MetadataBuilder::default();
    builder.set_name("round trip".into());
    builder.add_layer("roads", &water_lines_layer());
    builder.add_tile_s2(Face::Face4, 7, 100, 100, &LonLatBounds::new(10.0, 10.0, 11.0, 11.0));
    let metadata = builder.commit();

    // The marker makes the converter a no-op.
    let as_json = serde_json::to_value(&metadata).unwrap();
    assert_eq!(to_metadata(&as_json), metadata);
}

#[test]
fn registration_order_does_not_matter() {
    let tiles: [(Face, u8, u64, u64, LonLatBounds); 4] = [
        (Face::Face0, 2, 1, 1, LonLatBounds::new(-60.0, -20.0, 5.0, 60.0)),
        (Face::Face2, 5, 22, 37, LonLatBounds::new(-120.0, -7.0, 44.0, 72.0)),
        (Face::Face2, 5, 23, 36, LonLatBounds::new(40.0, -30.0, 80.0, 10.0)),
        (Face::Face5, 9, 511, 12, LonLatBounds::new(-10.0, 65.0, -5.0, 80.0)),
    ];

    let build = |order: &[usize]| -> Metadata {
        let mut builder = MetadataBuilder::default();
        for &i in order {
            let (face, zoom, x, y, bounds) = tiles[i];
            builder.add_tile_s2(face, zoom, x, y, &bounds);
        }
        builder.commit()
    };

    let forward = build(&[0, 1, 2, 3]);
    let backward = build(&[3, 2, 1, 0]);
    let shuffled = build(&[2, 0, 3, 1]);

    assert_eq!(forward, backward);
    assert_eq!(forward, shuffled);
    assert_eq!(forward.faces, vec![Face::Face0, Face::Face2, Face::Face5]);
    assert_eq!(forward.bounds.as_array(), [-120.0, -30.0, 80.0, 80.0]);
    assert_eq!(forward.minzoom, 2);
    assert_eq!(forward.maxzoom, 9);
}

#[test]
fn bounds_only_ever_widen() {
    let mut builder = MetadataBuilder::default();
    let mut previous: Option<LonLatBounds> = None;

    let updates = [
        LonLatBounds::new(0.0, 0.0, 1.0, 1.0),
        LonLatBounds::new(-0.5, 0.5, 0.5, 2.0),
        LonLatBounds::new(0.2, 0.2, 0.3, 0.3),
    ];
    for (i, update) in updates.iter().enumerate() {
        builder.add_tile_wm(4, i as u64, i as u64, update);
        let bounds = builder.commit().bounds;
        if let Some(prev) = previous {
            assert!(bounds.left <= prev.left);
            assert!(bounds.bottom <= prev.bottom);
            assert!(bounds.right >= prev.right);
            assert!(bounds.top >= prev.top);
        }
        previous = Some(bounds);
    }

    let final_bounds = previous.unwrap();
    assert_relative_eq!(final_bounds.center_lon(), 0.25);
    assert_relative_eq!(final_bounds.center_lat(), 1.0);
}

#[test]
fn face_list_is_ascending_and_includes_face_zero_for_wm() {
    let mut builder = MetadataBuilder::default();
    builder.add_tile_s2(Face::Face3, 2, 0, 0, &LonLatBounds::new(0.0, 0.0, 1.0, 1.0));
    builder.add_tile_s2(Face::Face1, 2, 1, 0, &LonLatBounds::new(0.0, 0.0, 1.0, 1.0));
    builder.add_tile_wm(2, 2, 2, &LonLatBounds::new(0.0, 0.0, 1.0, 1.0));

    let metadata = builder.commit();
    assert_eq!(metadata.faces, vec![Face::Face0, Face::Face1, Face::Face3]);
}

#[test]
fn per_face_counts_sum_to_total() {
    let mut builder = MetadataBuilder::default();
    builder.add_tile_wm(1, 0, 0, &LonLatBounds::new(0.0, 0.0, 1.0, 1.0));
    for i in 0..3 {
        builder.add_tile_s2(Face::Face2, 6, i, i, &LonLatBounds::new(0.0, 0.0, 1.0, 1.0));
    }
    builder.add_tile_s2(Face::Face5, 6, 9, 9, &LonLatBounds::new(0.0, 0.0, 1.0, 1.0));

    let stats = builder.commit().tilestats;
    let face_sum: u64 = (0u8..6).map(|f| stats.get(Face::from(f))).sum();
    assert_eq!(stats.total, 5);
    assert_eq!(face_sum, stats.total);
}
