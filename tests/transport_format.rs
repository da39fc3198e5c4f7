//! Wire-shape checks for the design transport tree.

use glovesmith::design::{
    to_transport, DesignModel, DesignStore, DesignTransport, EmbroideryFont, EmbroiderySpec,
    EmbroideryTarget, Region,
};

#[test]
fn exported_tree_has_documented_shape() {
    let mut store = DesignStore::new();
    store.set_region_color(Region::Palm, "#112233");
    store.set_embroidery(
        EmbroideryTarget::PatchLogo,
        Some(EmbroiderySpec {
            text: "LUX".to_owned(),
            font: EmbroideryFont::Arial,
            size: 40.0,
            color: "#fff".to_owned(),
        }),
    );

    let json: serde_json::Value =
        serde_json::from_str(&store.export().to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["regions"]["glove_palm"]["color"], "#112233");
    assert_eq!(json["regions"]["glove_palm"]["material"], "full_grain");
    assert_eq!(json["regions"]["glove_palm"]["pattern"], "none");

    let patch = &json["embroidery"]["targets"]["patch_logo"];
    assert_eq!(patch["text"], "LUX");
    assert_eq!(patch["font"], "Arial");
    assert_eq!(patch["size"], 40.0);
    assert_eq!(patch["color"], "#fff");

    // Unset targets serialize as explicit nulls, not missing keys.
    assert!(json["embroidery"]["targets"]["wrist_name"].is_null());
    assert!(json["embroidery"]["targets"]
        .as_object()
        .unwrap()
        .contains_key("wrist_name"));

    assert!(json["createdAt"].is_string());
}

#[test]
fn cleared_target_round_trips_as_null() {
    let mut store = DesignStore::new();
    store.set_embroidery(
        EmbroideryTarget::PatchLogo,
        Some(EmbroiderySpec {
            text: "LUX".to_owned(),
            font: EmbroideryFont::Arial,
            size: 40.0,
            color: "#fff".to_owned(),
        }),
    );
    store.set_embroidery(EmbroideryTarget::PatchLogo, None);

    let json: serde_json::Value =
        serde_json::from_str(&store.export().to_json_pretty().unwrap()).unwrap();
    assert!(json["embroidery"]["targets"]["patch_logo"].is_null());
}

#[test]
fn json_round_trip_preserves_the_model() {
    let mut model = DesignModel::default();
    for target in EmbroideryTarget::ALL {
        model.embroidery.insert(
            target,
            Some(EmbroiderySpec {
                text: target.key().to_uppercase(),
                font: EmbroideryFont::Courier,
                size: 24.5,
                color: "#abcdef".to_owned(),
            }),
        );
    }

    let json = to_transport(&model).to_json_pretty().unwrap();
    let restored = DesignTransport::from_json(&json).unwrap().into_model().unwrap();
    assert_eq!(restored, model);
}

#[test]
fn snapshot_with_unknown_font_is_rejected() {
    let store = DesignStore::new();
    let mut snapshot = store.export();
    snapshot.embroidery.targets.insert(
        EmbroideryTarget::WristName.key().to_owned(),
        Some(glovesmith::design::TransportSpec {
            text: "A".to_owned(),
            font: "Comic Sans".to_owned(),
            size: 20.0,
            color: "#fff".to_owned(),
        }),
    );
    assert!(matches!(
        snapshot.into_model(),
        Err(glovesmith::error::DesignError::InvalidFontKind(_))
    ));
}

#[test]
fn import_accepts_hand_written_json() {
    let json = r##"{
        "regions": {
            "glove_palm":     {"material": "suede",      "color": "#112233", "pattern": "none"},
            "glove_backhand": {"material": "full_grain", "color": "#8b5a2b", "pattern": "none"},
            "glove_thumb":    {"material": "full_grain", "color": "#8b5a2b", "pattern": "none"},
            "wrist_strap":    {"material": "synthetic",  "color": "#222222", "pattern": "cross"},
            "webbing":        {"material": "full_grain", "color": "#8b5a2b", "pattern": "none"},
            "patch":          {"material": "full_grain", "color": "#8b5a2b", "pattern": "none"}
        },
        "embroidery": {
            "targets": {
                "wrist_name": {"text": "LUX", "font": "Arial", "size": 40, "color": "#fff"},
                "thumb_name": null,
                "patch_logo": null
            }
        },
        "createdAt": "2026-08-27T12:00:00+00:00"
    }"##;

    let model = DesignTransport::from_json(json).unwrap().into_model().unwrap();
    assert_eq!(model.appearance(Region::Palm).color, "#112233");
    assert_eq!(
        model.embroidery_spec(EmbroideryTarget::WristName).unwrap().size,
        40.0
    );
    assert!(model.embroidery_spec(EmbroideryTarget::ThumbName).is_none());
}
