use std::time::Duration;

use bvh_anim_core::{
    Axis, Builder, BvhError, ChannelType, Config, Document, IndentStyle, JointIndex,
    LineTerminator, Offset, WriteOptions,
};
use bvh_test_fixtures::documents;
use serde_json::json;

fn assert_same_hierarchy(a: &Document, b: &Document) {
    assert_eq!(a.num_joints(), b.num_joints());
    for (x, y) in a.joints().zip(b.joints()) {
        assert_eq!(x.name(), y.name());
        assert_eq!(x.offset(), y.offset());
        assert_eq!(x.end_site(), y.end_site());
        assert_eq!(x.depth(), y.depth());
        assert_eq!(x.channels().collect::<Vec<_>>(), y.channels().collect::<Vec<_>>());
    }
}

#[test]
fn every_fixture_survives_a_round_trip() {
    for key in documents::keys() {
        let doc = Document::parse(&documents::text(&key).unwrap()).unwrap();
        let text = WriteOptions::default().write_to_string(&doc);
        let back = Document::parse(&text)
            .unwrap_or_else(|err| panic!("{key}: written text does not parse: {err}"));
        assert_same_hierarchy(&doc, &back);
        assert_eq!(back.num_frames(), doc.num_frames());
        for (x, y) in doc.motion_values().iter().zip(back.motion_values()) {
            assert!((x - y).abs() <= 0.005, "{key}: {x} vs {y}");
        }
        assert!((doc.frame_time_secs() - back.frame_time_secs()).abs() < 1e-7);
    }
}

#[test]
fn display_matches_default_options() {
    let doc = Document::parse(&documents::text("branching").unwrap()).unwrap();
    assert_eq!(doc.to_string(), WriteOptions::default().write_to_string(&doc));
}

#[test]
fn indentation_and_terminators() {
    let doc = Document::parse(&documents::text("hips_two_frames").unwrap()).unwrap();
    let flat = WriteOptions::default()
        .with_indent(IndentStyle::NoIndentation)
        .with_line_terminator(LineTerminator::Windows)
        .write_to_string(&doc);
    assert!(flat.starts_with("HIERARCHY\r\nROOT Hips\r\n{\r\nOFFSET 0.00000 0.00000 0.00000\r\n"));
    assert!(flat.contains("\r\nFrame Time: 0.0333336\r\n"));
    assert!(flat.ends_with("1.00 0.00 0.00 0.00 0.00 0.00\r\n"));

    let tabs = WriteOptions::default()
        .with_line_terminator(LineTerminator::Unix)
        .write_to_string(&doc);
    assert!(tabs.contains("\n\tCHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation\n"));
    assert!(tabs.contains("\n\t\tOFFSET 0.00000 7.50000 0.00000\n"));
}

#[test]
fn empty_document_writes_only_headers() {
    let text = WriteOptions::default()
        .with_line_terminator(LineTerminator::Unix)
        .write_to_string(&Document::default());
    assert_eq!(text, "HIERARCHY\nMOTION\nFrames: 0\nFrame Time: 0.0000000\n");
}

#[test]
fn serde_names_are_stable() {
    assert_eq!(
        serde_json::to_value(ChannelType::XPosition).unwrap(),
        json!("x_position")
    );
    assert_eq!(
        serde_json::from_value::<ChannelType>(json!("z_rotation")).unwrap(),
        ChannelType::ZRotation
    );
    assert_eq!(ChannelType::ZRotation.axis(), Axis::Z);

    let config: Config = serde_json::from_value(json!({ "max_depth": 8 })).unwrap();
    assert_eq!(config.max_depth, 8);
    assert_eq!(
        config.max_preallocated_values,
        Config::default().max_preallocated_values
    );

    let options: WriteOptions =
        serde_json::from_value(json!({ "motion_values_significant_figures": 4 })).unwrap();
    assert_eq!(options.motion_values_significant_figures, 4);
    assert_eq!(options.offset_significant_figures, 5);
}

#[test]
fn builder_documents_survive_a_round_trip() {
    let doc = Builder::with_root_joint(
        "mixamorig:Hips",
        Offset::new(0.0, 90.0, 0.0),
        &[ChannelType::YPosition, ChannelType::YRotation],
    )
    .push_child("Left_Arm", Offset::new(5.0, 10.0, 0.0), &[ChannelType::ZRotation])
    .push_end(Offset::new(8.0, 0.0, 0.0))
    .push_child_with_parent(
        JointIndex::ROOT,
        "Right_Arm",
        Offset::new(-5.0, 10.0, 0.0),
        &[],
    )
    .with_motion(2, Duration::from_millis(25))
    .push_frame(&[90.0, 45.0, 10.0])
    .push_frame(&[91.0, 46.0, 11.0])
    .build()
    .unwrap();

    let back = Document::parse(&doc.to_string()).unwrap();
    assert_same_hierarchy(&doc, &back);
    assert_eq!(back.motion_values(), doc.motion_values());

    let unwritable = Builder::with_root_joint("Left Arm", Offset::ZERO, &[])
        .push_end(Offset::ZERO)
        .with_motion(0, Duration::ZERO)
        .build();
    assert!(matches!(
        unwritable,
        Err(BvhError::InvalidJointName { .. })
    ));
}
