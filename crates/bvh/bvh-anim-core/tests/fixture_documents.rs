use std::fs::File;

use bvh_anim_core::{ChannelType, Document, JointIndex, Offset};
use bvh_test_fixtures::documents;

fn load(name: &str) -> Document {
    let text = documents::text(name).expect("fixture text");
    Document::parse(&text).unwrap_or_else(|err| panic!("fixture {name} failed to parse: {err}"))
}

#[test]
fn every_fixture_matches_its_manifest_shape() {
    for key in documents::keys() {
        let doc = load(&key);
        let shape = documents::shape(&key).unwrap();
        assert_eq!(doc.num_joints(), shape.joints, "{key}: joints");
        assert_eq!(doc.num_channels(), shape.channels, "{key}: channels");
        assert_eq!(doc.num_frames(), shape.frames, "{key}: frames");
        assert_eq!(
            doc.motion_values().len(),
            shape.frames * shape.channels,
            "{key}: motion length"
        );
        let walked: usize = doc.joints().map(|j| j.num_channels()).sum();
        assert_eq!(walked, doc.num_channels(), "{key}: pre-order channel sum");
    }
}

#[test]
fn single_root_with_two_frames() {
    let doc = load("hips_two_frames");
    let hips = doc.root_joint().unwrap();
    assert_eq!(hips.name(), "Hips");
    assert_eq!(hips.num_channels(), 6);
    assert!((doc.frame_time_secs() - 0.0333336).abs() < 1e-9);

    let frames: Vec<_> = doc.frames().collect();
    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(|f| f.len() == 6));
    assert!(frames[0].iter().all(|&v| v == 0.0));
    assert_eq!(frames[1][0], 1.0);
    assert!(frames[1].as_slice()[1..].iter().all(|&v| v == 0.0));
}

#[test]
fn branching_joint_lists_children_in_order() {
    let doc = load("branching");
    let hips = doc.root_joint().unwrap();
    assert!(!hips.is_end_joint());
    assert_eq!(hips.end_site(), None);

    let children: Vec<_> = hips.children().map(|j| j.name()).collect();
    assert_eq!(children, vec!["LeftUpLeg", "RightUpLeg"]);
    for child in hips.children() {
        assert!(child.is_end_joint());
        assert_eq!(child.end_site(), Some(Offset::new(0.0, -18.0, 0.0)));
        assert_eq!(child.parent(), Some(hips));
        assert_eq!(child.depth(), 1);
    }

    let frame = doc.frame(0).unwrap();
    let right = doc.joint_by_name("RightUpLeg").unwrap();
    assert_eq!(frame.joint_values(&right).unwrap(), &[-10.0, -20.0, -30.0]);
    let zrot = right.channel(0).unwrap();
    assert_eq!(zrot.channel_type, ChannelType::ZRotation);
    assert_eq!(frame.channel_value(&right, zrot).unwrap(), -10.0);
}

#[test]
fn humanoid_columns_follow_pre_order() {
    let doc = load("humanoid");
    let names: Vec<_> = doc.joints().map(|j| j.name()).collect();
    assert_eq!(
        names,
        vec!["Hips", "Spine", "Neck", "Head", "LeftArm", "RightArm", "LeftLeg", "RightLeg"]
    );

    for frame in doc.frames() {
        for (column, &value) in frame.iter().enumerate() {
            assert_eq!(value, (frame.index() * 100 + column) as f32);
        }
    }

    let left_arm = doc.joint_by_name("LeftArm").unwrap();
    assert_eq!(left_arm.motion_columns(), 15..18);
    assert_eq!(left_arm.index(), JointIndex(4));
    assert_eq!(
        doc.frame(2).unwrap().joint_values(&left_arm).unwrap(),
        &[215.0, 216.0, 217.0]
    );

    let head = doc.joint_by_name("Head").unwrap();
    assert_eq!(head.depth(), 3);
    assert_eq!(head.end_site(), Some(Offset::new(0.0, 6.0, 0.0)));
}

#[test]
fn duplicate_names_do_not_break_traversal() {
    let doc = load("duplicate_names");
    let bones: Vec<_> = doc.joints_named("Bone").collect();
    assert_eq!(bones.len(), 2);
    assert_eq!(bones[0].offset(), Offset::new(1.0, 0.0, 0.0));
    assert_eq!(bones[1].offset(), Offset::new(-1.0, 0.0, 0.0));
    assert_eq!(doc.joint_by_name("Bone"), Some(bones[0]));
    assert_ne!(bones[0], bones[1]);

    let frame = doc.frame(0).unwrap();
    assert_eq!(frame.joint_values(&bones[1]).unwrap(), &[7.0]);
    assert_eq!(doc.joints_named("Missing").count(), 0);
}

#[test]
fn namespaced_names_and_split_rows() {
    let doc = load("mixamo_crlf");
    let spine = doc.joint_by_name("mixamorig:Spine").unwrap();
    assert_eq!(spine.parent().map(|p| p.name()), Some("mixamorig:Hips"));
    assert_eq!(doc.frame(1).unwrap().joint_values(&spine).unwrap(), &[4.0, 5.0, 6.0]);
    assert_eq!(doc.frame(0).unwrap()[1], 98.5);
}

#[test]
fn reader_and_text_constructors_agree() {
    let path = documents::path("humanoid").unwrap();
    let from_file = Document::from_reader(File::open(path).unwrap()).unwrap();
    let from_text: Document = documents::text("humanoid").unwrap().parse().unwrap();
    assert_eq!(from_file, from_text);
}
