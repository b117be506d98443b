//! Library integration tests for world flipping.
//!
//! Runs the rewrite engine over the fixture world in `tests/fixtures/` and over
//! small inline documents. Checks exact output text, byte preservation outside
//! rewritten values, and geometric validity for every axis combination.

use std::path::Path;

use glam::Quat;
use zenflip::codepage::{decode_single_byte, encode_single_byte, read_world};
use zenflip::hexfloat::{decode_floats, encode_floats};
use zenflip::locator::{scan, FieldValue};
use zenflip::rewrite::{flip_document, FieldRegistry, FlipOptions, Rewriter};
use zenflip::transforms::{AxisFlip, BoundingBox, Keyframe, RotationMatrix};

const EPS: f32 = 1e-5;

fn fixture() -> String {
    read_world(Path::new("tests/fixtures/world.zen")).expect("fixture should be readable")
}

fn flip(text: &str, flip: AxisFlip) -> String {
    flip_document(text, &FlipOptions::new(flip)).expect("flip should succeed").text
}

/// Every hex value of `kind` in `text`, in order
fn hex_values(text: &str, kind: &str) -> Vec<String> {
    let registry = FieldRegistry::standard();
    let rule = registry.get(kind).expect("standard kind");
    scan(text, &rule.kind)
        .filter_map(|m| match m.value {
            FieldValue::Hex(hex) => Some(hex.to_string()),
            FieldValue::Decimals(_) => None,
        })
        .collect()
}

/// Every decimal value of `kind` in `text`, in order
fn decimal_values(text: &str, kind: &str) -> Vec<Vec<f32>> {
    let registry = FieldRegistry::standard();
    let rule = registry.get(kind).expect("standard kind");
    scan(text, &rule.kind)
        .filter_map(|m| match m.value {
            FieldValue::Decimals(v) => Some(v),
            FieldValue::Hex(_) => None,
        })
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_object_position_scenario() {
    assert_eq!(
        flip("trafoOSToWSPos=vec3:10.0 -5.0 2.0", AxisFlip::X),
        "trafoOSToWSPos=vec3:-10 -5 2"
    );
}

#[test]
fn test_identity_rotation_scenario() {
    let text = format!("trafoOSToWSRot=raw:{}", RotationMatrix::IDENTITY.to_hex());
    for rotation in [false, true] {
        let out = flip(&text, AxisFlip::X.with_rotation(rotation));
        let hex = out.strip_prefix("trafoOSToWSRot=raw:").expect("tag preserved");
        assert_eq!(RotationMatrix::from_hex(hex).unwrap(), RotationMatrix::IDENTITY);
    }
}

#[test]
fn test_bbox_scenario() {
    assert_eq!(
        flip("bbox3DWS=rawFloat:-1 -2 -3 4 5 6", AxisFlip::X),
        "bbox3DWS=rawFloat:-4 -2 -3 1 5 6"
    );
}

#[test]
fn test_two_record_keyframe_scenario() {
    let records = [[1.0, 2.0, 3.0, 0.1, 0.2, 0.3, 0.927], [-4.0, 5.0, 6.0, 0.5, -0.5, 0.5, 0.5]];
    let floats: Vec<f32> = records.iter().flatten().copied().collect();
    let text = format!("keyframes=raw:{}\r\n", encode_floats(&floats));

    let outcome =
        flip_document(&text, &FlipOptions::new(AxisFlip::X.with_rotation(true))).unwrap();
    assert_eq!(outcome.report.count("keyframes"), 2);

    let hex = &hex_values(&outcome.text, "keyframes")[0];
    let out = decode_floats(hex).unwrap();
    for (i, record) in records.iter().enumerate() {
        let got = &out[i * 7..i * 7 + 7];
        assert_eq!(got[0], -record[0]);
        assert_eq!(got[1], record[1]);
        assert_eq!(got[2], record[2]);
        assert_eq!(got[3], -record[3]);
        assert_eq!(got[4], record[4]);
        assert_eq!(got[5], record[5]);
        assert_eq!(got[6], -record[6]);
    }
}

// ============================================================================
// Fixture world
// ============================================================================

#[test]
fn test_fixture_flip_x() {
    let world = fixture();
    let outcome = flip_document(&world, &FlipOptions::new(AxisFlip::X)).unwrap();
    let out = &outcome.text;

    assert!(out.contains("\tbbox3DWS=rawFloat:-4 -2 -3 1 5 6\r\n"));
    assert!(out.contains("\tbbox3DWS=rawFloat:-105.5 -10 -20 -95.5 30 40\r\n"));
    assert!(out.contains("\ttrafoOSToWSPos=vec3:-10 -5 2\r\n"));
    assert!(out.contains("\ttrafoOSToWSPos=vec3:-100.5 10 10\r\n"));
    assert!(out.contains("\tposition=vec3:-100 200 300\r\n"));
    assert!(out.contains("\tdirection=vec3:-0 0 1\r\n"));
    assert!(out.contains("\tposition=vec3:1500.25 12.5 0.125\r\n"));
    assert!(out.contains("\tdirection=vec3:-0.70710677 0 -0.70710677\r\n"));

    // Rotations stay as they are without the rotation toggle
    assert_eq!(hex_values(out, "rotation-matrix"), hex_values(&world, "rotation-matrix"));

    let report = &outcome.report;
    assert_eq!(report.count("object-position"), 2);
    assert_eq!(report.count("waypoint-position"), 2);
    assert_eq!(report.count("waypoint-direction"), 2);
    assert_eq!(report.count("rotation-matrix"), 0);
    assert_eq!(report.count("keyframes"), 2);
    assert_eq!(report.count("bounding-box"), 2);
    assert_eq!(report.total_skipped(), 0);
}

#[test]
fn test_fixture_keyframes_without_rotation_keep_quaternions() {
    let world = fixture();
    let out = flip(&world, AxisFlip::X);
    let before = decode_floats(&hex_values(&world, "keyframes")[0]).unwrap();
    let after = decode_floats(&hex_values(&out, "keyframes")[0]).unwrap();
    for (b, a) in before.chunks(7).zip(after.chunks(7)) {
        assert_eq!(a[0], -b[0]);
        assert_eq!(&a[1..], &b[1..]);
    }
}

#[test]
fn test_fixture_only_values_change() {
    let world = fixture();
    let out = flip(&world, AxisFlip::new(true, true, true).with_rotation(true));

    assert_eq!(out.lines().count(), world.lines().count());
    for (before, after) in world.lines().zip(out.lines()) {
        let tag = |line: &str| line.split_once(':').map(|(t, _)| t.to_string());
        match tag(before) {
            Some(t)
                if ["vec3", "raw", "rawFloat"].iter().any(|s| t.ends_with(&format!("={}", s))) =>
            {
                assert_eq!(tag(after), Some(t));
            }
            _ => assert_eq!(before, after),
        }
    }

    // Windows-1250 name bytes come back unchanged
    let bytes = encode_single_byte(&out).unwrap();
    assert!(bytes.windows(4).any(|w| w == b"\xaf\xf3\xb3w"));
}

#[test]
fn test_fixture_double_flip_is_byte_identical() {
    let world = fixture();
    for axes in AxisFlip::all_combinations().filter(|f| f.any_axis()) {
        for rotation in [false, true] {
            let combo = axes.with_rotation(rotation);
            let twice = flip(&flip(&world, combo), combo);
            assert_eq!(twice, world, "double flip with {}", combo);
        }
    }
}

#[test]
fn test_double_flip_restores_values_bit_exactly() {
    let text = "trafoOSToWSPos=vec3:0.1 -1e-7 3.4028235e38\nposition=vec3:+5 .5 -0\n";
    let combo = AxisFlip::new(true, true, true);
    let twice = flip(&flip(text, combo), combo);
    for kind in ["object-position", "waypoint-position"] {
        let before = decimal_values(text, kind);
        let after = decimal_values(&twice, kind);
        for (b, a) in before.iter().flatten().zip(after.iter().flatten()) {
            assert_eq!(b.to_bits(), a.to_bits());
        }
    }
}

// ============================================================================
// Geometric validity for every flip combination
// ============================================================================

fn euler_rotations() -> Vec<RotationMatrix> {
    let angles = [0.0f32, 0.3, 1.1, -2.4, std::f32::consts::FRAC_PI_2];
    let mut out = Vec::new();
    for &a in &angles {
        for &b in &angles {
            for &c in &angles {
                let q = Quat::from_euler(glam::EulerRot::YXZ, a, b, c);
                out.push(RotationMatrix::from_mat3(glam::Mat3::from_quat(q)));
            }
        }
    }
    out
}

#[test]
fn test_rotation_validity_every_combination() {
    let matrices = euler_rotations();
    let text: String = matrices
        .iter()
        .map(|m| format!("\t\t\ttrafoOSToWSRot=raw:{}\r\n", m.to_hex()))
        .collect();

    for combo in AxisFlip::all_combinations() {
        let out = flip(&text, combo);
        let hexes = hex_values(&out, "rotation-matrix");
        assert_eq!(hexes.len(), matrices.len());
        for hex in hexes {
            let r = RotationMatrix::from_hex(&hex).unwrap();
            assert!((r.determinant() - 1.0).abs() < EPS, "det with {}", combo);
            assert!(r.orthogonality_error() < EPS, "orthogonality with {}", combo);
        }
    }
}

#[test]
fn test_quaternion_norm_every_combination() {
    let floats: Vec<f32> = euler_rotations()
        .iter()
        .enumerate()
        .flat_map(|(i, m)| {
            let q = Quat::from_mat3(&m.to_mat3());
            Keyframe { position: glam::Vec3::new(i as f32, 1.0, -2.0), rotation: q }.to_floats()
        })
        .collect();
    let text = format!("keyframes=raw:{}\n", encode_floats(&floats));

    for combo in AxisFlip::all_combinations() {
        let out = flip(&text, combo);
        let decoded = decode_floats(&hex_values(&out, "keyframes")[0]).unwrap();
        for record in decoded.chunks(7) {
            let q = Quat::from_xyzw(record[3], record[4], record[5], record[6]);
            assert!((q.length() - 1.0).abs() < EPS, "norm with {}", combo);
        }
    }
}

#[test]
fn test_bbox_order_every_combination() {
    let boxes = [
        BoundingBox::from_floats(&[-1.0, -2.0, -3.0, 4.0, 5.0, 6.0]),
        BoundingBox::from_floats(&[10.0, 10.0, 10.0, 10.0, 10.0, 10.0]),
        BoundingBox::from_floats(&[-500.5, 0.0, 12.25, -100.0, 0.5, 4000.0]),
    ];
    let text: String = boxes
        .iter()
        .map(|b| {
            let v = b.to_floats();
            format!("bbox3DWS=rawFloat:{} {} {} {} {} {}\n", v[0], v[1], v[2], v[3], v[4], v[5])
        })
        .collect();

    for combo in AxisFlip::all_combinations() {
        let out = flip(&text, combo);
        for values in decimal_values(&out, "bounding-box") {
            let bbox = BoundingBox::from_floats(&[
                values[0], values[1], values[2], values[3], values[4], values[5],
            ]);
            assert!(bbox.is_ordered(), "bbox {:?} with {}", bbox, combo);
        }
    }
}

// ============================================================================
// Rejection and pass-through
// ============================================================================

#[test]
fn test_keyframe_blob_of_bad_length_unchanged() {
    for len in [8usize, 55, 57, 100, 120] {
        let blob: String = "0123456789abcdef".chars().cycle().take(len).collect();
        let text = format!("keyframes=raw:{}\r\n", blob);
        let outcome = flip_document(&text, &FlipOptions::new(AxisFlip::X)).unwrap();
        assert_eq!(outcome.text, text, "length {}", len);
        assert_eq!(outcome.report.count("keyframes"), 0);
    }
}

#[test]
fn test_underflowing_decimal_left_untouched() {
    let text = "position=vec3:1e-50 2 3\r\nposition=vec3:4 5 6\r\n";
    let outcome = flip_document(text, &FlipOptions::new(AxisFlip::X)).unwrap();
    assert_eq!(outcome.text, "position=vec3:1e-50 2 3\r\nposition=vec3:-4 5 6\r\n");
    let count = outcome.report.get("waypoint-position").unwrap();
    assert_eq!(count.records, 1);
    assert_eq!(count.skipped, 1);
}

#[test]
fn test_values_split_across_lines_are_flipped() {
    let text = "position=vec3:1\r\n2 3\r\n";
    let outcome = flip_document(text, &FlipOptions::new(AxisFlip::X)).unwrap();
    assert_eq!(outcome.text, "position=vec3:-1 2 3\r\n");
    assert_eq!(outcome.report.count("waypoint-position"), 1);
}

#[test]
fn test_document_without_fields_unchanged() {
    let bytes: Vec<u8> = (0..=255u8).cycle().take(2048).collect();
    let text = decode_single_byte(&bytes);
    let outcome = flip_document(&text, &FlipOptions::new(AxisFlip::X)).unwrap();
    assert_eq!(encode_single_byte(&outcome.text).unwrap(), bytes);
    assert_eq!(outcome.report.total_records(), 0);
}

#[test]
fn test_disabled_kind_is_left_alone() {
    let world = fixture();
    let registry = FieldRegistry::standard().without(&["waypoint-direction"]);
    let rewriter = Rewriter::new(registry, FlipOptions::new(AxisFlip::X));
    let outcome = rewriter.rewrite(&world).unwrap();
    assert!(outcome.text.contains("\tdirection=vec3:0 0 1\r\n"));
    assert!(outcome.report.get("waypoint-direction").is_none());
    assert_eq!(outcome.report.count("waypoint-position"), 2);
}
