use std::cell::RefCell;
use std::rc::Rc;

use engine_core::Transform;
use glam::{Vec2, Vec3};
use terrain::{CpuMeshBuilder, HeightField, PatchSettings, SideOrientation, TerrainController};

/// 4x4 field, unit spacing, elevation `row * 4 + col`.
fn counting_field() -> HeightField {
    let mut samples = Vec::new();
    for row in 0..4 {
        for col in 0..4 {
            samples.extend([col as f32, (row * 4 + col) as f32, row as f32]);
        }
    }
    HeightField::new(4, 4, samples).unwrap()
}

#[test]
fn controller_samples_wrapped_field_and_tracks_camera() {
    let camera = Rc::new(RefCell::new(Transform::from_position(Vec3::new(0.0, 50.0, 0.0))));
    let settings = PatchSettings {
        subdivisions: 3,
        step: 3,
        orientation: SideOrientation::Back,
    };
    let mut controller = TerrainController::new(
        counting_field(),
        settings,
        CpuMeshBuilder::new(),
        Rc::clone(&camera),
    )
    .unwrap();

    let patch = controller.patch();
    assert_eq!(patch.vertex_count(), 16);
    assert_eq!(patch.vertex_position(1, 1), Vec3::new(1.0, 15.0, 1.0));
    assert_eq!(patch.vertex_position(0, 0).y, 0.0);
    // spacing 3/4 per axis, three subdivisions
    assert_eq!(patch.size(), Vec2::new(2.25, 2.25));

    let mesh = controller.builder().mesh(*controller.handle()).unwrap();
    assert_eq!(mesh.positions, controller.patch().positions());
    assert_eq!(mesh.indices.len(), 9 * 6);

    for frame in 1..=10 {
        camera.borrow_mut().translate(Vec3::new(1.0, 0.0, 0.5));
        controller.tick();

        let expected = Vec2::new(frame as f32 - 1.125, frame as f32 * 0.5 - 1.125);
        assert!((controller.patch().world_offset() - expected).length() < 1e-5);
        assert_eq!(controller.patch().vertex_count(), 16);
    }
    assert_eq!(controller.ticks(), 10);

    // Geometry is regenerated from the same field, so it never drifts.
    let mesh = controller.builder().mesh(*controller.handle()).unwrap();
    assert_eq!(mesh.positions[3 * 5 + 1], 15.0);
    assert_eq!(mesh.revision, 11);
}
