use glam::Vec3;
use room_viewer::{OrbitControls, PerspectiveCamera};

fn camera_at(position: Vec3, target: Vec3) -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::default();
    camera.position = position;
    camera.look_at(target);
    camera
}

fn undamped(target: Vec3) -> OrbitControls {
    let mut controls = OrbitControls::new(target);
    controls.enable_damping = false;
    controls
}

// ============================================================================
// Idle
// ============================================================================

#[test]
fn test_defaults() {
    let controls = OrbitControls::default();
    assert!(controls.enable_damping);
    assert_eq!(controls.damping_factor, 0.05);
    assert!(!controls.has_pending_motion());
}

#[test]
fn test_update_without_motion_keeps_position_exact() {
    let position = Vec3::new(-3.5, 1.5, 1.5);
    let target = Vec3::new(-1.8, 1.5, 0.0);
    let mut camera = camera_at(position, Vec3::ZERO);
    let mut controls = OrbitControls::new(target);

    assert!(!controls.update(&mut camera));
    assert_eq!(camera.position, position);
    let expected = (target - position).normalize();
    assert!(camera.forward().distance(expected) < 1e-6);
}

// ============================================================================
// Rotate
// ============================================================================

#[test]
fn test_undamped_rotate_preserves_distance() {
    let target = Vec3::new(0.0, 1.0, 0.0);
    let mut camera = camera_at(Vec3::new(0.0, 2.0, 4.0), target);
    let mut controls = undamped(target);
    let distance = camera.position.distance(target);

    controls.rotate(120.0, 40.0, 720.0);
    assert!(controls.update(&mut camera));

    assert!((camera.position.distance(target) - distance).abs() < 1e-4);
    assert!(!controls.has_pending_motion());
}

#[test]
fn test_damped_rotate_eases_to_full_angle() {
    let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
    let mut controls = OrbitControls::new(Vec3::ZERO);

    // 100 px of a 1000 px viewport is a tenth of a full turn
    controls.rotate(100.0, 0.0, 1000.0);
    controls.update(&mut camera);
    let first_step = camera.position;

    // Only the damping fraction is applied on the first update
    let angle = -0.1 * std::f32::consts::TAU;
    let partial = first_step.x.atan2(first_step.z);
    assert!((partial - angle * 0.05).abs() < 1e-4);

    let mut updates = 1;
    while controls.has_pending_motion() {
        controls.update(&mut camera);
        updates += 1;
        assert!(updates < 2000, "damping never settled");
    }

    let final_angle = camera.position.x.atan2(camera.position.z);
    assert!((final_angle - angle).abs() < 1e-3);
    assert!((camera.position.length() - 5.0).abs() < 1e-3);
}

#[test]
fn test_damping_keeps_moving_after_gesture() {
    let mut camera = camera_at(Vec3::new(0.0, 1.0, 5.0), Vec3::ZERO);
    let mut controls = OrbitControls::new(Vec3::ZERO);
    controls.rotate(200.0, 0.0, 720.0);

    let mut previous = camera.position;
    for _ in 0..10 {
        assert!(controls.update(&mut camera));
        assert_ne!(camera.position, previous);
        previous = camera.position;
    }
}

#[test]
fn test_polar_angle_is_clamped() {
    let mut camera = camera_at(Vec3::new(0.0, 1.0, 5.0), Vec3::ZERO);
    let mut controls = undamped(Vec3::ZERO);

    // Drag far enough to flip over the pole
    controls.rotate(0.0, 5000.0, 720.0);
    controls.update(&mut camera);

    assert!(camera.position.is_finite());
    assert!(camera.position.y > 0.0);
    assert!((camera.position.length() - 26f32.sqrt()).abs() < 1e-3);
}

#[test]
fn test_stop_discards_pending_motion() {
    let mut camera = camera_at(Vec3::new(0.0, 1.0, 5.0), Vec3::ZERO);
    let position = camera.position;
    let mut controls = OrbitControls::new(Vec3::ZERO);

    controls.rotate(50.0, 50.0, 720.0);
    controls.zoom(3.0);
    controls.stop();

    assert!(!controls.has_pending_motion());
    controls.update(&mut camera);
    assert_eq!(camera.position, position);
}

// ============================================================================
// Zoom
// ============================================================================

#[test]
fn test_zoom_in_shrinks_radius() {
    let mut camera = camera_at(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO);
    let mut controls = undamped(Vec3::ZERO);

    controls.zoom(1.0);
    controls.update(&mut camera);

    assert!((camera.position.length() - 4.0 * 0.95).abs() < 1e-5);
}

#[test]
fn test_zoom_out_grows_radius() {
    let mut camera = camera_at(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO);
    let mut controls = undamped(Vec3::ZERO);

    controls.zoom(-2.0);
    controls.update(&mut camera);

    assert!(camera.position.length() > 4.0);
}

#[test]
fn test_zoom_respects_distance_limits() {
    let mut camera = camera_at(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO);
    let mut controls = undamped(Vec3::ZERO);
    controls.min_distance = 3.0;
    controls.max_distance = 6.0;

    controls.zoom(100.0);
    controls.update(&mut camera);
    assert!((camera.position.length() - 3.0).abs() < 1e-5);

    controls.zoom(-100.0);
    controls.update(&mut camera);
    assert!((camera.position.length() - 6.0).abs() < 1e-4);
}

// ============================================================================
// Pan
// ============================================================================

#[test]
fn test_pan_moves_camera_and_target_together() {
    let target = Vec3::new(0.0, 1.0, 0.0);
    let mut camera = camera_at(Vec3::new(0.0, 1.0, 4.0), target);
    let mut controls = undamped(target);
    let offset = camera.position - target;

    controls.pan(100.0, 0.0, &camera, 720.0);
    controls.update(&mut camera);

    assert_ne!(controls.target, target);
    assert!((controls.target.y - target.y).abs() < 1e-5, "horizontal drag stays level");
    // Dragging right moves the scene right, so the camera slides left
    assert!(controls.target.x < 0.0);
    assert!((camera.position - controls.target).distance(offset) < 1e-4);
}

#[test]
fn test_pan_ignores_empty_viewport() {
    let camera = camera_at(Vec3::new(0.0, 1.0, 4.0), Vec3::ZERO);
    let mut controls = OrbitControls::new(Vec3::ZERO);
    controls.pan(10.0, 10.0, &camera, 0.0);
    controls.rotate(10.0, 10.0, 0.0);
    assert!(!controls.has_pending_motion());
}
