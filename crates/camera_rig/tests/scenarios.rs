use camera_rig::{
    Camera, ManualScheduler, OrbitController, PointerButton, PointerEvent, SharedCamera, Spherical,
};
use glam::Vec3;
use settings::CameraSettings;
use std::f32::consts::{PI, TAU};

const VIEWPORT: (u32, u32) = (1600, 1000);

fn mounted(position: Vec3) -> (OrbitController, SharedCamera, ManualScheduler) {
    let mut camera = Camera::new(position, Vec3::Y, 30.0, 1.6);
    camera.look_at(Vec3::ZERO);
    camera.update_world_matrix();
    let camera = camera.shared();
    let mut sched = ManualScheduler::new();
    let mut ctl = OrbitController::new(camera.clone(), Vec3::ZERO, &CameraSettings::default())
        .expect("controller");
    ctl.set_viewport(VIEWPORT.0, VIEWPORT.1);
    ctl.enable(&mut sched).expect("enable");
    (ctl, camera, sched)
}

fn drag(ctl: &mut OrbitController, button: PointerButton, from: (f32, f32), to: (f32, f32)) {
    ctl.handle_pointer(&PointerEvent::Down {
        x: from.0,
        y: from.1,
        button,
    });
    ctl.handle_pointer(&PointerEvent::Move { x: to.0, y: to.1 });
    ctl.handle_pointer(&PointerEvent::Up);
}

fn run_frames(ctl: &mut OrbitController, sched: &mut ManualScheduler, count: usize) {
    for _ in 0..count {
        let handle = sched.next_frame().expect("frame loop keeps one frame pending");
        assert!(ctl.on_frame(handle, sched));
    }
}

#[test]
fn horizontal_rotate_drag_converges_on_new_azimuth() {
    let (mut ctl, camera, mut sched) = mounted(Vec3::new(0.0, 0.0, 150.0));
    drag(&mut ctl, PointerButton::Primary, (500.0, 500.0), (600.0, 500.0));

    let expected = TAU * 100.0 / 1000.0;
    assert!((expected - 0.628).abs() < 1e-3);
    assert!((ctl.orbit().spherical_end().theta - expected).abs() < 1e-5);
    assert_eq!(ctl.orbit().target_end(), Vec3::ZERO);

    run_frames(&mut ctl, &mut sched, 300);

    let orbit = Spherical::from_vec3(camera.borrow().position);
    assert!((orbit.theta - expected).abs() < 1e-3, "theta {}", orbit.theta);
    assert!((orbit.radius - 150.0).abs() < 1e-2, "radius {}", orbit.radius);
    assert!((orbit.phi - PI / 2.0).abs() < 1e-4, "phi {}", orbit.phi);
    let forward = camera.borrow().forward();
    assert!((forward + camera.borrow().position.normalize()).length() < 1e-3);
}

#[test]
fn easing_continues_after_release() {
    let (mut ctl, camera, mut sched) = mounted(Vec3::new(0.0, 0.0, 150.0));
    drag(&mut ctl, PointerButton::Primary, (0.0, 0.0), (200.0, 0.0));
    run_frames(&mut ctl, &mut sched, 1);
    let early = Spherical::from_vec3(camera.borrow().position).theta;
    run_frames(&mut ctl, &mut sched, 30);
    let later = Spherical::from_vec3(camera.borrow().position).theta;
    assert!(early > 0.0);
    assert!(later > early);
    assert!(later < ctl.orbit().spherical_end().theta);
}

#[test]
fn pan_follows_camera_axes_not_world_axes() {
    let (mut front, front_camera, _sched) = mounted(Vec3::new(0.0, 50.0, 150.0));
    drag(&mut front, PointerButton::Secondary, (400.0, 400.0), (450.0, 400.0));
    let shift = front.orbit().target_end();
    let right = front_camera.borrow().right();
    assert!(shift.length() > 0.0);
    assert!((shift.normalize() + right).length() < 1e-4, "{shift:?} vs {right:?}");
    assert_eq!(front.orbit().spherical_end(), front.orbit().spherical_eased());

    // Swing the camera a quarter turn around the target, then pan the same way.
    let (mut side, side_camera, mut sched) = mounted(Vec3::new(0.0, 50.0, 150.0));
    drag(&mut side, PointerButton::Primary, (0.0, 0.0), (250.0, 0.0));
    run_frames(&mut side, &mut sched, 400);
    let turned = side.orbit().spherical_end();
    drag(&mut side, PointerButton::Secondary, (400.0, 400.0), (450.0, 400.0));
    assert_eq!(side.orbit().spherical_end(), turned);

    let side_shift = side.orbit().target_end();
    let side_right = side_camera.borrow().right();
    assert!((side_shift.normalize() + side_right).length() < 1e-3);
    // A quarter turn about +Y carries the world-X shift onto the Z axis.
    assert!(side_shift.x.abs() < 1e-2 * side_shift.length(), "{side_shift:?}");
    assert!(side_shift.z.abs() > 0.99 * side_shift.length(), "{side_shift:?}");
}

#[test]
fn vertical_pan_moves_along_camera_up() {
    let (mut ctl, camera, _sched) = mounted(Vec3::new(0.0, 50.0, 150.0));
    drag(&mut ctl, PointerButton::Secondary, (400.0, 400.0), (400.0, 300.0));
    let shift = ctl.orbit().target_end().normalize();
    let up = camera.borrow().up_axis();
    assert!((shift + up).length() < 1e-4, "{shift:?} vs {up:?}");
}

#[test]
fn pan_target_eases_and_radius_stays_fixed() {
    let (mut ctl, camera, mut sched) = mounted(Vec3::new(0.0, 0.0, 40.0));
    drag(&mut ctl, PointerButton::Secondary, (0.0, 0.0), (-120.0, 60.0));
    let goal = ctl.orbit().target_end();
    let mut previous = f32::INFINITY;
    for _ in 0..120 {
        run_frames(&mut ctl, &mut sched, 1);
        let gap = (ctl.orbit().target_eased() - goal).length();
        assert!(gap <= previous);
        previous = gap;
    }
    assert!(previous < 1e-3);
    let eye = camera.borrow().position;
    assert!(((eye - ctl.orbit().target_eased()).length() - 40.0).abs() < 1e-3);
}

#[test]
fn wild_rotate_input_keeps_polar_angle_off_the_poles() {
    let (mut ctl, camera, mut sched) = mounted(Vec3::new(0.0, 0.0, 150.0));
    let mut y = 500.0;
    for step in [10_000.0, -10_000.0, 25_000.0, -3.0, 7.5, -40_000.0, 40_000.0] {
        ctl.handle_pointer(&PointerEvent::Down {
            x: 0.0,
            y,
            button: PointerButton::Primary,
        });
        y += step;
        ctl.handle_pointer(&PointerEvent::Move { x: 0.0, y });
        ctl.handle_pointer(&PointerEvent::Up);
        let phi = ctl.orbit().spherical_end().phi;
        assert!(phi > 0.0 && phi < PI, "phi {phi}");
        run_frames(&mut ctl, &mut sched, 5);
        let eye = camera.borrow().position;
        assert!(eye.is_finite());
    }
}

#[test]
fn unknown_button_drag_changes_nothing() {
    let (mut ctl, _camera, _sched) = mounted(Vec3::new(0.0, 0.0, 150.0));
    let before = ctl.orbit().spherical_end();
    drag(&mut ctl, PointerButton::Middle, (0.0, 0.0), (300.0, 300.0));
    drag(&mut ctl, PointerButton::Other(7), (0.0, 0.0), (300.0, 300.0));
    assert_eq!(ctl.orbit().spherical_end(), before);
    assert_eq!(ctl.orbit().target_end(), Vec3::ZERO);
}
