//! End-to-end manipulation sessions driven through interactable dispatch

use std::sync::Arc;

use glam::{Quat, Vec2, Vec3};
use ix_core::{
    Interactable, InteractableConfig, InteractionKind, Interactor, InteractorInputType,
    InteractorPool, SceneObject, SharedInteractorSource, TargetingMode, Transform,
    dispatch_bubbling,
};
use ix_manipulation::{
    InteractableManipulation, ManipulationConfig, ManipulationState, RotationAxis, ScaleLimit,
    SharedManipulation,
};
use parking_lot::Mutex;

const DT: f32 = 1.0 / 60.0;
const LEFT: InteractorInputType = InteractorInputType::LEFT_HAND;
const RIGHT: InteractorInputType = InteractorInputType::RIGHT_HAND;

struct Rig {
    object: SceneObject,
    pool: Arc<Mutex<InteractorPool>>,
    manipulation: SharedManipulation,
}

impl Rig {
    fn new(transform: Transform, config: ManipulationConfig) -> Self {
        let mut object = SceneObject::new("cube", transform.into_shared()).with_interactable(
            Interactable::new(
                "cube",
                InteractableConfig {
                    targeting_mode: TargetingMode::ALL,
                    ..Default::default()
                },
            ),
        );
        let pool = Arc::new(Mutex::new(InteractorPool::new()));
        let source: SharedInteractorSource = pool.clone();
        let manipulation = InteractableManipulation::attach(&mut object, source, config).unwrap();
        Self {
            object,
            pool,
            manipulation,
        }
    }

    fn at(position: Vec3) -> Self {
        Self::new(Transform::from_position(position), unfiltered())
    }

    fn set(&self, interactor: Interactor) {
        self.pool.lock().set(interactor).unwrap();
    }

    fn send(&mut self, kind: InteractionKind, input_type: InteractorInputType) -> usize {
        let interactor = self
            .pool
            .lock()
            .get(input_type)
            .cloned()
            .unwrap_or_else(|| Interactor::new(input_type));
        let interactable = self.object.interactable.as_mut().unwrap();
        dispatch_bubbling(&mut [interactable], kind, &interactor)
    }

    fn tick(&mut self) {
        self.manipulation.lock().tick(DT);
        self.object.tick();
    }

    /// One frame: advance the clock and send updates for `inputs`
    fn frame(&mut self, inputs: &[InteractorInputType]) {
        self.tick();
        for input in inputs {
            self.send(InteractionKind::TriggerUpdate, *input);
        }
    }

    fn grab(&mut self, input_type: InteractorInputType) {
        self.send(InteractionKind::TriggerStart, input_type);
    }

    fn position(&self) -> Vec3 {
        self.object.transform.lock().world_position()
    }

    fn rotation(&self) -> Quat {
        self.object.transform.lock().world_rotation()
    }

    fn scale(&self) -> Vec3 {
        self.object.transform.lock().local_scale()
    }

    fn state(&self) -> ManipulationState {
        self.manipulation.lock().state()
    }
}

fn unfiltered() -> ManipulationConfig {
    ManipulationConfig {
        use_filter: false,
        ..Default::default()
    }
}

fn hand(input_type: InteractorInputType, point: Vec3) -> Interactor {
    Interactor::direct(input_type, point, Quat::IDENTITY)
}

fn record_lifecycle(rig: &Rig) -> Arc<Mutex<Vec<(&'static str, ManipulationState)>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut m = rig.manipulation.lock();

    let l = log.clone();
    m.on_manipulation_start
        .subscribe(move |e| l.lock().push(("start", e.state)));
    let l = log.clone();
    m.on_manipulation_end
        .subscribe(move |e| l.lock().push(("end", e.state)));
    let l = log.clone();
    m.on_scale_start
        .subscribe(move |e| l.lock().push(("scale start", e.state)));
    let l = log.clone();
    m.on_scale_end
        .subscribe(move |e| l.lock().push(("scale end", e.state)));
    log
}

#[test]
fn direct_grab_does_not_pop_and_follows() {
    let mut rig = Rig::at(Vec3::new(0.0, 0.0, 10.0));
    rig.set(hand(RIGHT, Vec3::new(0.0, 0.0, 10.0)));

    rig.tick();
    rig.grab(RIGHT);
    rig.send(InteractionKind::TriggerUpdate, RIGHT);
    assert_eq!(rig.state(), ManipulationState::Single);
    assert!(rig.position().abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-5));

    rig.set(hand(RIGHT, Vec3::new(1.0, 2.0, 10.0)));
    rig.frame(&[RIGHT]);
    assert!(
        rig.position().abs_diff_eq(Vec3::new(1.0, 2.0, 10.0), 1e-5),
        "object should follow the hand 1:1, got {}",
        rig.position()
    );
}

#[test]
fn direct_grab_rotates_around_hand() {
    let mut rig = Rig::at(Vec3::ZERO);
    rig.set(hand(RIGHT, Vec3::new(0.0, 0.0, 5.0)));
    rig.tick();
    rig.grab(RIGHT);

    let turn = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    rig.set(Interactor::direct(RIGHT, Vec3::new(0.0, 0.0, 5.0), turn));
    rig.frame(&[RIGHT]);

    assert!(rig.rotation().abs_diff_eq(turn, 1e-5));
    assert!(
        rig.position().abs_diff_eq(Vec3::new(-5.0, 0.0, 5.0), 1e-4),
        "grab offset should swing with the hand, got {}",
        rig.position()
    );
}

#[test]
fn filtered_motion_lags_behind_hand() {
    let mut rig = Rig::new(Transform::from_position(Vec3::ZERO), ManipulationConfig::default());
    rig.set(hand(RIGHT, Vec3::ZERO));
    rig.tick();
    rig.grab(RIGHT);
    rig.send(InteractionKind::TriggerUpdate, RIGHT);
    assert!(rig.position().abs_diff_eq(Vec3::ZERO, 1e-6), "no pop on grab");

    rig.set(hand(RIGHT, Vec3::new(10.0, 0.0, 0.0)));
    rig.frame(&[RIGHT]);
    let x = rig.position().x;
    assert!(x > 0.0 && x < 10.0, "filtered x should lag, got {}", x);

    for _ in 0..300 {
        rig.frame(&[RIGHT]);
    }
    assert!((rig.position().x - 10.0).abs() < 1e-2);
}

#[test]
fn translation_axis_lock_keeps_coordinate() {
    let config = ManipulationConfig {
        enable_y_translation: false,
        ..unfiltered()
    };
    let mut rig = Rig::new(Transform::from_position(Vec3::new(0.0, 0.0, 10.0)), config);
    rig.set(hand(RIGHT, Vec3::new(0.0, 0.0, 10.0)));
    rig.tick();
    rig.grab(RIGHT);

    rig.set(hand(RIGHT, Vec3::new(1.0, 2.0, 13.0)));
    rig.frame(&[RIGHT]);
    assert!(rig.position().abs_diff_eq(Vec3::new(1.0, 0.0, 13.0), 1e-5));
}

#[test]
fn rotation_axis_constraint_keeps_twist_only() {
    let config = ManipulationConfig {
        rotation_axis: RotationAxis::Y,
        ..unfiltered()
    };
    let mut rig = Rig::new(Transform::default(), config);
    rig.set(hand(RIGHT, Vec3::ZERO));
    rig.tick();
    rig.grab(RIGHT);

    let turn = Quat::from_rotation_y(0.3) * Quat::from_rotation_x(0.5);
    rig.set(Interactor::direct(RIGHT, Vec3::ZERO, turn));
    rig.frame(&[RIGHT]);
    assert!(rig.rotation().abs_diff_eq(Quat::from_rotation_y(0.3), 1e-5));
}

#[test]
fn disabled_rotation_only_translates() {
    let config = ManipulationConfig {
        enable_rotation: false,
        ..unfiltered()
    };
    let mut rig = Rig::new(Transform::default(), config);
    let log = Arc::new(Mutex::new(0));
    let l = log.clone();
    rig.manipulation
        .lock()
        .on_rotation_start
        .subscribe(move |_| *l.lock() += 1);

    rig.set(hand(RIGHT, Vec3::new(0.0, 0.0, 5.0)));
    rig.tick();
    rig.grab(RIGHT);
    rig.set(Interactor::direct(
        RIGHT,
        Vec3::new(1.0, 0.0, 5.0),
        Quat::from_rotation_y(1.0),
    ));
    rig.frame(&[RIGHT]);

    assert!(rig.rotation().abs_diff_eq(Quat::IDENTITY, 1e-6));
    assert!(rig.position().abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-5));
    assert_eq!(*log.lock(), 0);
}

#[test]
fn second_hand_ends_single_then_starts_dual() {
    let mut rig = Rig::at(Vec3::ZERO);
    let log = record_lifecycle(&rig);
    rig.set(hand(LEFT, Vec3::new(-5.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(5.0, 0.0, 0.0)));

    rig.tick();
    rig.grab(LEFT);
    assert_eq!(*log.lock(), vec![("start", ManipulationState::Single)]);

    rig.grab(RIGHT);
    assert_eq!(rig.state(), ManipulationState::Dual);
    assert_eq!(
        *log.lock(),
        vec![
            ("start", ManipulationState::Single),
            ("end", ManipulationState::Single),
            ("start", ManipulationState::Dual),
            ("scale start", ManipulationState::Dual),
        ]
    );

    rig.send(InteractionKind::TriggerEnd, RIGHT);
    assert_eq!(rig.state(), ManipulationState::Single);
    assert_eq!(
        log.lock()[4..],
        [
            ("scale end", ManipulationState::Dual),
            ("end", ManipulationState::Dual),
            ("start", ManipulationState::Single),
        ]
    );
}

#[test]
fn dual_distance_doubles_scale() {
    let mut rig = Rig::at(Vec3::ZERO);
    rig.set(hand(LEFT, Vec3::new(-5.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(5.0, 0.0, 0.0)));
    rig.tick();
    rig.grab(LEFT);
    rig.grab(RIGHT);

    rig.frame(&[LEFT, RIGHT]);
    assert!(rig.scale().abs_diff_eq(Vec3::ONE, 1e-5), "no pop on dual grab");
    assert!(rig.position().abs_diff_eq(Vec3::ZERO, 1e-5));

    rig.set(hand(LEFT, Vec3::new(-10.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(10.0, 0.0, 0.0)));
    rig.frame(&[LEFT, RIGHT]);
    assert!(
        rig.scale().abs_diff_eq(Vec3::splat(2.0), 1e-5),
        "scale should double, got {}",
        rig.scale()
    );
    assert!(rig.position().abs_diff_eq(Vec3::ZERO, 1e-5));
    assert!(rig.rotation().abs_diff_eq(Quat::IDENTITY, 1e-5));
}

#[test]
fn dual_scale_clamps_to_maximum() {
    let config = ManipulationConfig {
        maximum_scale_factor: 1.5,
        ..unfiltered()
    };
    let mut rig = Rig::new(Transform::default().with_scale(Vec3::new(1.0, 2.0, 1.0)), config);
    let limits = Arc::new(Mutex::new(Vec::new()));
    let l = limits.clone();
    rig.manipulation
        .lock()
        .on_scale_limit_reached
        .subscribe(move |e| l.lock().push(e.limit));

    rig.set(hand(LEFT, Vec3::new(-5.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(5.0, 0.0, 0.0)));
    rig.tick();
    rig.grab(LEFT);
    rig.grab(RIGHT);

    rig.set(hand(LEFT, Vec3::new(-10.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(10.0, 0.0, 0.0)));
    rig.frame(&[LEFT, RIGHT]);

    assert!(
        rig.scale().abs_diff_eq(Vec3::new(1.5, 3.0, 1.5), 1e-4),
        "clamped scale should keep proportions, got {}",
        rig.scale()
    );
    assert_eq!(*limits.lock(), vec![ScaleLimit::Maximum]);
}

#[test]
fn dual_scale_stays_in_bounds_when_hands_converge() {
    let mut rig = Rig::at(Vec3::ZERO);
    let limits = Arc::new(Mutex::new(Vec::new()));
    let l = limits.clone();
    rig.manipulation
        .lock()
        .on_scale_limit_reached
        .subscribe(move |e| l.lock().push(e.limit));

    rig.set(hand(LEFT, Vec3::new(-5.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(5.0, 0.0, 0.0)));
    rig.tick();
    rig.grab(LEFT);
    rig.grab(RIGHT);

    rig.set(hand(LEFT, Vec3::new(-0.005, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(0.005, 0.0, 0.0)));
    rig.frame(&[LEFT, RIGHT]);

    assert!(rig.scale().abs_diff_eq(Vec3::splat(0.25), 1e-5));
    assert_eq!(*limits.lock(), vec![ScaleLimit::Minimum]);
}

#[test]
fn coincident_hands_hold_scale_until_separated() {
    let mut rig = Rig::at(Vec3::ZERO);
    rig.set(hand(LEFT, Vec3::new(1.0, 1.0, 1.0)));
    rig.set(hand(RIGHT, Vec3::new(1.0, 1.0, 1.0)));
    rig.tick();
    rig.grab(LEFT);
    rig.grab(RIGHT);

    rig.frame(&[LEFT, RIGHT]);
    assert!(rig.scale().abs_diff_eq(Vec3::ONE, 1e-6));
    assert!(rig.position().abs_diff_eq(Vec3::ZERO, 1e-6));

    // The session anchors once the hands separate, without a jump
    rig.set(hand(LEFT, Vec3::new(-1.0, 1.0, 1.0)));
    rig.set(hand(RIGHT, Vec3::new(3.0, 1.0, 1.0)));
    rig.frame(&[LEFT, RIGHT]);
    assert!(rig.scale().abs_diff_eq(Vec3::ONE, 1e-5));
    assert!(rig.position().abs_diff_eq(Vec3::ZERO, 1e-5));

    rig.set(hand(LEFT, Vec3::new(-3.0, 1.0, 1.0)));
    rig.set(hand(RIGHT, Vec3::new(5.0, 1.0, 1.0)));
    rig.frame(&[LEFT, RIGHT]);
    assert!(rig.scale().abs_diff_eq(Vec3::splat(2.0), 1e-4));
}

#[test]
fn dual_rotation_follows_hand_axis() {
    let mut rig = Rig::new(Transform::default(), ManipulationConfig {
        enable_scale: false,
        ..unfiltered()
    });
    rig.set(hand(LEFT, Vec3::new(-5.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(5.0, 0.0, 0.0)));
    rig.tick();
    rig.grab(LEFT);
    rig.grab(RIGHT);

    // Quarter turn about Y: the hand axis goes from +X to -Z
    rig.set(hand(LEFT, Vec3::new(0.0, 0.0, 5.0)));
    rig.set(hand(RIGHT, Vec3::new(0.0, 0.0, -5.0)));
    rig.frame(&[LEFT, RIGHT]);

    let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    assert!(
        rig.rotation().abs_diff_eq(expected, 1e-4)
            || rig.rotation().abs_diff_eq(-expected, 1e-4),
        "got {:?}",
        rig.rotation()
    );
    assert!(rig.scale().abs_diff_eq(Vec3::ONE, 1e-6));
}

#[test]
fn dual_rotation_stays_continuous_across_vertical() {
    let mut rig = Rig::new(Transform::default(), ManipulationConfig {
        enable_scale: false,
        ..unfiltered()
    });
    let place = |rig: &Rig, angle: f32| {
        let axis = Quat::from_rotation_z(angle) * Vec3::X;
        rig.set(hand(LEFT, -axis * 5.0));
        rig.set(hand(RIGHT, axis * 5.0));
    };
    place(&rig, 0.0);
    rig.tick();
    rig.grab(LEFT);
    rig.grab(RIGHT);

    // Sweep the hand axis from +X over +Y to -X; an odd step count never
    // lands exactly on the vertical
    let steps = 25;
    let mut previous = rig.rotation();
    for i in 1..=steps {
        place(&rig, std::f32::consts::PI * i as f32 / steps as f32);
        rig.frame(&[LEFT, RIGHT]);
        let rotation = rig.rotation();
        assert!(
            rotation.angle_between(previous) < 0.2,
            "rotation jumped at step {}: {:?} -> {:?}",
            i,
            previous,
            rotation
        );
        previous = rotation;
    }

    let expected = Quat::from_rotation_z(std::f32::consts::PI);
    assert!(
        previous.abs_diff_eq(expected, 1e-3) || previous.abs_diff_eq(-expected, 1e-3),
        "got {:?}",
        previous
    );
}

#[test]
fn dual_rotation_constrained_to_y_keeps_twist() {
    let mut rig = Rig::new(Transform::default(), ManipulationConfig {
        enable_scale: false,
        rotation_axis: RotationAxis::Y,
        ..unfiltered()
    });
    rig.set(hand(LEFT, Vec3::new(-5.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(5.0, 0.0, 0.0)));
    rig.tick();
    rig.grab(LEFT);
    rig.grab(RIGHT);

    // The vertical tilt of the hand axis is discarded
    rig.set(hand(LEFT, Vec3::new(0.0, -3.0, 5.0)));
    rig.set(hand(RIGHT, Vec3::new(0.0, 3.0, -5.0)));
    rig.frame(&[LEFT, RIGHT]);

    let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    assert!(
        rig.rotation().abs_diff_eq(expected, 1e-4)
            || rig.rotation().abs_diff_eq(-expected, 1e-4),
        "got {:?}",
        rig.rotation()
    );
    assert!(rig.position().abs_diff_eq(Vec3::ZERO, 1e-4));
}

#[test]
fn dual_scale_reaches_minimum_for_small_objects() {
    let mut rig = Rig::new(
        Transform::default().with_scale(Vec3::splat(0.001)),
        unfiltered(),
    );
    let limits = Arc::new(Mutex::new(Vec::new()));
    let l = limits.clone();
    rig.manipulation
        .lock()
        .on_scale_limit_reached
        .subscribe(move |e| l.lock().push(e.limit));

    rig.set(hand(LEFT, Vec3::new(-5.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(5.0, 0.0, 0.0)));
    rig.tick();
    rig.grab(LEFT);
    rig.grab(RIGHT);

    // 10 cm down to 0.04 cm requests 4e-6, well under a quarter of 0.001
    rig.set(hand(LEFT, Vec3::new(-0.02, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(0.02, 0.0, 0.0)));
    rig.frame(&[LEFT, RIGHT]);

    assert!(
        rig.scale().abs_diff_eq(Vec3::splat(0.00025), 1e-8),
        "got {}",
        rig.scale()
    );
    assert_eq!(*limits.lock(), vec![ScaleLimit::Minimum]);
}

#[test]
fn cancel_ends_session() {
    let mut rig = Rig::at(Vec3::ZERO);
    let log = record_lifecycle(&rig);
    rig.set(hand(LEFT, Vec3::new(-5.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(5.0, 0.0, 0.0)));
    rig.tick();
    rig.grab(LEFT);
    rig.grab(RIGHT);
    log.lock().clear();

    rig.send(InteractionKind::TriggerCanceled, LEFT);
    assert_eq!(rig.state(), ManipulationState::Idle);
    assert!(
        rig.object
            .interactable
            .as_ref()
            .unwrap()
            .triggering_interactor()
            .is_empty()
    );
    assert_eq!(
        *log.lock(),
        vec![
            ("scale end", ManipulationState::Dual),
            ("end", ManipulationState::Dual),
        ]
    );

    // Late updates after the cancel are ignored
    rig.set(hand(RIGHT, Vec3::new(50.0, 0.0, 0.0)));
    rig.frame(&[RIGHT]);
    assert!(rig.position().abs_diff_eq(Vec3::ZERO, 1e-6));
}

#[test]
fn untracked_interactor_holds_transform_until_valid() {
    let mut rig = Rig::at(Vec3::new(0.0, 0.0, 10.0));
    let mut lost = Interactor::new(RIGHT);
    lost.active_targeting_mode = TargetingMode::DIRECT;
    lost.start_point = Some(Vec3::new(0.0, 0.0, 10.0));
    rig.set(lost);

    rig.tick();
    rig.grab(RIGHT);
    rig.frame(&[RIGHT]);
    assert!(rig.position().abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-6));

    rig.set(hand(RIGHT, Vec3::new(3.0, 0.0, 10.0)));
    rig.frame(&[RIGHT]);
    assert!(
        rig.position().abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-5),
        "first valid frame anchors the session"
    );

    rig.set(hand(RIGHT, Vec3::new(4.0, 0.0, 10.0)));
    rig.frame(&[RIGHT]);
    assert!(rig.position().abs_diff_eq(Vec3::new(1.0, 0.0, 10.0), 1e-5));
}

#[test]
fn three_interactors_are_unsupported() {
    let mut rig = Rig::at(Vec3::ZERO);
    let log = record_lifecycle(&rig);
    let mouse = InteractorInputType::MOUSE;
    rig.set(hand(LEFT, Vec3::new(-5.0, 0.0, 0.0)));
    rig.set(hand(RIGHT, Vec3::new(5.0, 0.0, 0.0)));
    rig.set(hand(mouse, Vec3::new(0.0, 5.0, 0.0)));
    rig.tick();
    rig.grab(LEFT);
    rig.grab(RIGHT);
    rig.grab(mouse);
    assert_eq!(rig.state(), ManipulationState::Unsupported);

    rig.set(hand(LEFT, Vec3::new(-20.0, 0.0, 0.0)));
    rig.frame(&[LEFT, RIGHT, mouse]);
    assert!(rig.position().abs_diff_eq(Vec3::ZERO, 1e-6));
    assert!(rig.scale().abs_diff_eq(Vec3::ONE, 1e-6));

    rig.send(InteractionKind::TriggerEnd, mouse);
    assert_eq!(rig.state(), ManipulationState::Dual);
    let log = log.lock();
    assert_eq!(log.last(), Some(&("scale start", ManipulationState::Dual)));
    assert_eq!(
        log.iter()
            .filter(|(name, _)| *name == "end")
            .count(),
        2
    );
}

#[test]
fn indirect_grab_follows_ray() {
    let config = ManipulationConfig {
        enable_stretch_z: false,
        ..unfiltered()
    };
    let mut rig = Rig::new(Transform::from_position(Vec3::new(0.0, 0.0, -50.0)), config);
    rig.set(Interactor::indirect(RIGHT, Vec3::ZERO, Vec3::NEG_Z, 50.0));
    rig.tick();
    rig.grab(RIGHT);
    rig.send(InteractionKind::TriggerUpdate, RIGHT);
    assert!(rig.position().abs_diff_eq(Vec3::new(0.0, 0.0, -50.0), 1e-4));

    rig.set(Interactor::indirect(RIGHT, Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z, 50.0));
    rig.frame(&[RIGHT]);
    assert!(rig.position().abs_diff_eq(Vec3::new(5.0, 0.0, -50.0), 1e-4));

    // Sweeping the ray carries the object at its grab distance
    rig.set(Interactor::indirect(RIGHT, Vec3::new(5.0, 0.0, 0.0), Vec3::X, 50.0));
    rig.frame(&[RIGHT]);
    assert!(rig.position().abs_diff_eq(Vec3::new(55.0, 0.0, 0.0), 1e-3));
    assert!(rig.rotation().abs_diff_eq(Quat::IDENTITY, 1e-6));
}

#[test]
fn indirect_stretch_amplifies_depth_motion() {
    let mut rig = Rig::at(Vec3::new(0.0, 0.0, -50.0));
    rig.set(Interactor::indirect(RIGHT, Vec3::ZERO, Vec3::NEG_Z, 50.0));
    rig.tick();
    rig.grab(RIGHT);

    rig.set(Interactor::indirect(RIGHT, Vec3::new(0.0, 0.0, -10.0), Vec3::NEG_Z, 50.0));
    rig.frame(&[RIGHT]);
    let first = rig.position().z;
    assert!(first < -60.0, "hand motion alone moves to -60, got {}", first);

    for _ in 0..120 {
        rig.frame(&[RIGHT]);
    }
    let settled = rig.position().z;
    assert!(settled < first, "stretch should keep easing outward");
    assert!(settled > -90.0 && settled < -70.0, "got {}", settled);
}

#[test]
fn mobile_drag_pushes_along_ray_within_range() {
    let config = ManipulationConfig {
        enable_stretch_z: false,
        ..unfiltered()
    };
    let mobile = InteractorInputType::MOBILE;
    let mut rig = Rig::new(Transform::from_position(Vec3::new(0.0, 0.0, -50.0)), config);
    rig.set(Interactor::indirect(mobile, Vec3::ZERO, Vec3::NEG_Z, 50.0));
    rig.tick();
    rig.grab(mobile);

    let mut dragging = Interactor::indirect(mobile, Vec3::ZERO, Vec3::NEG_Z, 50.0);
    dragging.touchpad_drag = Some(Vec2::new(0.0, 10.0));
    rig.set(dragging.clone());
    rig.frame(&[mobile]);
    rig.frame(&[mobile]);
    assert!(rig.position().abs_diff_eq(Vec3::new(0.0, 0.0, -60.0), 1e-4));

    dragging.touchpad_drag = Some(Vec2::new(0.0, 10_000.0));
    rig.set(dragging.clone());
    rig.frame(&[mobile]);
    let max = dragging.max_raycast_distance;
    assert!(rig.position().abs_diff_eq(Vec3::new(0.0, 0.0, -max), 1e-3));

    dragging.touchpad_drag = Some(Vec2::new(0.0, -10_000.0));
    rig.set(dragging);
    rig.frame(&[mobile]);
    assert!(rig.position().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-3));
}

#[test]
fn manipulation_stops_bubbling() {
    let mut rig = Rig::at(Vec3::ZERO);
    let mut parent = Interactable::new("table", InteractableConfig::default());
    rig.set(hand(RIGHT, Vec3::ZERO));

    let interactor = rig.pool.lock().get(RIGHT).cloned().unwrap();
    let child = rig.object.interactable.as_mut().unwrap();
    let delivered = dispatch_bubbling(
        &mut [child, &mut parent],
        InteractionKind::TriggerStart,
        &interactor,
    );

    assert_eq!(delivered, 1);
    assert!(parent.triggering_interactor().is_empty());
    assert_eq!(rig.state(), ManipulationState::Single);
}

#[test]
fn disabling_ends_session_and_ignores_input() {
    let mut rig = Rig::at(Vec3::ZERO);
    let log = record_lifecycle(&rig);
    rig.set(hand(RIGHT, Vec3::ZERO));
    rig.tick();
    rig.grab(RIGHT);

    rig.manipulation.lock().set_enabled(false);
    assert_eq!(rig.state(), ManipulationState::Idle);
    assert_eq!(log.lock().last(), Some(&("end", ManipulationState::Single)));

    rig.set(hand(RIGHT, Vec3::new(5.0, 0.0, 0.0)));
    rig.frame(&[RIGHT]);
    assert!(rig.position().abs_diff_eq(Vec3::ZERO, 1e-6));
}

#[test]
fn reset_restores_original_transform() {
    let mut rig = Rig::new(
        Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).with_scale(Vec3::splat(2.0)),
        unfiltered(),
    );
    rig.set(hand(RIGHT, Vec3::ZERO));
    rig.tick();
    rig.grab(RIGHT);
    rig.set(Interactor::direct(
        RIGHT,
        Vec3::new(4.0, 0.0, 0.0),
        Quat::from_rotation_z(0.4),
    ));
    rig.frame(&[RIGHT]);
    rig.send(InteractionKind::TriggerEnd, RIGHT);
    assert!(!rig.position().abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-3));

    rig.manipulation.lock().reset_to_original();
    assert!(rig.position().abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
    assert!(rig.rotation().abs_diff_eq(Quat::IDENTITY, 1e-6));
    assert_eq!(rig.scale(), Vec3::splat(2.0));
}
