use meadow_system_controller::{Animation, ControlInput, Controller, ControllerConfig};
use meadow_system_session::{Phase, Sound};

fn grounded() -> ControlInput {
    ControlInput {
        grounded: true,
        ..ControlInput::default()
    }
}

#[test]
fn running_right_sets_positive_velocity() {
    let controller = Controller::default();
    let output = controller
        .handle(
            Phase::Playing,
            ControlInput {
                right: true,
                ..grounded()
            },
        )
        .expect("playing phase produces output");

    assert_eq!(output.velocity_x, 160.0);
    assert_eq!(output.animation, Animation::Right);
    assert_eq!(output.velocity_y, None);
}

#[test]
fn jump_requires_ground_contact() {
    let controller = Controller::default();

    let airborne = controller
        .handle(
            Phase::Playing,
            ControlInput {
                up: true,
                ..ControlInput::default()
            },
        )
        .expect("playing phase produces output");
    assert_eq!(airborne.velocity_y, None);
    assert!(airborne.sounds.is_empty());

    let standing = controller
        .handle(
            Phase::Playing,
            ControlInput {
                jump: true,
                ..grounded()
            },
        )
        .expect("playing phase produces output");
    assert_eq!(standing.velocity_y, Some(-330.0));
    assert_eq!(standing.sounds, vec![Sound::Jump]);
}

#[test]
fn touches_above_the_line_jump() {
    let controller = Controller::default();

    let high = controller
        .handle(
            Phase::Playing,
            ControlInput {
                touch_y: Some(120.0),
                ..grounded()
            },
        )
        .expect("playing phase produces output");
    assert_eq!(high.velocity_y, Some(-330.0));

    let low = controller
        .handle(
            Phase::Playing,
            ControlInput {
                touch_y: Some(450.0),
                ..grounded()
            },
        )
        .expect("playing phase produces output");
    assert_eq!(low.velocity_y, None);
}

#[test]
fn pressing_both_jump_keys_plays_one_sound() {
    let controller = Controller::default();
    let output = controller
        .handle(
            Phase::Playing,
            ControlInput {
                up: true,
                jump: true,
                touch_y: Some(10.0),
                ..grounded()
            },
        )
        .expect("playing phase produces output");
    assert_eq!(output.sounds, vec![Sound::Jump]);
}

#[test]
fn controller_is_inert_outside_play() {
    let controller = Controller::default();
    let input = ControlInput {
        right: true,
        up: true,
        ..grounded()
    };
    assert!(controller.handle(Phase::Loading, input).is_none());
    assert!(controller.handle(Phase::GameOver, input).is_none());
}

#[test]
fn custom_tuning_is_respected() {
    let controller = Controller::new(ControllerConfig {
        run_speed: 90.0,
        jump_speed: 200.0,
        touch_jump_line: 100.0,
    });
    let output = controller
        .handle(
            Phase::Playing,
            ControlInput {
                left: true,
                up: true,
                ..grounded()
            },
        )
        .expect("playing phase produces output");
    assert_eq!(output.velocity_x, -90.0);
    assert_eq!(output.velocity_y, Some(-200.0));
    assert_eq!(controller.config().touch_jump_line, 100.0);
}
