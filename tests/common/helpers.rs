use skyward::components::{Axis, ControlInput};

use crate::common::TestApp;

pub fn full_throttle() -> ControlInput {
    ControlInput {
        throttle: Axis::Increase,
        ..Default::default()
    }
}

/// A repeatable sequence of stick and rudder movements for tick `i`.
pub fn scripted_input(i: usize) -> ControlInput {
    let cycle = |period: usize| match (i / period) % 3 {
        0 => Axis::Increase,
        1 => Axis::Neutral,
        _ => Axis::Decrease,
    };
    ControlInput {
        throttle: if i < 300 { Axis::Increase } else { cycle(200) },
        pitch: cycle(45),
        roll: cycle(70),
        flaps: cycle(150),
        rudder: cycle(35),
        brake: (i / 500) % 2 == 1,
    }
}

/// Runs fixed steps until `condition` holds, returning whether it did.
pub fn wait_for_condition<F>(test_app: &mut TestApp, condition: F, max_steps: usize) -> bool
where
    F: Fn(&mut TestApp) -> bool,
{
    for _ in 0..max_steps {
        if condition(test_app) {
            return true;
        }
        test_app.step();
    }
    condition(test_app)
}
