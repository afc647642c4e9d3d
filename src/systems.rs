use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::cascade::CascadeStep;
use crate::components::{CascadeClock, ChainBanner, Input};
use crate::session::{Intent, Phase, Session};

// Intents in the order they are applied within one frame
fn intents_from(input: &Input) -> Vec<Intent> {
    let mut intents = Vec::new();
    if let Some(held) = input.soft_drop {
        intents.push(Intent::SoftDrop(held));
    }
    if input.left {
        intents.push(Intent::MoveLeft);
    }
    if input.right {
        intents.push(Intent::MoveRight);
    }
    if input.rotate_ccw {
        intents.push(Intent::RotateCcw);
    }
    if input.rotate_cw {
        intents.push(Intent::RotateCw);
    }
    if input.hard_drop {
        intents.push(Intent::HardDrop);
    }
    intents
}

pub fn input_system(world: &mut World) {
    // Drain the input so each key press is applied exactly once
    let input = match world.get_resource_mut::<Input>() {
        Some(mut input) => std::mem::take(&mut *input),
        None => return,
    };
    if input.is_idle() {
        return;
    }

    {
        let Some(mut session) = world.get_resource_mut::<Session>() else {
            return;
        };
        for intent in intents_from(&input) {
            let applied = session.apply(intent);
            trace!("{intent:?} applied: {applied}");
        }
    }

    sync_chain_banner(world);
}

pub fn game_tick_system(world: &mut World, delta_seconds: f32) {
    trace!("Game tick with delta: {delta_seconds}");

    let Some(phase) = world.get_resource::<Session>().map(Session::phase) else {
        return;
    };

    match phase {
        Phase::GameOver => return,
        Phase::Cascading => run_cascade_steps(world, delta_seconds),
        _ => {
            let mut session = world.resource_mut::<Session>();
            session.apply(Intent::Tick(f64::from(delta_seconds)));
        }
    }

    sync_chain_banner(world);
}

// Steps a paced cascade as many times as the elapsed time allows
fn run_cascade_steps(world: &mut World, delta_seconds: f32) {
    world.resource_scope(|world, mut session: Mut<Session>| {
        let mut steps = Vec::new();
        {
            let mut clock = world.get_resource_or_insert_with(CascadeClock::default);
            let step_seconds = clock.step_seconds;
            clock.timer += delta_seconds;
            while clock.timer >= step_seconds {
                clock.timer -= step_seconds;
                let step = session.cascade_step();
                steps.push(step);
                if matches!(step, CascadeStep::Settled(_) | CascadeStep::Idle) {
                    clock.timer = 0.0;
                    break;
                }
            }
        }

        for step in steps {
            if let CascadeStep::Cleared { chain, pass } = step {
                debug!("Cascade wave {chain} cleared {} cells", pass.cells);
                if let Some(mut banner) = world.get_resource_mut::<ChainBanner>() {
                    banner.show(chain);
                }
            }
        }
    });
}

// Shows the banner once per lock after its cascade has settled
fn sync_chain_banner(world: &mut World) {
    let Some((locks, last_chain, cascading)) = world
        .get_resource::<Session>()
        .map(|s| (s.locks(), s.state().last_chain, s.phase() == Phase::Cascading))
    else {
        return;
    };
    if cascading {
        return;
    }
    let Some(mut banner) = world.get_resource_mut::<ChainBanner>() else {
        return;
    };
    if banner.seen_lock == locks {
        return;
    }
    banner.seen_lock = locks;
    if last_chain > 1 {
        banner.show(last_chain);
    }
}
