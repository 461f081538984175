use roversim::core::prelude::*;

const VIEWPORT_WIDTH: f64 = 800.0;
const VIEWPORT_HEIGHT: f64 = 600.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let mut sim = Simulation::new();
    // Map simulation metres to pixels, origin at the viewport centre.
    sim.apply_transform(
        scale(PIXELS_PER_SIMULATION_UNIT)
            .translated(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0),
    );
    info!(
        "simulation ready, {} shapes in scene",
        sim.shapes_in_world_coordinates().count()
    );

    // Scripted drive: straight ahead, a sweeping left turn, then coast to a
    // stop with the wheels recentred.
    sim.start_moving_forward(None)?;
    run_phase(&mut sim, "straight ahead", 1.0)?;

    sim.start_turning_counterclockwise(None)?;
    run_phase(&mut sim, "turning left", 1.5)?;

    sim.stop_turning();
    sim.set_steering_angle(0.0)?;
    run_phase(&mut sim, "straightened out", 1.0)?;

    sim.stop_moving();
    run_phase(&mut sim, "stopped", 0.5)?;
    Ok(())
}

fn run_phase(sim: &mut Simulation, label: &str, duration: f64) -> Result<()> {
    const TICK: f64 = 0.1;
    let ticks = (duration / TICK).round() as u32;
    for _ in 0..ticks {
        sim.move_forward_in_time(TICK)?;
    }
    let odometry = sim.odometry();
    info!(
        "{label}: position {}, heading {:.3} rad, steering {:.3} rad",
        odometry.translation,
        odometry.rotation,
        sim.steering_angle()
    );
    Ok(())
}
