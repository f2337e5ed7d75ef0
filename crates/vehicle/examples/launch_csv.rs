use simcore::VehicleConfig;
use std::fs::File;
use std::io::Write;
use vehicle::VehicleSimulator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = VehicleSimulator::new(VehicleConfig::default())?;

    // Sim settings
    let dt = 0.03;
    let t_launch = 15.0; // full throttle until here, then lift and coast
    let t_end = 25.0;

    let mut csv = File::create("launch.csv")?;
    writeln!(csv, "t,rpm,speed_kmh,gear,slip_rpm,lockup,torque_nm,accel_g,coolant_c,fuel_l,afr")?;

    while sim.elapsed() <= t_end {
        let throttle = if sim.elapsed() < t_launch { 1.0 } else { 0.0 };
        sim.set_inputs(throttle, 0.0);
        let s = sim.update(dt);

        writeln!(
            csv,
            "{:.3},{},{},{},{},{},{},{:.2},{:.1},{:.2},{:.1}",
            sim.elapsed(), s.rpm, s.speed_kmh, s.gear, s.slip_rpm, s.lockup as u8, s.torque_nm, s.accel_g, s.engine_temp, s.fuel_liters, s.afr
        )?;
    }

    let best = sim.snapshot().best_0to100;
    if best > 0.0 {
        println!("0-100 km/h: {:.2} s", best);
    }
    println!("Wrote launch.csv");
    Ok(())
}
