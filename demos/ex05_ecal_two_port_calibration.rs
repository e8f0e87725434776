//! Two-port calibration with an electronic calibration module.

mod common;

use std::{thread, time::Duration};

use bird_vna::vna::EcalType;
use common::{connect, prompt, DemoResult};

const PORT_A: u32 = 1;
const PORT_B: u32 = 2;

fn main() -> DemoResult {
    let mut vna = connect()?;
    vna.system().preset()?;
    vna.set_channel(1)?;
    vna.set_trace(1)?;

    vna.sense().frequency().set_center(433e6)?;
    vna.sense().frequency().set_span(20e6)?;
    vna.sense().sweep().set_points(1001)?;

    prompt(&format!(
        "Connect ports {} and {} to the ECal module.",
        PORT_A, PORT_B
    ))?;
    vna.sense()
        .correction()
        .collection()
        .ecal(EcalType::TwoPort, &[PORT_A, PORT_B])?;

    // The module needs at least 5 s before completion is polled.
    thread::sleep(Duration::from_secs(5));
    println!("ECal complete: {}", vna.opc()?);

    vna.check_errors()?;
    vna.close()?;
    Ok(())
}
