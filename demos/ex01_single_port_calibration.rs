//! Single-port SOL calibration on port 1.

mod common;

use common::{connect, prompt, DemoResult};

fn main() -> DemoResult {
    let mut vna = connect()?;
    vna.system().preset()?;
    vna.set_channel(1)?;
    vna.set_trace(1)?;

    vna.sense().frequency().set_center(433e6)?;
    vna.sense().frequency().set_span(20e6)?;
    vna.sense().sweep().set_points(1001)?;
    vna.sense().correction().collection().set_cal_kit(1)?;

    prompt("Connect the OPEN standard.")?;
    vna.sense().correction().collection().open(1)?;
    prompt("Connect the SHORT standard.")?;
    vna.sense().correction().collection().short(1)?;
    prompt("Connect the LOAD standard.")?;
    vna.sense().correction().collection().load(1)?;
    vna.sense().correction().collection().save()?;

    vna.check_errors()?;
    vna.close()?;
    Ok(())
}
