//! Saves a setup with its calibration, presets, then recalls it.

mod common;

use bird_vna::vna::{DataFormat, SParameter, StateType};
use common::{connect, DemoResult};

fn main() -> DemoResult {
    let mut vna = connect()?;
    vna.system().preset()?;
    vna.opc()?;
    vna.set_channel(1)?;
    vna.set_trace(1)?;

    vna.sense().frequency().set_center(433e6)?;
    vna.sense().frequency().set_span(20e6)?;
    vna.sense().sweep().set_points(1601)?;
    vna.calculate().parameter().define(SParameter::S21)?;
    vna.calculate().set_format(DataFormat::LogMagnitude)?;
    for (marker, freq) in [(1, 433e6), (2, 428e6), (3, 438e6)] {
        vna.set_marker(marker)?;
        vna.calculate().marker().set_state(true)?;
        vna.calculate().marker().set_x(freq)?;
    }

    vna.mmemory().store().set_state_type(StateType::CalibrationState)?;
    let file = vna.mmemory().store().state("mystate")?;
    println!("saved {}", file);

    vna.system().preset()?;
    vna.mmemory().load().state(&file)?;
    vna.opc()?;
    println!("recalled {}, center {:.3} MHz", file, vna.sense().frequency().center()? / 1e6);

    vna.check_errors()?;
    vna.close()?;
    Ok(())
}
