//! Bus-triggered S11 sweep with three markers read back.

mod common;

use bird_vna::vna::{DataFormat, MarkerLocation, SParameter, TriggerSource};
use common::{connect, DemoResult};

fn main() -> DemoResult {
    let mut vna = connect()?;
    vna.set_channel(1)?;
    vna.set_trace(1)?;

    vna.initiate().set_continuous(false)?;
    vna.trigger().set_source(TriggerSource::Bus)?;
    vna.sense().frequency().set_start(800e6)?;
    vna.sense().frequency().set_stop(925e6)?;
    vna.sense().sweep().set_points(1001)?;

    vna.calculate().parameter().set_count(1)?;
    vna.calculate().parameter().select()?;
    vna.calculate().parameter().define(SParameter::S11)?;
    println!("format was {}", vna.calculate().format()?);
    vna.calculate().set_format(DataFormat::LogMagnitude)?;

    vna.trigger().immediate()?;
    vna.opc()?;
    vna.display().window().trace().autoscale()?;

    vna.set_marker(1)?;
    vna.calculate().marker().set_state(true)?;
    vna.calculate().marker().set_position(MarkerLocation::Center)?;
    for (marker, freq) in [(2, 824e6), (3, 900e6)] {
        vna.set_marker(marker)?;
        vna.calculate().marker().set_state(true)?;
        vna.calculate().marker().set_x(freq)?;
    }
    for marker in 1..=3 {
        vna.set_marker(marker)?;
        let x = vna.calculate().marker().x()?;
        let (value, _) = vna.calculate().marker().y()?.as_tuple();
        println!("marker {}: {:.3} MHz, {:.2} dB", marker, x / 1e6, value);
    }

    vna.close()?;
    Ok(())
}
