//! Antenna characterization: port extension, S11 return loss and SWR
//! traces with markers, then a one-port calibration.

mod common;

use bird_vna::vna::{DataFormat, ExtensionStandard, MarkerLocation, SParameter};
use common::{connect, prompt, DemoResult};

fn main() -> DemoResult {
    let mut vna = connect()?;
    vna.set_channel(1)?;
    vna.set_trace(1)?;

    vna.sense().frequency().set_start(800e6)?;
    vna.sense().frequency().set_stop(925e6)?;
    vna.sense().sweep().set_points(1001)?;

    // A successful auto extension measurement also turns the feature on.
    vna.set_port(2)?;
    vna.sense().correction().extension().auto().set_port_state(false)?;
    vna.set_port(1)?;
    vna.sense().correction().extension().auto().set_port_state(true)?;
    vna.sense()
        .correction()
        .extension()
        .auto()
        .measure(ExtensionStandard::Open)?;

    vna.calculate().parameter().set_count(1)?;
    vna.calculate().parameter().select()?;
    vna.calculate().parameter().define(SParameter::S11)?;
    println!("format was {}", vna.calculate().format()?);
    vna.calculate().set_format(DataFormat::LogMagnitude)?;
    vna.display().window().trace().autoscale()?;

    vna.set_marker(1)?;
    vna.calculate().marker().set_state(true)?;
    vna.calculate().marker().set_position(MarkerLocation::Center)?;
    for (marker, freq) in [(2, 824e6), (3, 900e6)] {
        vna.set_marker(marker)?;
        vna.calculate().marker().set_state(true)?;
        vna.calculate().marker().set_x(freq)?;
    }
    print_markers(&mut vna, "return loss")?;

    // Same markers on an SWR trace of the same channel.
    vna.calculate().parameter().set_count(2)?;
    vna.calculate().parameter().select_trace(2)?;
    vna.calculate().parameter().define(SParameter::S11)?;
    vna.calculate().set_format(DataFormat::Swr)?;
    vna.display().window().trace().autoscale()?;
    print_markers(&mut vna, "SWR")?;

    vna.set_trace(1)?;
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

fn print_markers(vna: &mut bird_vna::Vna, label: &str) -> DemoResult {
    for marker in 1..=3 {
        vna.set_marker(marker)?;
        let x = vna.calculate().marker().x()?;
        let (value, _) = vna.calculate().marker().y()?.as_tuple();
        println!("{} marker {}: {:.3} MHz, {:.3}", label, marker, x / 1e6, value);
    }
    Ok(())
}
