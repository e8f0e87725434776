//! 3 dB bandwidth search on the insertion loss of a bandpass filter.

mod common;

use bird_vna::vna::{BandwidthReference, DataFormat, MarkerLocation, SParameter};
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
    vna.calculate().parameter().set_count(1)?;
    vna.calculate().parameter().select()?;
    vna.display().window().set_maximize(true)?;
    vna.calculate().parameter().define(SParameter::S21)?;
    vna.calculate().set_format(DataFormat::LogMagnitude)?;
    vna.display().window().trace().autoscale()?;

    vna.set_marker(1)?;
    vna.calculate().marker().set_state(true)?;
    vna.calculate().marker().set_position(MarkerLocation::Center)?;

    let mut bandwidth = vna.calculate().marker().bandwidth();
    bandwidth.set_reference(BandwidthReference::Maximum)?;
    bandwidth.set_threshold(-3.0)?;
    bandwidth.set_state(true)?;
    let result = bandwidth.data()?;
    println!(
        "bandwidth {:.3} MHz, center {:.3} MHz, low {:.3} MHz, high {:.3} MHz, Q {:.1}, loss {:.2} dB",
        result.bandwidth / 1e6,
        result.center / 1e6,
        result.low / 1e6,
        result.high / 1e6,
        result.q,
        result.loss
    );

    vna.close()?;
    Ok(())
}
