//! Four S-parameter traces, each in its own pane, with twelve markers.

mod common;

use bird_vna::vna::{DataFormat, SParameter, WindowLayout};
use common::{connect, DemoResult};

const MARKER_FREQUENCIES: [f64; 12] = [
    380e6, 423e6, 770.5e6, 816e6, 876.5e6, 921.5e6, 940.1e6, 1.4595e9, 1.8451e9, 1.9050e9,
    2.1454e9, 2.6550e9,
];

fn main() -> DemoResult {
    let mut vna = connect()?;
    vna.system().preset()?;
    vna.set_channel(1)?;
    vna.set_trace(1)?;

    vna.sense().frequency().set_start(350e6)?;
    vna.sense().frequency().set_stop(2.7e9)?;
    vna.sense().sweep().set_points(1001)?;
    vna.calculate().parameter().set_count(4)?;
    vna.display().window().set_layout(WindowLayout::D12_34)?;

    let parameters = [SParameter::S11, SParameter::S21, SParameter::S12, SParameter::S22];
    for (trace, parameter) in (1..).zip(parameters) {
        vna.set_trace(trace)?;
        vna.calculate().parameter().define(parameter)?;
        vna.calculate().set_format(DataFormat::LogMagnitude)?;
        let mut y = vna.display().window().trace();
        println!("trace {} was {} dB/div", trace, y.y_per_division()?);
        y.autoscale()?;
        y.set_y_per_division(10.0)?;
    }

    vna.set_trace(1)?;
    for (marker, freq) in (1..).zip(MARKER_FREQUENCIES) {
        vna.set_marker(marker)?;
        vna.calculate().marker().set_state(true)?;
        vna.calculate().marker().set_x(freq)?;
        vna.opc()?;
    }

    for trace in 1..=4 {
        vna.set_trace(trace)?;
        for marker in 1..=12 {
            vna.set_marker(marker)?;
            let (primary, secondary) = vna.calculate().marker().y()?.as_tuple();
            println!("trace {}, marker {}: {}, {}", trace, marker, primary, secondary);
        }
    }

    vna.close()?;
    Ok(())
}
