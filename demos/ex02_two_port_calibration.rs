//! Full two-port SOLT calibration between ports 1 and 2.

mod common;

use bird_vna::vna::{CalStandard, CalibrationMethod};
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
    vna.sense().correction().collection().set_cal_kit(1)?;
    vna.sense().correction().set_state(false)?;
    vna.sense().correction().set_impedance(50.0)?;
    vna.sense()
        .correction()
        .collection()
        .method(CalibrationMethod::TwoPort, &[PORT_A, PORT_B])?;

    for port in [PORT_A, PORT_B] {
        vna.set_port(port)?;
        for standard in [CalStandard::Open, CalStandard::Short, CalStandard::Load] {
            prompt(&format!("Connect the {:?} standard to port {}.", standard, port))?;
            vna.set_standard(standard);
            vna.sense().correction().collection().measure_standard()?;
            vna.opc()?;
        }
    }

    prompt(&format!("Connect the THRU standard between port {} and port {}.", PORT_A, PORT_B))?;
    vna.sense().correction().collection().thru(PORT_A, PORT_B)?;
    vna.opc()?;
    vna.sense().correction().collection().thru(PORT_B, PORT_A)?;
    vna.opc()?;

    vna.sense().correction().collection().save()?;
    vna.sense().correction().set_state(true)?;
    vna.check_errors()?;
    vna.close()?;
    Ok(())
}
