//! Segmented S11 sweep around the resonances of an AT-800 antenna.

mod common;

use bird_vna::vna::{
    DataFormat, MarkerLocation, SParameter, Segment, SegmentMode, SegmentTable, SweepType,
    TriggerSource,
};
use common::{connect, DemoResult};

const STARTS: [f64; 8] = [300e3, 290e6, 350e6, 824e6, 850e6, 878e6, 898e6, 2.3e9];
const STOPS: [f64; 8] = [290e6, 350e6, 824e6, 850e6, 878e6, 898e6, 2.3e9, 2.5e9];
const POINTS: [u32; 8] = [2, 101, 2, 101, 2, 101, 2, 101];
const IFBW: f64 = 70e3;

fn main() -> DemoResult {
    let recall = std::env::var_os("RECALL_SEGMENT_TABLE").is_some();
    let mut vna = connect()?;
    vna.set_channel(1)?;
    vna.set_trace(1)?;

    vna.initiate().set_continuous(false)?;
    vna.trigger().set_source(TriggerSource::Bus)?;
    vna.sense().sweep().set_sweep_type(SweepType::Segment)?;

    if recall {
        vna.mmemory().load().segment_table("ant800.seg")?;
    } else {
        let segments = STARTS
            .iter()
            .zip(STOPS)
            .zip(POINTS)
            .map(|((&start, stop), points)| Segment::new(start, stop, points).with_ifbw(IFBW))
            .collect();
        let table = SegmentTable::new(SegmentMode::StartStop, segments);
        vna.sense().segment().set_table(&table)?;
        vna.mmemory().store().segment_table("ant800.seg")?;
    }

    let points = vna.sense().segment().sweep().points()?;
    let time = vna.sense().segment().sweep().time()?;
    println!("segmented sweep: {} points in {:.3} s", points, time);
    vna.sense().segment().list().set_control(&[true; 8])?;

    vna.calculate().parameter().set_count(1)?;
    vna.calculate().parameter().select()?;
    vna.calculate().parameter().define(SParameter::S11)?;
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
        println!("marker {}: {:?}", marker, vna.calculate().marker().y()?.as_tuple());
    }

    vna.close()?;
    Ok(())
}
