//! End-to-end command flows against the in-memory transport.

use bird_vna::{
    vna::{
        CalibrationMethod, DataFormat, EcalType, ExtensionStandard, LimitLine, LimitType, MarkerLocation, SParameter, SearchType,
        Segment, SegmentMode, SegmentTable, StateType, SweepType, TriggerSource, WindowLayout,
    },
    MockTransport, Vna,
};

fn analyzer() -> Vna<MockTransport> {
    let mut vna = Vna::with_transport(MockTransport::new());
    vna.set_channel(1).unwrap();
    vna.set_trace(1).unwrap();
    vna
}

#[test]
fn single_port_calibration() {
    let mut vna = analyzer();
    assert!(vna.get_error_list().unwrap().is_empty());
    vna.system().preset().unwrap();
    vna.sense().frequency().set_center(433e6).unwrap();
    vna.sense().frequency().set_span(20e6).unwrap();
    vna.sense().sweep().set_points(1001).unwrap();

    let mut cal = vna.sense().correction().collection();
    cal.set_cal_kit(1).unwrap();
    cal.open(1).unwrap();
    cal.short(1).unwrap();
    cal.load(1).unwrap();
    cal.save().unwrap();

    assert_eq!(
        vna.transport().sent(),
        [
            "SYST:ERR?",
            "SYST:PRES",
            "SENS1:FREQ:CENT 433000000.0",
            "SENS1:FREQ:SPAN 20000000.0",
            "SENS1:SWE:POIN 1001",
            "SENS1:CORR:COLL:CKIT 1",
            "SENS1:CORR:COLL:OPEN 1",
            "SENS1:CORR:COLL:SHOR 1",
            "SENS1:CORR:COLL:LOAD 1",
            "SENS1:CORR:COLL:SAVE",
        ]
    );
}

#[test]
fn two_port_calibration() {
    let mut vna = analyzer();
    vna.sense().correction().set_state(false).unwrap();
    vna.sense().correction().set_impedance(50.0).unwrap();
    let method: CalibrationMethod = "2port".parse().unwrap();
    vna.sense().correction().collection().method(method, &[1, 2]).unwrap();
    for port in [1, 2] {
        let mut cal = vna.sense().correction().collection();
        cal.open(port).unwrap();
        cal.short(port).unwrap();
        cal.load(port).unwrap();
    }
    vna.sense().correction().collection().thru(1, 2).unwrap();
    vna.sense().correction().collection().thru(2, 1).unwrap();
    vna.sense().correction().collection().save().unwrap();
    vna.sense().correction().set_state(true).unwrap();

    let sent = vna.transport().sent();
    assert_eq!(sent[0], "SENS1:CORR:STAT 0");
    assert_eq!(sent[1], "SENS1:CORR:IMP 50.0");
    assert_eq!(sent[2], "SENS1:CORR:COLL:METH:SOLT2 1,2");
    assert_eq!(sent[9], "SENS1:CORR:COLL:THRU 1,2");
    assert_eq!(sent[10], "SENS1:CORR:COLL:THRU 2,1");
    assert_eq!(sent.last().map(String::as_str), Some("SENS1:CORR:STAT 1"));
}

#[test]
fn antenna_characterization() {
    let mut vna = analyzer();
    vna.transport_mut().respond("CALC1:MARK1:Y?", "1.35,0");
    vna.set_port(2).unwrap();
    vna.sense().correction().extension().auto().set_port_state(false).unwrap();
    vna.set_port(1).unwrap();
    let mut auto = vna.sense().correction().extension().auto();
    auto.set_port_state(true).unwrap();
    auto.measure(ExtensionStandard::Open).unwrap();

    vna.calculate().parameter().set_count(2).unwrap();
    vna.calculate().parameter().select_trace(2).unwrap();
    vna.calculate().parameter().define(SParameter::S11).unwrap();
    vna.calculate().set_format(DataFormat::Swr).unwrap();
    vna.set_marker(1).unwrap();
    assert_eq!(vna.calculate().marker().y().unwrap().primary, 1.35);
    assert_eq!(vna.trace(), Some(2));

    assert_eq!(
        vna.transport().sent(),
        [
            "SENS1:CORR:EXT:AUTO:PORT2 OFF",
            "SENS1:CORR:EXT:AUTO:PORT1 ON",
            "SENS1:CORR:EXT:AUTO:MEAS OPEN",
            "CALC1:PAR:COUN 2",
            "CALC1:PAR2:SEL",
            "CALC1:PAR2:DEF S11",
            "CALC1:TRAC2:FORM SWR",
            "CALC1:MARK1:Y?",
        ]
    );
}

#[test]
fn ecal_two_port_calibration() {
    let mut vna = analyzer();
    let kind: EcalType = "2port".parse().unwrap();
    vna.sense().correction().collection().ecal(kind, &[1, 2]).unwrap();
    assert!(vna.opc().unwrap());
    assert!(vna
        .sense()
        .correction()
        .collection()
        .ecal(EcalType::TwoPort, &[1])
        .is_err());
    assert_eq!(
        vna.transport().sent(),
        ["SENS1:CORR:COLL:ECAL:SOLT2 1,2", "*OPC?"]
    );
}

#[test]
fn triggered_return_loss_sweep() {
    let mut vna = analyzer();
    vna.transport_mut()
        .respond("CALC1:MARK1:Y?", "-18.25,0")
        .respond("CALC1:MARK2:Y?", "-9.5,0");

    vna.initiate().set_continuous(false).unwrap();
    vna.trigger().set_source(TriggerSource::Bus).unwrap();
    vna.sense().frequency().set_start(800e6).unwrap();
    vna.sense().frequency().set_stop(925e6).unwrap();
    vna.calculate().parameter().set_count(1).unwrap();
    vna.calculate().parameter().select().unwrap();
    vna.calculate().parameter().define(SParameter::S11).unwrap();
    vna.calculate().set_format(DataFormat::LogMagnitude).unwrap();
    vna.trigger().immediate().unwrap();
    assert!(vna.opc().unwrap());
    vna.display().window().trace().autoscale().unwrap();

    vna.set_marker(1).unwrap();
    vna.calculate().marker().set_state(true).unwrap();
    vna.calculate().marker().set_position(MarkerLocation::Center).unwrap();
    assert_eq!(vna.calculate().marker().y().unwrap().primary, -18.25);

    vna.set_marker(2).unwrap();
    vna.calculate().marker().set_state(true).unwrap();
    vna.calculate().marker().set_x(824e6).unwrap();
    assert_eq!(vna.calculate().marker().y().unwrap().as_tuple(), (-9.5, 0.0));

    let sent = vna.transport().sent();
    assert!(sent.contains(&"CALC1:PAR1:SEL".to_string()));
    assert!(sent.contains(&"CALC1:MARK1:SET CENT".to_string()));
    assert!(sent.contains(&"CALC1:MARK2:X 824000000.0".to_string()));
    assert!(sent.contains(&"TRIG".to_string()));
}

#[test]
fn limit_test_on_return_loss() {
    let mut vna = analyzer();
    vna.transport_mut().respond("CALC1:LIM:FAIL?", "0");
    vna.set_marker(2).unwrap();
    let mut function = vna.calculate().marker().function();
    function.set_search_type(SearchType::Target).unwrap();
    function.set_target(-16.5).unwrap();
    function.execute().unwrap();

    let mut limit = vna.calculate().limit();
    limit.clear_lines().unwrap();
    limit
        .add_line(LimitLine::flat("max".parse::<LimitType>().unwrap(), 428e6, 438e6, -17.0))
        .unwrap();
    limit.set_state(true).unwrap();
    limit.set_display(true).unwrap();
    vna.display().set_fail_sign(true).unwrap();
    assert!(!vna.calculate().limit().fail().unwrap());

    assert_eq!(
        vna.transport().sent(),
        [
            "CALC1:MARK2:FUNC:TYPE TARG",
            "CALC1:MARK2:FUNC:TARG -16.5",
            "CALC1:MARK2:FUNC:EXEC",
            "CALC1:LIM:DATA 0",
            "CALC1:LIM:DATA?",
            "CALC1:LIM:DATA 1,1,428000000.0,438000000.0,-17.0,-17.0",
            "CALC1:LIM 1",
            "CALC1:LIM:DISP 1",
            "DISP:FSIG 1",
            "CALC1:LIM:FAIL?",
        ]
    );
}

#[test]
fn bandwidth_search_on_insertion_loss() {
    let mut vna = analyzer();
    vna.transport_mut().respond(
        "CALC1:MARK1:BWID:DATA?",
        "+1.20000000E+007,+4.33000000E+008,+4.27000000E+008,+4.39000000E+008,+3.60833333E+001,-1.20000000E+000",
    );
    vna.system().preset().unwrap();
    assert!(vna.opc().unwrap());
    vna.calculate().parameter().define(SParameter::S21).unwrap();
    vna.calculate().set_format(DataFormat::LogMagnitude).unwrap();
    vna.display().window().set_maximize(true).unwrap();
    vna.set_marker(1).unwrap();
    vna.calculate().marker().set_state(true).unwrap();
    let mut bandwidth = vna.calculate().marker().bandwidth();
    bandwidth.set_state(true).unwrap();
    bandwidth.set_threshold(-3.0).unwrap();
    let result = bandwidth.data().unwrap();
    assert_eq!(result.bandwidth, 12e6);
    assert_eq!(result.low, 427e6);
    assert_eq!(result.high, 439e6);
    assert_eq!(result.loss, -1.2);
}

#[test]
fn save_and_recall_setup() {
    let mut vna = analyzer();
    let state_type: StateType = "cal_n_state".parse().unwrap();
    vna.mmemory().store().set_state_type(state_type).unwrap();
    let file = vna.mmemory().store().state("mystate").unwrap();
    vna.system().preset().unwrap();
    vna.mmemory().load().state(&file).unwrap();
    assert_eq!(
        vna.transport().sent(),
        [
            "MMEM:STOR:STYP CST",
            "MMEM:STOR mystate.sta",
            "SYST:PRES",
            "MMEM:LOAD mystate.sta",
        ]
    );
}

#[test]
fn segmented_sweep() {
    let mut vna = analyzer();
    vna.transport_mut()
        .respond("SENS1:SEGM:SWE:POIN?", "412")
        .respond("SENS1:SEGM:SWE:TIME?", "0.0834");
    let starts = [300e3, 290e6, 350e6, 824e6, 850e6, 878e6, 898e6, 2.3e9];
    let stops = [290e6, 350e6, 824e6, 850e6, 878e6, 898e6, 2.3e9, 2.5e9];
    let points = [2, 101, 2, 101, 2, 101, 2, 101];
    let segments = starts
        .iter()
        .zip(stops)
        .zip(points)
        .map(|((&start, stop), points)| Segment::new(start, stop, points).with_ifbw(70e3))
        .collect();
    let table = SegmentTable::new(SegmentMode::StartStop, segments);

    vna.sense().sweep().set_sweep_type(SweepType::Segment).unwrap();
    vna.sense().segment().set_table(&table).unwrap();
    vna.mmemory().store().segment_table("ant800.seg").unwrap();
    assert_eq!(vna.sense().segment().sweep().points().unwrap(), 412);
    assert_eq!(vna.sense().segment().sweep().time().unwrap(), 0.0834);
    vna.sense().segment().list().set_control(&[true; 8]).unwrap();
    assert_eq!(vna.sense().segment().table().unwrap(), table);

    let sent = vna.transport().sent();
    assert!(sent[1].starts_with("SENS1:SEGM:DATA 5,0,1,0,0,0,8,300000.0,290000000.0,2,70000.0,"));
    assert_eq!(sent[2], "MMEM:STOR:SEGM ant800.seg");
    assert_eq!(sent[5], "SENS1:SEGM:LIST:CONT:DATA 1,1,1,1,1,1,1,1");
}

#[test]
fn multiple_traces_in_separate_panes() {
    let mut vna = analyzer();
    vna.calculate().parameter().set_count(4).unwrap();
    vna.display().window().set_layout(WindowLayout::from_index(7).unwrap()).unwrap();
    for (trace, parameter) in (1..).zip([SParameter::S11, SParameter::S21, SParameter::S12, SParameter::S22]) {
        vna.set_trace(trace).unwrap();
        vna.calculate().parameter().define(parameter).unwrap();
        vna.calculate().set_format(DataFormat::LogMagnitude).unwrap();
        vna.display().window().trace().autoscale().unwrap();
        vna.display().window().trace().set_y_per_division(10.0).unwrap();
    }
    vna.set_trace(1).unwrap();
    for (marker, freq) in (1..).zip([380e6, 423e6, 770.5e6]) {
        vna.set_marker(marker).unwrap();
        vna.calculate().marker().set_state(true).unwrap();
        vna.calculate().marker().set_x(freq).unwrap();
    }

    let sent = vna.transport().sent();
    assert_eq!(sent[1], "DISP:WIND1:SPL D12_34");
    assert!(sent.contains(&"CALC1:PAR4:DEF S22".to_string()));
    assert!(sent.contains(&"DISP:WIND1:TRAC3:Y:PDIV 10.0".to_string()));
    assert_eq!(sent.last().map(String::as_str), Some("CALC1:MARK3:X 770500000.0"));
}
