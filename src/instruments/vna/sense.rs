//! `SENSe` subsystem: stimulus range, sweep, calibration and segmented
//! sweeps.

use crate::{
    error::{Error, Result},
    protocols::Transport,
    scpi::{format_float, Value},
};

use super::{commands::sense as cmd, enums::*, Field};

view!(Sense);
view!(Frequency);
view!(Sweep);
view!(Correction);
view!(Collection);
view!(Extension);
view!(AutoExtension);
view!(SegmentView);
view!(SegmentSweep);
view!(SegmentList);

impl<'a, T: Transport> Sense<'a, T> {
    pub fn frequency(self) -> Frequency<'a, T> {
        Frequency::new(self.session)
    }
    pub fn sweep(self) -> Sweep<'a, T> {
        Sweep::new(self.session)
    }
    pub fn correction(self) -> Correction<'a, T> {
        Correction::new(self.session)
    }
    pub fn segment(self) -> SegmentView<'a, T> {
        SegmentView::new(self.session)
    }
}

/// Stimulus range of the context channel, in Hz.
impl<'a, T: Transport> Frequency<'a, T> {
    pub fn cw(&mut self) -> Result<f64> {
        self.session.get(&cmd::FREQUENCY_CW)
    }
    pub fn set_cw(&mut self, hz: f64) -> Result<()> {
        self.session.set(&cmd::FREQUENCY_CW, hz)
    }
    pub fn center(&mut self) -> Result<f64> {
        self.session.get(&cmd::FREQUENCY_CENTER)
    }
    pub fn set_center(&mut self, hz: f64) -> Result<()> {
        self.session.set(&cmd::FREQUENCY_CENTER, hz)
    }
    pub fn span(&mut self) -> Result<f64> {
        self.session.get(&cmd::FREQUENCY_SPAN)
    }
    pub fn set_span(&mut self, hz: f64) -> Result<()> {
        self.session.set(&cmd::FREQUENCY_SPAN, hz)
    }
    pub fn start(&mut self) -> Result<f64> {
        self.session.get(&cmd::FREQUENCY_START)
    }
    pub fn set_start(&mut self, hz: f64) -> Result<()> {
        self.session.set(&cmd::FREQUENCY_START, hz)
    }
    pub fn stop(&mut self) -> Result<f64> {
        self.session.get(&cmd::FREQUENCY_STOP)
    }
    pub fn set_stop(&mut self, hz: f64) -> Result<()> {
        self.session.set(&cmd::FREQUENCY_STOP, hz)
    }
    /// Stimulus value of every measurement point.
    pub fn data(&mut self) -> Result<Vec<f64>> {
        self.session.get(&cmd::FREQUENCY_DATA)
    }
}

impl<'a, T: Transport> Sweep<'a, T> {
    pub fn points(&mut self) -> Result<u32> {
        self.session.get(&cmd::SWEEP_POINTS)
    }
    pub fn set_points(&mut self, points: u32) -> Result<()> {
        self.session.set(&cmd::SWEEP_POINTS, points)
    }
    /// Measurement time per point, in seconds.
    pub fn point_time(&mut self) -> Result<f64> {
        self.session.get(&cmd::SWEEP_POINT_TIME)
    }
    pub fn set_point_time(&mut self, seconds: f64) -> Result<()> {
        self.session.set(&cmd::SWEEP_POINT_TIME, seconds)
    }
    pub fn sweep_type(&mut self) -> Result<SweepType> {
        self.session.get(&cmd::SWEEP_TYPE)
    }
    pub fn set_sweep_type(&mut self, sweep_type: SweepType) -> Result<()> {
        self.session.set(&cmd::SWEEP_TYPE, sweep_type)
    }
}

impl<'a, T: Transport> Correction<'a, T> {
    pub fn collection(self) -> Collection<'a, T> {
        Collection::new(self.session)
    }
    pub fn extension(self) -> Extension<'a, T> {
        Extension::new(self.session)
    }

    /// System impedance, in ohms.
    pub fn impedance(&mut self) -> Result<f64> {
        self.session.get(&cmd::CORRECTION_IMPEDANCE)
    }
    pub fn set_impedance(&mut self, ohms: f64) -> Result<()> {
        self.session.set(&cmd::CORRECTION_IMPEDANCE, ohms)
    }
    /// Whether error correction is applied.
    pub fn state(&mut self) -> Result<bool> {
        self.session.get(&cmd::CORRECTION_STATE)
    }
    pub fn set_state(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::CORRECTION_STATE, on)
    }
}

fn port_values(path: &str, ports: &[u32]) -> Result<Vec<Value>> {
    ports
        .iter()
        .map(|&port| {
            if port == 0 {
                Err(Error::invalid_argument(path, "0", "a port number starting at 1"))
            } else {
                Ok(Value::from(port))
            }
        })
        .collect()
}

fn check_port_count(path: &str, mnemonic: &str, expected: usize, ports: &[u32]) -> Result<()> {
    if ports.len() == expected {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            path,
            format!("{} port(s)", ports.len()),
            format!("{} port(s) for {}", expected, mnemonic),
        ))
    }
}

/// Calibration standard collection on the context channel.
impl<'a, T: Transport> Collection<'a, T> {
    pub fn open(&mut self, port: u32) -> Result<()> {
        let args = port_values(cmd::COLLECT_OPEN.path, &[port])?;
        self.session.fire(&cmd::COLLECT_OPEN, &args)
    }
    pub fn short(&mut self, port: u32) -> Result<()> {
        let args = port_values(cmd::COLLECT_SHORT.path, &[port])?;
        self.session.fire(&cmd::COLLECT_SHORT, &args)
    }
    pub fn load(&mut self, port: u32) -> Result<()> {
        let args = port_values(cmd::COLLECT_LOAD.path, &[port])?;
        self.session.fire(&cmd::COLLECT_LOAD, &args)
    }
    /// Measures the thru standard from `from` to `to`.
    pub fn thru(&mut self, from: u32, to: u32) -> Result<()> {
        let args = port_values(cmd::COLLECT_THRU.path, &[from, to])?;
        self.session.fire(&cmd::COLLECT_THRU, &args)
    }

    /// Measures the context standard on the context port.
    pub fn measure_standard(&mut self) -> Result<()> {
        let standard = self
            .session
            .context()
            .standard
            .ok_or(Error::ContextUnset(Field::Standard))?;
        let port = self
            .session
            .context()
            .port
            .ok_or(Error::ContextUnset(Field::Port))?;
        match standard {
            CalStandard::Open => self.open(port),
            CalStandard::Short => self.short(port),
            CalStandard::Load => self.load(port),
            CalStandard::Thru => Err(Error::invalid_argument(
                Field::Standard.key(),
                standard.mnemonic(),
                "a one-port standard, use thru(from, to) for THRU",
            )),
        }
    }

    /// Computes the error terms from the collected standards and turns
    /// correction on.
    pub fn save(&mut self) -> Result<()> {
        self.session.fire(&cmd::COLLECT_SAVE, &[])
    }

    pub fn cal_kit(&mut self) -> Result<u32> {
        self.session.get(&cmd::COLLECT_CAL_KIT)
    }
    /// Selects calibration kit `kit` and records it in the context.
    pub fn set_cal_kit(&mut self, kit: u32) -> Result<()> {
        if kit == 0 {
            return Err(Error::invalid_argument(Field::CalKit.key(), "0", "an index starting at 1"));
        }
        self.session.set(&cmd::COLLECT_CAL_KIT, kit)?;
        self.session.context_mut().cal_kit = Some(kit);
        Ok(())
    }

    /// Selects the calibration type for `ports`.
    pub fn method(&mut self, method: CalibrationMethod, ports: &[u32]) -> Result<()> {
        check_port_count(cmd::COLLECT_METHOD.path, method.mnemonic(), method.port_count(), ports)?;
        let args = port_values(cmd::COLLECT_METHOD.path, ports)?;
        self.session
            .fire_with(&cmd::COLLECT_METHOD, &[("method", method.mnemonic())], &args)
    }

    /// Runs an electronic calibration on `ports`.
    pub fn ecal(&mut self, kind: EcalType, ports: &[u32]) -> Result<()> {
        check_port_count(cmd::COLLECT_ECAL.path, kind.mnemonic(), kind.port_count(), ports)?;
        let args = port_values(cmd::COLLECT_ECAL.path, ports)?;
        self.session
            .fire_with(&cmd::COLLECT_ECAL, &[("kind", kind.mnemonic())], &args)
    }
}

impl<'a, T: Transport> Extension<'a, T> {
    pub fn auto(self) -> AutoExtension<'a, T> {
        AutoExtension::new(self.session)
    }
}

impl<'a, T: Transport> AutoExtension<'a, T> {
    /// Measures `standard` for automatic port extension.
    pub fn measure(&mut self, standard: ExtensionStandard) -> Result<()> {
        self.session.set(&cmd::EXTENSION_AUTO_MEASURE, standard)
    }
    /// Whether the context port takes part in automatic port extension.
    pub fn port_state(&mut self) -> Result<bool> {
        self.session.get(&cmd::EXTENSION_AUTO_PORT)
    }
    pub fn set_port_state(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::EXTENSION_AUTO_PORT, on)
    }
}

const SEGMENT_TABLE_VERSION: u32 = 5;

/// One row of a segmented sweep. Optional columns are only sent when the
/// table enables them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub stop: f64,
    pub points: u32,
    pub ifbw: Option<f64>,
    pub power: Option<f64>,
    pub delay: Option<f64>,
    pub sweep_time: Option<f64>,
}

impl Segment {
    pub fn new(start: f64, stop: f64, points: u32) -> Self {
        Self {
            start,
            stop,
            points,
            ifbw: None,
            power: None,
            delay: None,
            sweep_time: None,
        }
    }

    pub fn with_ifbw(mut self, hz: f64) -> Self {
        self.ifbw = Some(hz);
        self
    }
    pub fn with_power(mut self, dbm: f64) -> Self {
        self.power = Some(dbm);
        self
    }
    pub fn with_delay(mut self, seconds: f64) -> Self {
        self.delay = Some(seconds);
        self
    }
    pub fn with_sweep_time(mut self, seconds: f64) -> Self {
        self.sweep_time = Some(seconds);
        self
    }

    fn optional(&self) -> [Option<f64>; 4] {
        [self.ifbw, self.power, self.delay, self.sweep_time]
    }
}

/// Segment table as carried by `SENS:SEGM:DATA`.
///
/// Wire layout: `5,<mode>,<ifbw>,<power>,<delay>,<time>,<count>` followed by
/// `<start>,<stop>,<points>` and each enabled optional column per segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTable {
    pub mode: SegmentMode,
    pub ifbw: bool,
    pub power: bool,
    pub delay: bool,
    pub sweep_time: bool,
    pub segments: Vec<Segment>,
}

impl SegmentTable {
    /// A column is enabled when any segment sets it.
    pub fn new(mode: SegmentMode, segments: Vec<Segment>) -> Self {
        let mut flags = [false; 4];
        for segment in &segments {
            for (flag, value) in flags.iter_mut().zip(segment.optional()) {
                *flag |= value.is_some();
            }
        }
        let [ifbw, power, delay, sweep_time] = flags;
        Self {
            mode,
            ifbw,
            power,
            delay,
            sweep_time,
            segments,
        }
    }

    fn flags(&self) -> [bool; 4] {
        [self.ifbw, self.power, self.delay, self.sweep_time]
    }

    /// Total number of points over all segments.
    pub fn total_points(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.points)).sum()
    }

    fn encode(&self) -> Result<String> {
        const COLUMNS: [&str; 4] = ["ifbw", "power", "delay", "sweep_time"];
        let reject = |value: String, expected: &str| {
            Err(Error::invalid_argument(cmd::SEGMENT_DATA.path, value, expected))
        };
        if self.segments.is_empty() {
            return reject("0 segments".to_string(), "at least one segment");
        }

        let mut fields = vec![
            SEGMENT_TABLE_VERSION.to_string(),
            self.mode.mnemonic().to_string(),
        ];
        fields.extend(self.flags().iter().map(|&on| u8::from(on).to_string()));
        fields.push(self.segments.len().to_string());

        for (index, segment) in self.segments.iter().enumerate() {
            if !segment.start.is_finite() || !segment.stop.is_finite() {
                return reject(format!("segment {}", index + 1), "finite frequencies");
            }
            if segment.points == 0 {
                return reject(format!("segment {}", index + 1), "at least one point");
            }
            fields.push(format_float(segment.start));
            fields.push(format_float(segment.stop));
            fields.push(segment.points.to_string());
            for ((enabled, value), column) in self.flags().iter().zip(segment.optional()).zip(COLUMNS) {
                if !enabled {
                    continue;
                }
                match value {
                    Some(v) if v.is_finite() => fields.push(format_float(v)),
                    _ => {
                        return reject(
                            format!("segment {} without {}", index + 1, column),
                            "a finite value for every enabled column",
                        )
                    }
                }
            }
        }
        Ok(fields.join(","))
    }

    fn decode(values: &[f64]) -> Option<Self> {
        let flag = |v: f64| match v {
            v if v == 0.0 => Some(false),
            v if v == 1.0 => Some(true),
            _ => None,
        };
        let whole = |v: f64| (v >= 0.0 && v.fract() == 0.0).then_some(v as usize);

        let (header, rows) = (values.get(..7)?, &values[7..]);
        if header[0] != f64::from(SEGMENT_TABLE_VERSION) {
            return None;
        }
        let mode = *SegmentMode::ALL.get(whole(header[1])?)?;
        let flags = [flag(header[2])?, flag(header[3])?, flag(header[4])?, flag(header[5])?];
        let count = whole(header[6])?;
        let width = 3 + flags.iter().filter(|&&on| on).count();
        if rows.len() != count * width {
            return None;
        }

        let segments = rows
            .chunks(width)
            .map(|row| {
                let mut segment = Segment::new(row[0], row[1], u32::try_from(whole(row[2])?).ok()?);
                let mut optional = row[3..].iter().copied();
                let mut next = |on: bool| if on { optional.next() } else { None };
                segment.ifbw = next(flags[0]);
                segment.power = next(flags[1]);
                segment.delay = next(flags[2]);
                segment.sweep_time = next(flags[3]);
                Some(segment)
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            mode,
            ifbw: flags[0],
            power: flags[1],
            delay: flags[2],
            sweep_time: flags[3],
            segments,
        })
    }
}

impl<'a, T: Transport> SegmentView<'a, T> {
    pub fn sweep(self) -> SegmentSweep<'a, T> {
        SegmentSweep::new(self.session)
    }
    pub fn list(self) -> SegmentList<'a, T> {
        SegmentList::new(self.session)
    }

    pub fn table(&mut self) -> Result<SegmentTable> {
        let command = format!("{}?", self.session.render(&cmd::SEGMENT_DATA)?);
        let response = self.session.query(&command)?;
        let values: Vec<f64> = crate::scpi::parse(&command, &response)?;
        SegmentTable::decode(&values).ok_or_else(|| Error::Parse {
            command,
            response,
            expected: "segment table",
        })
    }

    /// Replaces the segment table of the context channel.
    pub fn set_table(&mut self, table: &SegmentTable) -> Result<()> {
        let payload = table.encode()?;
        self.session.set_payload(&cmd::SEGMENT_DATA, &payload)
    }
}

impl<'a, T: Transport> SegmentSweep<'a, T> {
    /// Total points of the segmented sweep.
    pub fn points(&mut self) -> Result<u32> {
        self.session.get(&cmd::SEGMENT_SWEEP_POINTS)
    }
    /// Duration of the segmented sweep, in seconds.
    pub fn time(&mut self) -> Result<f64> {
        self.session.get(&cmd::SEGMENT_SWEEP_TIME)
    }
}

impl<'a, T: Transport> SegmentList<'a, T> {
    /// Per-segment measurement enable flags.
    pub fn control(&mut self) -> Result<Vec<bool>> {
        let values: Vec<f64> = self.session.get(&cmd::SEGMENT_LIST_CONTROL)?;
        Ok(values.into_iter().map(|v| v != 0.0).collect())
    }
    pub fn set_control(&mut self, enabled: &[bool]) -> Result<()> {
        if enabled.is_empty() {
            return Err(Error::invalid_argument(
                cmd::SEGMENT_LIST_CONTROL.path,
                "",
                "one flag per segment",
            ));
        }
        let payload = enabled
            .iter()
            .map(|&on| if on { "1" } else { "0" })
            .collect::<Vec<_>>()
            .join(",");
        self.session.set_payload(&cmd::SEGMENT_LIST_CONTROL, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{instruments::vna::Vna, protocols::MockTransport};

    fn vna() -> Vna<MockTransport> {
        let mut vna = Vna::with_transport(MockTransport::new());
        vna.set_channel(1).unwrap();
        vna
    }

    #[test]
    fn stimulus_range() {
        let mut vna = vna();
        let mut frequency = vna.sense().frequency();
        frequency.set_center(433e6).unwrap();
        frequency.set_span(20e6).unwrap();
        assert_eq!(frequency.center().unwrap(), 433e6);
        vna.sense().sweep().set_points(1601).unwrap();
        vna.sense().sweep().set_sweep_type(SweepType::Segment).unwrap();
        assert_eq!(
            vna.transport().sent(),
            [
                "SENS1:FREQ:CENT 433000000.0",
                "SENS1:FREQ:SPAN 20000000.0",
                "SENS1:FREQ:CENT?",
                "SENS1:SWE:POIN 1601",
                "SENS1:SWE:TYPE SEGM",
            ]
        );
    }

    #[test]
    fn frequency_needs_channel() {
        let mut vna = Vna::with_transport(MockTransport::new());
        assert!(matches!(
            vna.sense().frequency().set_start(1e6),
            Err(Error::ContextUnset(Field::Channel))
        ));
        assert!(vna.transport().sent().is_empty());
    }

    #[test]
    fn calibration_method_checks_ports() {
        let mut vna = vna();
        let mut collection = vna.sense().correction().collection();
        collection.method(CalibrationMethod::TwoPort, &[1, 2]).unwrap();
        collection.method(CalibrationMethod::OnePort, &[2]).unwrap();
        assert!(matches!(
            collection.method(CalibrationMethod::TwoPort, &[1]),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            collection.method(CalibrationMethod::Response, &[1, 0]),
            Err(Error::InvalidArgument { .. })
        ));
        collection.ecal(EcalType::FourPort, &[1, 2, 3, 4]).unwrap();
        assert_eq!(
            vna.transport().sent(),
            [
                "SENS1:CORR:COLL:METH:SOLT2 1,2",
                "SENS1:CORR:COLL:METH:SOLT1 2",
                "SENS1:CORR:COLL:ECAL:SOLT4 1,2,3,4",
            ]
        );
    }

    #[test]
    fn one_port_calibration() {
        let mut vna = vna();
        let mut collection = vna.sense().correction().collection();
        collection.set_cal_kit(3).unwrap();
        collection.open(1).unwrap();
        collection.short(1).unwrap();
        collection.load(1).unwrap();
        collection.save().unwrap();
        assert_eq!(vna.cal_kit(), Some(3));
        assert_eq!(
            vna.transport().sent(),
            [
                "SENS1:CORR:COLL:CKIT 3",
                "SENS1:CORR:COLL:OPEN 1",
                "SENS1:CORR:COLL:SHOR 1",
                "SENS1:CORR:COLL:LOAD 1",
                "SENS1:CORR:COLL:SAVE",
            ]
        );
    }

    #[test]
    fn measure_standard_uses_context() {
        let mut vna = vna();
        assert!(matches!(
            vna.sense().correction().collection().measure_standard(),
            Err(Error::ContextUnset(Field::Standard))
        ));
        vna.set_standard(CalStandard::Short);
        vna.set_port(2).unwrap();
        vna.sense().correction().collection().measure_standard().unwrap();
        vna.set_standard(CalStandard::Thru);
        assert!(vna
            .sense()
            .correction()
            .collection()
            .measure_standard()
            .is_err());
        assert_eq!(vna.transport().sent(), ["SENS1:CORR:COLL:SHOR 2"]);
    }

    #[test]
    fn port_extension() {
        let mut vna = vna();
        vna.set_port(1).unwrap();
        let mut auto = vna.sense().correction().extension().auto();
        auto.measure(ExtensionStandard::Open).unwrap();
        auto.set_port_state(true).unwrap();
        assert!(auto.port_state().unwrap());
        assert_eq!(
            vna.transport().sent()[..2],
            ["SENS1:CORR:EXT:AUTO:MEAS OPEN", "SENS1:CORR:EXT:AUTO:PORT1 ON"]
        );
    }

    #[test]
    fn segment_table_payload() {
        let table = SegmentTable::new(
            SegmentMode::StartStop,
            vec![
                Segment::new(700e6, 750e6, 51).with_ifbw(1e3),
                Segment::new(800e6, 850e6, 101).with_ifbw(10e3),
            ],
        );
        assert!(table.ifbw && !table.power);
        assert_eq!(table.total_points(), 152);
        assert_eq!(
            table.encode().unwrap(),
            "5,0,1,0,0,0,2,700000000.0,750000000.0,51,1000.0,800000000.0,850000000.0,101,10000.0"
        );

        let mut partial = table.clone();
        partial.segments[1].ifbw = None;
        assert!(matches!(partial.encode(), Err(Error::InvalidArgument { .. })));
        assert!(SegmentTable::new(SegmentMode::CenterSpan, vec![]).encode().is_err());
    }

    #[test]
    fn segment_table_readback() {
        let mut vna = vna();
        let table = SegmentTable::new(
            SegmentMode::CenterSpan,
            vec![Segment::new(433e6, 10e6, 201).with_power(-10.0).with_sweep_time(0.01)],
        );
        vna.sense().segment().set_table(&table).unwrap();
        assert_eq!(vna.sense().segment().table().unwrap(), table);
        assert_eq!(
            vna.transport().sent()[0],
            "SENS1:SEGM:DATA 5,1,0,1,0,1,1,433000000.0,10000000.0,201,-10.0,0.01"
        );

        vna.transport_mut().respond("SENS1:SEGM:DATA?", "5,0,0,0,0,0,2,1E6,2E6,11");
        assert!(matches!(
            vna.sense().segment().table(),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn segment_list_control() {
        let mut vna = vna();
        vna.sense().segment().list().set_control(&[true, false, true]).unwrap();
        assert_eq!(vna.sense().segment().list().control().unwrap(), [true, false, true]);
        assert_eq!(vna.transport().sent()[0], "SENS1:SEGM:LIST:CONT:DATA 1,0,1");

        vna.transport_mut()
            .respond("SENS1:SEGM:SWE:POIN?", "152")
            .respond("SENS1:SEGM:SWE:TIME?", "0.125");
        assert_eq!(vna.sense().segment().sweep().points().unwrap(), 152);
        assert_eq!(vna.sense().segment().sweep().time().unwrap(), 0.125);
    }
}
