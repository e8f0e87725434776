//! Enumerated parameters of the analyzer's command set.
//!
//! The first string of each variant is what goes on the wire; the others
//! are accepted as input aliases (case-insensitive).

use crate::scpi::scpi_enum;

scpi_enum! {
    /// Trace data display format.
    pub enum DataFormat("data format") {
        LogMagnitude => "MLOG" | "log_magnitude",
        Phase => "PHAS" | "phase",
        GroupDelay => "GDEL" | "group_delay",
        SmithLinear => "SLIN",
        SmithLog => "SLOG",
        SmithComplex => "SCOM",
        SmithRx => "SMIT",
        SmithGb => "SADM",
        PolarLinear => "PLIN",
        PolarLog => "PLOG",
        Polar => "POL",
        LinearMagnitude => "MLIN" | "linear_magnitude",
        Swr => "SWR",
        Real => "REAL",
        Imaginary => "IMAG",
        UnwrappedPhase => "UPH" | "unwrapped_phase",
    }
}

scpi_enum! {
    pub enum SParameter("S-parameter") {
        S11 => "S11",
        S12 => "S12",
        S13 => "S13",
        S14 => "S14",
        S21 => "S21",
        S22 => "S22",
        S23 => "S23",
        S24 => "S24",
        S31 => "S31",
        S32 => "S32",
        S33 => "S33",
        S34 => "S34",
        S41 => "S41",
        S42 => "S42",
        S43 => "S43",
        S44 => "S44",
    }
}

scpi_enum! {
    /// Calibration standard addressed by the context.
    pub enum CalStandard("calibration standard") {
        Open => "OPEN",
        Short => "SHOR" | "short",
        Load => "LOAD",
        Thru => "THRU",
    }
}

scpi_enum! {
    /// Electrical delay media.
    pub enum MediaType("media type") {
        Coaxial => "COAX" | "coaxial",
        Waveguide => "WAVE" | "waveguide",
    }
}

scpi_enum! {
    pub enum DistanceUnit("distance unit") {
        Meter => "MET" | "meter" | "meters",
        Feet => "FEET",
        Inch => "INCH" | "inches",
    }
}

scpi_enum! {
    /// Time-domain gate type.
    pub enum GateType("gate type") {
        Bandpass => "BPAS" | "bandpass",
        Notch => "NOTC" | "notch",
    }
}

scpi_enum! {
    pub enum GateShape("gate shape") {
        Maximum => "MAX" | "maximum",
        Wide => "WIDE",
        Normal => "NORM" | "normal",
        Minimum => "MIN" | "minimum",
    }
}

scpi_enum! {
    pub enum ConversionFunction("conversion function") {
        ImpedanceReflection => "ZREF",
        ImpedanceTransmission => "ZTR",
        AdmittanceReflection => "YREF",
        AdmittanceTransmission => "YTR",
        Inverse => "INV" | "inverse",
        ImpedanceThruShunt => "ZTSH",
        AdmittanceThruShunt => "YTSH",
        Conjugate => "CONJ" | "conjugate",
    }
}

scpi_enum! {
    /// Limit line kind; the instrument uses digits for these.
    pub enum LimitType("limit type") {
        Off => "0" | "off",
        Maximum => "1" | "maximum" | "max",
        Minimum => "2" | "minimum" | "min",
        Single => "3" | "single",
    }
}

scpi_enum! {
    pub enum BandwidthReference("bandwidth reference") {
        Marker => "MARK" | "marker",
        Maximum => "MAX" | "maximum",
        Minimum => "MIN" | "minimum",
    }
}

scpi_enum! {
    pub enum BandwidthType("bandwidth type") {
        Bandpass => "BPAS" | "bandpass",
        Notch => "NOTC" | "notch",
    }
}

scpi_enum! {
    /// Marker search function.
    pub enum SearchType("search type") {
        Maximum => "MAX" | "maximum",
        Minimum => "MIN" | "minimum",
        Peak => "PEAK",
        LeftPeak => "LPE" | "leftpeak",
        RightPeak => "RPE" | "rightpeak",
        Target => "TARG" | "target",
        LeftTarget => "LTAR" | "lefttarget" | "leftarget",
        RightTarget => "RTAR" | "righttarget",
    }
}

scpi_enum! {
    /// Quick marker placement.
    pub enum MarkerLocation("marker location") {
        Start => "STAR" | "start",
        Stop => "STOP",
        Center => "CENT" | "center",
        ReferenceLevel => "RLEV" | "ref_level",
        Delay => "DEL" | "delay",
        ReferenceMarker => "RMAR" | "ref_marker",
        Span => "SPAN",
    }
}

scpi_enum! {
    pub enum TriggerSource("trigger source") {
        Internal => "INT" | "internal",
        External => "EXT" | "external",
        Manual => "MAN" | "manual",
        Bus => "BUS",
    }
}

scpi_enum! {
    pub enum TriggerScope("trigger scope") {
        Active => "ACT" | "active",
        All => "ALL",
    }
}

scpi_enum! {
    pub enum SweepType("sweep type") {
        Linear => "LIN" | "linear",
        Logarithmic => "LOG" | "logarithmic",
        Segment => "SEGM" | "segment",
        Power => "POW" | "power",
    }
}

scpi_enum! {
    /// How segment table rows give their frequency range.
    pub enum SegmentMode("segment mode") {
        StartStop => "0" | "start_stop",
        CenterSpan => "1" | "center_span",
    }
}

scpi_enum! {
    /// What `MMEM:STOR` saves along with the setup.
    pub enum StateType("state type") {
        State => "STAT" | "state",
        CalibrationState => "CST" | "cal_n_state",
        DataState => "DST" | "data_n_state",
        CalibrationDataState => "CDST" | "cal_data_n_state",
    }
}

scpi_enum! {
    /// Standard measured by automatic port extension.
    pub enum ExtensionStandard("port extension standard") {
        Open => "OPEN",
        Short => "SHOR" | "short",
    }
}

scpi_enum! {
    /// Calibration type selected before collecting standards.
    pub enum CalibrationMethod("calibration method") {
        Response => "ERES" | "eres",
        Open => "OPEN",
        Short => "SHORT",
        Thru => "THRU",
        OnePort => "SOLT1" | "1port",
        TwoPort => "SOLT2" | "2port",
        ThreePort => "SOLT3" | "3port",
        FourPort => "SOLT4" | "4port",
    }
}

impl CalibrationMethod {
    /// Number of ports the method takes.
    pub fn port_count(self) -> usize {
        match self {
            CalibrationMethod::Open | CalibrationMethod::Short | CalibrationMethod::OnePort => 1,
            CalibrationMethod::Thru | CalibrationMethod::TwoPort | CalibrationMethod::Response => 2,
            CalibrationMethod::ThreePort => 3,
            CalibrationMethod::FourPort => 4,
        }
    }
}

scpi_enum! {
    /// Electronic calibration module method.
    pub enum EcalType("ECal type") {
        OnePort => "SOLT1" | "1port",
        TwoPort => "SOLT2" | "2port",
        ThreePort => "SOLT3" | "3port",
        FourPort => "SOLT4" | "4port",
    }
}

impl EcalType {
    pub fn port_count(self) -> usize {
        match self {
            EcalType::OnePort => 1,
            EcalType::TwoPort => 2,
            EcalType::ThreePort => 3,
            EcalType::FourPort => 4,
        }
    }
}

scpi_enum! {
    /// Channel window arrangement; also accepted as its index 1-15.
    #[allow(non_camel_case_types)]
    pub enum WindowLayout("window layout") {
        D1 => "D1" | "1",
        D12 => "D12" | "2",
        D1_2 => "D1_2" | "3",
        D123 => "D123" | "4",
        D1_2_3 => "D1_2_3" | "5",
        D11_23 => "D11_23" | "6",
        D12_34 => "D12_34" | "7",
        D1_2_3_4 => "D1_2_3_4" | "8",
        D123_456 => "D123_456" | "9",
        D12_34_56 => "D12_34_56" | "10",
        D1234_5678 => "D1234_5678" | "11",
        D123_456_789 => "D123_456_789" | "12",
        D1234_5678_9ABC => "D1234_5678_9ABC" | "13",
        D123_456_789_ABC => "D123_456_789_ABC" | "14",
        D1234__CDEF => "D1234__CDEF" | "15",
    }
}

impl WindowLayout {
    /// Layout by its 1-based index.
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}
