/// IEEE-488.2 common command headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Common {
    ///Identification
    IDN,
    ///Operation complete
    OPC,
    ///Reset
    RST,
    ///Clear status
    CLS,
}

impl Common {
    pub fn header(self) -> &'static str {
        match self {
            Common::IDN => "*IDN",
            Common::OPC => "*OPC",
            Common::RST => "*RST",
            Common::CLS => "*CLS",
        }
    }
}

impl std::fmt::Display for Common {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}
