use super::{Protocol, TransportError};
use crate::config::{FlowControlSetting, ParitySetting, SerialSettings};
use serial::{SerialPort, SystemPort};
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub struct Serial {
    pub baud_rate: serial::BaudRate,
    pub data_bits: serial::CharSize,
    pub parity: serial::Parity,
    pub stop_bits: serial::StopBits,
    pub flow_control: serial::FlowControl,
}

impl Default for Serial {
    fn default() -> Self {
        Self {
            baud_rate: serial::Baud9600,
            data_bits: serial::Bits8,
            parity: serial::ParityNone,
            stop_bits: serial::Stop1,
            flow_control: serial::FlowNone,
        }
    }
}

impl Serial {
    /// Maps the board part of an `ASRL<board>::INSTR` resource to a device
    /// name. Numeric boards become `COM<n>` on Windows and `/dev/ttyS<n>`
    /// elsewhere; anything else is taken as a device path.
    pub fn port_name(board: &str) -> String {
        if !board.is_empty() && board.bytes().all(|b| b.is_ascii_digit()) {
            if cfg!(windows) {
                format!("COM{}", board)
            } else {
                format!("/dev/ttyS{}", board)
            }
        } else {
            board.to_string()
        }
    }

    fn configure<T: SerialPort>(self, port: &mut T) -> serial::Result<()> {
        port.reconfigure(&|settings| {
            settings.set_baud_rate(self.baud_rate)?;
            settings.set_char_size(self.data_bits);
            settings.set_parity(self.parity);
            settings.set_stop_bits(self.stop_bits);
            settings.set_flow_control(self.flow_control);
            Ok(())
        })
    }
}

fn invalid_setting(message: String) -> TransportError {
    TransportError::Serial(serial::Error::new(serial::ErrorKind::InvalidInput, message))
}

impl TryFrom<&SerialSettings> for Serial {
    type Error = TransportError;
    fn try_from(settings: &SerialSettings) -> Result<Self, Self::Error> {
        let data_bits = match settings.data_bits {
            5 => serial::Bits5,
            6 => serial::Bits6,
            7 => serial::Bits7,
            8 => serial::Bits8,
            other => return Err(invalid_setting(format!("unsupported data bits {}", other))),
        };
        let stop_bits = match settings.stop_bits {
            1 => serial::Stop1,
            2 => serial::Stop2,
            other => return Err(invalid_setting(format!("unsupported stop bits {}", other))),
        };
        let parity = match settings.parity {
            ParitySetting::None => serial::ParityNone,
            ParitySetting::Odd => serial::ParityOdd,
            ParitySetting::Even => serial::ParityEven,
        };
        let flow_control = match settings.flow_control {
            FlowControlSetting::None => serial::FlowNone,
            FlowControlSetting::Software => serial::FlowSoftware,
            FlowControlSetting::Hardware => serial::FlowHardware,
        };
        Ok(Self {
            baud_rate: serial::BaudRate::from_speed(settings.baud_rate),
            data_bits,
            parity,
            stop_bits,
            flow_control,
        })
    }
}

impl Protocol for Serial {
    type Address = String;
    type IO = SystemPort;
    fn connect(self, address: Self::Address, time_out: Duration) -> Result<Self::IO, TransportError> {
        let mut port = serial::open(&address)?;
        self.configure(&mut port)?;
        port.set_timeout(time_out)?;
        Ok(port)
    }
}
