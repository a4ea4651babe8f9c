//! Hardware serial port source backed by the `serialport` crate.

use std::io::{ErrorKind, Read};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use super::ByteSource;
use crate::config::{FlowControlSetting, ParitySetting, SerialConfig};
use crate::error::SerialError;

/// Upper bound for a single read
const MAX_CHUNK: usize = 4096;

/// An open serial port, used read-only
pub struct SerialPortSource {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialPortSource {
    /// Open the configured port with its fixed line settings
    pub fn open(config: &SerialConfig) -> Result<Self, SerialError> {
        let port = serialport::new(&config.port, config.baud_rate)
            .data_bits(data_bits(config.data_bits)?)
            .parity(parity(config.parity))
            .stop_bits(stop_bits(config.stop_bits)?)
            .flow_control(flow_control(config.flow_control))
            .timeout(Duration::from_millis(10))
            .open()
            .map_err(|source| SerialError::OpenFailed {
                port: config.port.clone(),
                source,
            })?;

        tracing::info!(
            port = %config.port,
            baud_rate = config.baud_rate,
            "serial port opened"
        );

        Ok(Self {
            port,
            name: config.port.clone(),
        })
    }

    fn read_failed(&self, message: impl ToString) -> SerialError {
        SerialError::ReadFailed {
            port: self.name.clone(),
            message: message.to_string(),
        }
    }
}

impl ByteSource for SerialPortSource {
    fn try_read_chunk(&mut self) -> Result<Option<Vec<u8>>, SerialError> {
        let available = self
            .port
            .bytes_to_read()
            .map_err(|e| self.read_failed(e))? as usize;
        if available == 0 {
            return Ok(None);
        }

        let mut chunk = vec![0u8; available.min(MAX_CHUNK)];
        match self.port.read(&mut chunk) {
            Ok(0) => Ok(None),
            Ok(n) => {
                chunk.truncate(n);
                tracing::trace!(bytes = n, "serial chunk received");
                Ok(Some(chunk))
            }
            Err(e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => {
                Ok(None)
            }
            Err(e) => Err(self.read_failed(e)),
        }
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

impl Drop for SerialPortSource {
    fn drop(&mut self) {
        tracing::info!(port = %self.name, "serial port closed");
    }
}

/// Names of the serial ports present on this machine
pub fn list_ports() -> Result<Vec<String>, SerialError> {
    let ports = serialport::available_ports().map_err(|e| SerialError::ReadFailed {
        port: "<enumeration>".to_string(),
        message: e.to_string(),
    })?;

    Ok(ports
        .into_iter()
        .map(|p| match p.port_type {
            serialport::SerialPortType::UsbPort(info) => format!(
                "{} (USB {:04x}:{:04x}{})",
                p.port_name,
                info.vid,
                info.pid,
                info.product.map(|name| format!(" {}", name)).unwrap_or_default()
            ),
            serialport::SerialPortType::BluetoothPort => format!("{} (Bluetooth)", p.port_name),
            serialport::SerialPortType::PciPort => format!("{} (PCI)", p.port_name),
            serialport::SerialPortType::Unknown => p.port_name,
        })
        .collect())
}

fn data_bits(bits: u8) -> Result<DataBits, SerialError> {
    match bits {
        5 => Ok(DataBits::Five),
        6 => Ok(DataBits::Six),
        7 => Ok(DataBits::Seven),
        8 => Ok(DataBits::Eight),
        other => Err(SerialError::UnsupportedSetting(format!("{} data bits", other))),
    }
}

fn stop_bits(bits: u8) -> Result<StopBits, SerialError> {
    match bits {
        1 => Ok(StopBits::One),
        2 => Ok(StopBits::Two),
        other => Err(SerialError::UnsupportedSetting(format!("{} stop bits", other))),
    }
}

impl From<ParitySetting> for Parity {
    fn from(value: ParitySetting) -> Self {
        match value {
            ParitySetting::None => Parity::None,
            ParitySetting::Odd => Parity::Odd,
            ParitySetting::Even => Parity::Even,
        }
    }
}

impl From<FlowControlSetting> for FlowControl {
    fn from(value: FlowControlSetting) -> Self {
        match value {
            FlowControlSetting::None => FlowControl::None,
            FlowControlSetting::Software => FlowControl::Software,
            FlowControlSetting::Hardware => FlowControl::Hardware,
        }
    }
}

fn parity(setting: ParitySetting) -> Parity {
    setting.into()
}

fn flow_control(setting: FlowControlSetting) -> FlowControl {
    setting.into()
}
