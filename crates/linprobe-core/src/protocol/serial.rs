//! Serial port handling
//!
//! Low-level access to the UART adapter used to tap the bus. Everything
//! here takes the baud rate explicitly: during discovery the same device is
//! reopened dozens of times at different trial rates.

use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::collections::HashMap;
#[cfg(target_os = "linux")]
use std::fs;
use std::time::Duration;

use super::TransportError;

/// Information about an available serial port
#[derive(Debug, Clone)]
pub struct PortInfo {
    /// Port name (e.g., "/dev/ttyUSB0" or "COM3")
    pub name: String,

    /// USB vendor ID (if USB device)
    pub vid: Option<u16>,

    /// USB product ID (if USB device)
    pub pid: Option<u16>,

    /// Product name (if available)
    pub product: Option<String>,
}

impl From<SerialPortInfo> for PortInfo {
    fn from(info: SerialPortInfo) -> Self {
        let (vid, pid, product) = match info.port_type {
            SerialPortType::UsbPort(usb_info) => {
                (Some(usb_info.vid), Some(usb_info.pid), usb_info.product)
            }
            _ => (None, None, None),
        };

        Self {
            name: info.port_name,
            vid,
            pid,
            product,
        }
    }
}

/// Sort key so ttyACM* ports come first (numerically), then ttyUSB*, then
/// everything else by name.
fn port_sort_key(name: &str) -> (u8, usize, String) {
    let basename = name.rsplit('/').next().unwrap_or(name);
    if let Some(rest) = basename.strip_prefix("ttyACM") {
        let num = rest.parse::<usize>().unwrap_or(usize::MAX);
        return (0, num, basename.to_string());
    }
    if let Some(rest) = basename.strip_prefix("ttyUSB") {
        let num = rest.parse::<usize>().unwrap_or(usize::MAX);
        return (1, num, basename.to_string());
    }
    (2, 0, basename.to_string())
}

/// List all available serial ports, with /dev fallbacks and deterministic
/// ordering. Finding an unidentified bus starts with finding the adapter.
pub fn list_ports() -> Vec<PortInfo> {
    let mut map: HashMap<String, PortInfo> = HashMap::new();
    for info in serialport::available_ports()
        .unwrap_or_default()
        .into_iter()
    {
        let p = PortInfo::from(info);
        map.entry(p.name.clone()).or_insert(p);
    }

    // Linux-only: USB serial adapters sometimes miss the enumeration API
    // but still exist as device nodes.
    #[cfg(target_os = "linux")]
    if let Ok(entries) = fs::read_dir("/dev") {
        for entry in entries.flatten() {
            if let Some(fname) = entry.file_name().to_str() {
                if fname.starts_with("ttyACM") || fname.starts_with("ttyUSB") {
                    let full = format!("/dev/{}", fname);
                    map.entry(full.clone()).or_insert_with(|| PortInfo {
                        name: full,
                        vid: None,
                        pid: None,
                        product: None,
                    });
                }
            }
        }
    }

    let mut v: Vec<PortInfo> = map.into_values().collect();
    v.sort_by_key(|p| port_sort_key(&p.name));
    v
}

/// Open a serial port at an explicit baud rate and read timeout.
///
/// LIN itself tops out around 20 kbit/s, but sweep trials go through the
/// same path, so no rate validation happens here beyond rejecting zero.
pub fn open_port(
    name: &str,
    baud: u32,
    read_timeout: Duration,
) -> Result<Box<dyn SerialPort>, TransportError> {
    if baud == 0 {
        return Err(TransportError::InvalidRate(baud));
    }

    serialport::new(name, baud)
        .timeout(read_timeout)
        .open()
        .map_err(|e| TransportError::OpenFailed {
            port: name.to_string(),
            baud,
            reason: e.to_string(),
        })
}

/// Configure a port for LIN listening: 8N1, no flow control.
///
/// The LIN data link is a plain UART byte stream; break detection is not
/// available through this API and is not needed for passive recovery.
pub fn configure_port(port: &mut dyn SerialPort) -> Result<(), TransportError> {
    port.set_data_bits(serialport::DataBits::Eight)
        .map_err(|e| TransportError::SerialError(e.to_string()))?;
    port.set_parity(serialport::Parity::None)
        .map_err(|e| TransportError::SerialError(e.to_string()))?;
    port.set_stop_bits(serialport::StopBits::One)
        .map_err(|e| TransportError::SerialError(e.to_string()))?;
    port.set_flow_control(serialport::FlowControl::None)
        .map_err(|e| TransportError::SerialError(e.to_string()))?;
    Ok(())
}

/// Clear the serial port buffers. Stale bytes from a previous trial rate
/// would otherwise leak into the next sample.
pub fn clear_buffers(port: &mut dyn SerialPort) -> Result<(), TransportError> {
    port.clear(serialport::ClearBuffer::All)
        .map_err(|e| TransportError::SerialError(e.to_string()))
}
