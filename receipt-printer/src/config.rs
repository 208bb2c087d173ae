//! Construction-time configuration
//!
//! ```
//! use receipt_printer::{PaperWidth, SessionConfig};
//!
//! let config = SessionConfig::from_json(r#"{"paper": 58, "chinese_mode": true}"#).unwrap();
//! assert_eq!(config.paper, PaperWidth::Mm58);
//! assert_eq!(config.metrics().max_chars_per_line, 32);
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::{PrintError, PrintResult};
use crate::network::NetworkPrinter;
use crate::state::{PageMetrics, PaperWidth};

fn default_timeout_ms() -> u64 {
    5000
}

/// Raw TCP printer address
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkConfig {
    /// Socket address, e.g. "192.168.1.100:9100"; a bare IP means port 9100
    pub addr: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Session settings, fixed once the session is created
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Paper roll width in millimetres (58 or 80)
    pub paper: PaperWidth,
    /// Send FS & after every `begin`, for printers that need Chinese mode
    /// switched on before GB18030 text
    pub chinese_mode: bool,
    /// Printer socket, for sessions printing over TCP
    pub network: Option<NetworkConfig>,
}

impl SessionConfig {
    pub fn new(paper: PaperWidth) -> Self {
        Self {
            paper,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> PrintResult<Self> {
        serde_json::from_str(json).map_err(|e| PrintError::InvalidConfig(e.to_string()))
    }

    pub fn metrics(&self) -> PageMetrics {
        self.paper.metrics()
    }

    /// Network printer for the configured address, if any
    pub fn network_printer(&self) -> PrintResult<Option<NetworkPrinter>> {
        self.network
            .as_ref()
            .map(|net| {
                NetworkPrinter::parse(&net.addr)
                    .map(|p| p.with_timeout(Duration::from_millis(net.timeout_ms)))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config.paper, PaperWidth::Mm80);
        assert!(!config.chinese_mode);
        assert!(config.network_printer().unwrap().is_none());
    }

    #[test]
    fn test_unknown_paper_width() {
        let err = SessionConfig::from_json(r#"{"paper": 76}"#).unwrap_err();
        assert!(matches!(err, PrintError::InvalidConfig(msg) if msg.contains("76")));
    }

    #[test]
    fn test_network_printer() {
        let config =
            SessionConfig::from_json(r#"{"network": {"addr": "192.168.1.100:9100", "timeout_ms": 800}}"#)
                .unwrap();
        let printer = config.network_printer().unwrap().unwrap();
        assert_eq!(printer.addr().port(), 9100);
        assert_eq!(printer.timeout(), Duration::from_millis(800));
    }

    #[test]
    fn test_network_bare_ip_default_timeout() {
        let config = SessionConfig::from_json(r#"{"network": {"addr": "10.0.0.7"}}"#).unwrap();
        let printer = config.network_printer().unwrap().unwrap();
        assert_eq!(printer.addr().port(), 9100);
        assert_eq!(printer.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_bad_network_addr() {
        let config = SessionConfig::from_json(r#"{"network": {"addr": "printer"}}"#).unwrap();
        assert!(matches!(
            config.network_printer(),
            Err(PrintError::InvalidConfig(_))
        ));
    }
}
