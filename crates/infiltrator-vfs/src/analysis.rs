//! Scripted analysis of network configuration files.
//!
//! Each `analyze` pass consumes one attempt and reveals a little more; the
//! last attempt dumps the raw bytes.

use crate::hexdump;

/// Analysis passes available per network configuration file.
pub const MAX_ANALYSIS_ATTEMPTS: u8 = 3;

/// Result of one analysis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// The file is not a network configuration.
    NotAnalyzable,
    /// Every attempt has been used.
    Exhausted,
    /// A report for the attempt just consumed.
    Report(String),
}

/// Per-file analysis state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    attempts: u8,
}

impl NetworkConfig {
    pub fn new() -> Self {
        Self {
            attempts: MAX_ANALYSIS_ATTEMPTS,
        }
    }

    pub fn remaining(&self) -> u8 {
        self.attempts
    }

    pub(crate) fn analyze(&mut self, content: &str) -> Analysis {
        if self.attempts == 0 {
            return Analysis::Exhausted;
        }
        self.attempts -= 1;
        log::debug!("network analysis pass, {} left", self.attempts);
        Analysis::Report(report(self.attempts, content))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The report shown once `remaining` attempts are left.
fn report(remaining: u8, content: &str) -> String {
    match remaining {
        2 => "=== Network Analysis Tool v2.1 ===\n\
              Scanning visible network nodes...\n\
              \n\
              Known Nodes:\n\
              - Primary (0A:00:01:2A)\n\
              - Backup (0A:00:01:42)\n\
              \n\
              Anomaly Detected: Additional MAC address found\n\
              C0:A8:01:64 - No registered hostname\n\
              \n\
              Note: Use 'hexdump' command for raw data analysis"
            .to_string(),
        1 => "=== Network Analysis Tool v2.1 ===\n\
              Performing deep scan...\n\
              \n\
              MAC Address Translation:\n\
              C0:A8:01:64 → 192.168.1.100\n\
              \n\
              Port Scan Results:\n\
              192.168.1.100:444 [FILTERED]\n\
              \n\
              Warning: Connection attempts being logged"
            .to_string(),
        _ => format!(
            "{}\nAnalysis complete. No further attempts allowed.\n\
             Tip: Some servers require non-standard ports for SSH connections.",
            hexdump::canonical(content.as_bytes())
        ),
    }
}

/// Visible text of the stock network configuration file.
pub(crate) const NETWORK_CONFIG_TEXT: &str = "Server Information:\n\
=============================\n\
Primary Server\n\
Address: ***.***.***.***\n\
Username: user\n\
Port: 8080\n\
Status: Active\n\
\n\
Backup Server\n\
Address: 10.0.1.42\n\
Username: backup_admin\n\
Port: 22\n\
Status: Standby\n\
\n\
Network Map:\n\
0A:00:01:2A → Primary\n\
C0:A8:01:64 → Unknown\n\
0A:00:01:42 → Backup\n\
\n\
[NOTE: Run analysis for full system map]";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_distinct_reports_then_exhausted() {
        let mut net = NetworkConfig::new();
        let mut reports = Vec::new();
        for _ in 0..3 {
            match net.analyze(NETWORK_CONFIG_TEXT) {
                Analysis::Report(text) => reports.push(text),
                other => panic!("expected report, got {other:?}"),
            }
        }
        assert_ne!(reports[0], reports[1]);
        assert_ne!(reports[1], reports[2]);
        assert!(reports[0].contains("Anomaly Detected"));
        assert!(reports[1].contains("192.168.1.100:444"));
        assert!(reports[2].contains("No further attempts allowed"));
        assert_eq!(net.analyze(NETWORK_CONFIG_TEXT), Analysis::Exhausted);
        assert_eq!(net.remaining(), 0);
    }

    #[test]
    fn attempts_never_underflow() {
        let mut net = NetworkConfig::new();
        for _ in 0..10 {
            net.analyze("x");
        }
        assert_eq!(net.remaining(), 0);
    }

    #[test]
    fn final_report_dumps_content() {
        let mut net = NetworkConfig::new();
        net.analyze("AB");
        net.analyze("AB");
        match net.analyze("AB") {
            Analysis::Report(text) => assert!(text.starts_with("00000000  41 42")),
            other => panic!("expected report, got {other:?}"),
        }
    }
}
