// kcard/src/transport/mock.rs

use crate::transport::traits::Transceiver;
use crate::{Error, Result};

/// Mock transceiver for unit tests. It records sent command APDUs and
/// returns queued responses in order; an empty queue yields `Timeout`,
/// which tests use to simulate the card leaving the field.
#[derive(Debug, Default)]
pub struct MockTransceiver {
    pub sent: Vec<Vec<u8>>,
    pub responses: Vec<Vec<u8>>,
    pub connected: bool,
    /// Number of connect calls that should fail (for tests).
    pub connect_failures: usize,
}

impl MockTransceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many subsequent connect calls should fail (for tests).
    pub fn set_connect_failures(&mut self, n: usize) {
        self.connect_failures = n;
    }

    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push(resp);
    }

    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }
}

impl Transceiver for MockTransceiver {
    fn connect(&mut self) -> Result<()> {
        if self.connect_failures > 0 {
            self.connect_failures -= 1;
            return Err(Error::Transport("connect failed".to_string()));
        }
        self.connected = true;
        Ok(())
    }

    fn exchange(&mut self, command: &[u8], _timeout_ms: u64) -> Result<Vec<u8>> {
        self.sent.push(command.to_vec());
        if self.responses.is_empty() {
            Err(Error::Timeout)
        } else {
            Ok(self.responses.remove(0))
        }
    }

    fn close(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }
}
