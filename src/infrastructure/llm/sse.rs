/// Incremental decoder for `text/event-stream` bodies. Network chunks may
/// split lines anywhere, including inside a multi-byte character, so raw
/// bytes are buffered and only completed lines are decoded.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
}

impl SseDecoder {
    /// Feeds raw bytes and returns the `data` payloads of every event that
    /// was completed by them.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if !self.data.is_empty() {
                    events.push(self.data.join("\n"));
                    self.data.clear();
                }
            } else if let Some(payload) = line.strip_prefix("data:") {
                self.data.push(payload.trim_start().to_string());
            }
        }
        events
    }

    /// Flushes an event left open when the stream ended without a blank line.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        let rest = String::from_utf8_lossy(&rest);
        if let Some(payload) = rest.trim_end().strip_prefix("data:") {
            self.data.push(payload.trim_start().to_string());
        }
        if self.data.is_empty() {
            None
        } else {
            let event = self.data.join("\n");
            self.data.clear();
            Some(event)
        }
    }
}
