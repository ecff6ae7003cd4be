const DEFAULT_CHANNELS: u16 = 1;
const DEFAULT_SAMPLE_RATE: u32 = 22_050;
const DEFAULT_BITS_PER_SAMPLE: u16 = 16;

/// Linear PCM layout of a raw audio payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl AudioFormat {
    pub fn new(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample,
        }
    }

    /// Derives the format from a MIME descriptor such as
    /// `audio/L16;rate=24000;channels=1`.
    ///
    /// Never fails: any missing or malformed piece keeps its default
    /// (1 channel, 22050 Hz, 16 bits).
    pub fn from_mime(mime: &str) -> Self {
        let mut format = Self::default();
        let mut segments = mime.split(';').map(str::trim).peekable();

        // A bare parameter list (`rate=24000;channels=2`) has no essence.
        if let Some((_, subtype)) = segments
            .next_if(|first| first.contains('/'))
            .and_then(|essence| essence.split_once('/'))
        {
            if let Some(bits) = linear_pcm_bits(subtype.trim()) {
                format.bits_per_sample = bits;
            }
        }

        for segment in segments {
            let Some((key, value)) = segment.split_once('=') else {
                continue;
            };
            match key.trim() {
                "rate" => {
                    if let Some(rate) = parse_positive(value) {
                        format.sample_rate = rate;
                    }
                }
                "channels" => {
                    if let Some(channels) = parse_positive(value) {
                        format.channels = channels;
                    }
                }
                _ => {}
            }
        }

        format
    }

    pub fn byte_rate(&self) -> u32 {
        (u64::from(self.sample_rate) * u64::from(self.channels) * u64::from(self.bits_per_sample)
            / 8) as u32
    }

    pub fn block_align(&self) -> u16 {
        ((u32::from(self.channels) * u32::from(self.bits_per_sample)) / 8) as u16
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE, DEFAULT_BITS_PER_SAMPLE)
    }
}

// `L16`, `L24`, ... (RFC 3551 linear PCM subtypes).
fn linear_pcm_bits(subtype: &str) -> Option<u16> {
    let rest = subtype.strip_prefix('L')?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    parse_positive(&rest[..end])
}

fn parse_positive<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr + Default + PartialEq,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|v| *v != T::default())
}
