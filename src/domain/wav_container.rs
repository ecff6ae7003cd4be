use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::AudioFormat;

pub const WAV_HEADER_LEN: usize = 44;

const RIFF_ID: &[u8; 4] = b"RIFF";
const WAVE_ID: &[u8; 4] = b"WAVE";
const FMT_ID: &[u8; 4] = b"fmt ";
const DATA_ID: &[u8; 4] = b"data";
const FMT_CHUNK_LEN: u32 = 16;
const PCM_FORMAT_TAG: u16 = 1;
// Bytes of the RIFF chunk that follow the size field, excluding the samples.
const RIFF_OVERHEAD: u32 = 36;

/// A canonical 44-byte RIFF/WAVE header followed by linear PCM samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavContainer(Bytes);

impl WavContainer {
    /// Wraps raw PCM whose layout is described by a provider MIME type,
    /// e.g. `audio/L16;rate=24000;channels=1`.
    pub fn encode(pcm: &[u8], mime_type: &str) -> Self {
        Self::from_pcm(pcm, &AudioFormat::from_mime(mime_type))
    }

    pub fn from_pcm(pcm: &[u8], format: &AudioFormat) -> Self {
        let mut buf = BytesMut::with_capacity(WAV_HEADER_LEN + pcm.len());
        buf.put_slice(&header(data_len(pcm), format));
        buf.put_slice(pcm);
        Self(buf.freeze())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn header(&self) -> WavHeader {
        // Always constructed with a well-formed header.
        WavHeader::read(&self.0).unwrap_or_default()
    }

    pub fn samples(&self) -> &[u8] {
        &self.0[WAV_HEADER_LEN..]
    }
}

/// Builds the 44-byte header for `data_len` bytes of PCM. All multi-byte
/// fields are little-endian regardless of host.
pub fn header(data_len: u32, format: &AudioFormat) -> [u8; WAV_HEADER_LEN] {
    let mut out = [0u8; WAV_HEADER_LEN];
    let mut buf = &mut out[..];

    buf.put_slice(RIFF_ID);
    buf.put_u32_le(RIFF_OVERHEAD.saturating_add(data_len));
    buf.put_slice(WAVE_ID);

    buf.put_slice(FMT_ID);
    buf.put_u32_le(FMT_CHUNK_LEN);
    buf.put_u16_le(PCM_FORMAT_TAG);
    buf.put_u16_le(format.channels);
    buf.put_u32_le(format.sample_rate);
    buf.put_u32_le(format.byte_rate());
    buf.put_u16_le(format.block_align());
    buf.put_u16_le(format.bits_per_sample);

    buf.put_slice(DATA_ID);
    buf.put_u32_le(data_len);

    out
}

/// Decoded fields of a canonical WAV header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WavHeader {
    pub chunk_size: u32,
    pub format_tag: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_len: u32,
}

impl WavHeader {
    /// Returns `None` unless `bytes` starts with a canonical PCM header.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < WAV_HEADER_LEN {
            return None;
        }
        let mut buf = &bytes[..WAV_HEADER_LEN];

        if !take_tag(&mut buf, RIFF_ID) {
            return None;
        }
        let chunk_size = buf.get_u32_le();
        if !take_tag(&mut buf, WAVE_ID) || !take_tag(&mut buf, FMT_ID) {
            return None;
        }
        if buf.get_u32_le() != FMT_CHUNK_LEN {
            return None;
        }
        let format_tag = buf.get_u16_le();
        let channels = buf.get_u16_le();
        let sample_rate = buf.get_u32_le();
        let byte_rate = buf.get_u32_le();
        let block_align = buf.get_u16_le();
        let bits_per_sample = buf.get_u16_le();
        if !take_tag(&mut buf, DATA_ID) {
            return None;
        }
        let data_len = buf.get_u32_le();

        Some(Self {
            chunk_size,
            format_tag,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
            data_len,
        })
    }

    pub fn format(&self) -> AudioFormat {
        AudioFormat::new(self.channels, self.sample_rate, self.bits_per_sample)
    }
}

fn take_tag(buf: &mut &[u8], tag: &[u8; 4]) -> bool {
    let matches = buf.starts_with(tag);
    buf.advance(4);
    matches
}

// RIFF sizes are 32-bit; larger payloads saturate rather than wrap.
fn data_len(pcm: &[u8]) -> u32 {
    u32::try_from(pcm.len())
        .unwrap_or(u32::MAX)
        .min(u32::MAX - RIFF_OVERHEAD)
}
