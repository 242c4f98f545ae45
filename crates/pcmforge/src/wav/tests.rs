//! Tests for the WAV format module.

use pretty_assertions::assert_eq;

use super::format::{BitDepth, SampleFormat, WavFormat};
use super::header::{WavHeader, HEADER_LEN};
use super::pcm::{compute_pcm_hash, extract_pcm_data, pcm_hash};
use crate::error::StreamError;

// =========================================================================
// WavFormat construction tests
// =========================================================================

#[test]
fn test_wav_format_new_accepts_supported_layouts() {
    for &(bits, channels) in &[(8, 1), (8, 2), (16, 1), (16, 2)] {
        let format = WavFormat::new(44100, bits, channels).unwrap();
        assert_eq!(format.bits_per_sample(), bits);
        assert_eq!(format.channels, channels);
    }
}

#[test]
fn test_wav_format_rejects_bad_parameters() {
    assert!(matches!(
        WavFormat::new(0, 16, 1),
        Err(StreamError::InvalidSampleRate { rate: 0 })
    ));
    assert!(matches!(
        WavFormat::new(8000, 24, 1),
        Err(StreamError::UnsupportedBitDepth { bits: 24 })
    ));
    assert!(matches!(
        WavFormat::new(8000, 16, 3),
        Err(StreamError::UnsupportedChannelCount { channels: 3 })
    ));
    assert!(matches!(
        WavFormat::new(8000, 16, 0),
        Err(StreamError::UnsupportedChannelCount { channels: 0 })
    ));
}

#[test]
fn test_wav_format_rejects_rate_whose_byte_rate_overflows() {
    assert!(matches!(
        WavFormat::new(2_000_000_000, 16, 2),
        Err(StreamError::InvalidSampleRate {
            rate: 2_000_000_000
        })
    ));
    assert!(matches!(
        WavFormat::new(1 << 30, 16, 2),
        Err(StreamError::InvalidSampleRate { .. })
    ));

    // Largest rates whose byte rate still fits the header field.
    let format = WavFormat::new((1 << 30) - 1, 16, 2).unwrap();
    assert_eq!(format.byte_rate(), u32::MAX - 3);
    let format = WavFormat::new(u32::MAX, 8, 1).unwrap();
    assert_eq!(format.byte_rate(), u32::MAX);
}

// =========================================================================
// Bytes calculation tests
// =========================================================================

#[test]
fn test_block_align_is_bytes_per_frame() {
    assert_eq!(WavFormat::mono(44100, BitDepth::Eight).block_align(), 1);
    assert_eq!(WavFormat::stereo(44100, BitDepth::Eight).block_align(), 2);
    assert_eq!(WavFormat::mono(44100, BitDepth::Sixteen).block_align(), 2);
    assert_eq!(WavFormat::stereo(44100, BitDepth::Sixteen).block_align(), 4);
}

#[test]
fn test_byte_rate() {
    // 44100 frames/sec * 2 channels * 2 bytes
    assert_eq!(
        WavFormat::stereo(44100, BitDepth::Sixteen).byte_rate(),
        176400
    );
    assert_eq!(WavFormat::mono(8000, BitDepth::Eight).byte_rate(), 8000);
}

#[test]
fn test_frames_for_rounds_to_nearest() {
    let format = WavFormat::mono(41000, BitDepth::Sixteen);
    assert_eq!(format.frames_for(0.5), 20500);
    assert_eq!(format.frames_for(0.0), 0);

    let format = WavFormat::mono(3, BitDepth::Sixteen);
    // 3 * 0.5 = 1.5 rounds away from zero
    assert_eq!(format.frames_for(0.5), 2);
    // 3 * 0.1 = 0.3 rounds down
    assert_eq!(format.frames_for(0.1), 0);
}

// =========================================================================
// Quantization tests
// =========================================================================

#[test]
fn test_quantize_16_bit() {
    let f = SampleFormat::S16;
    assert_eq!(f.quantize(0.0), 0);
    assert_eq!(f.quantize(1.0), 32767);
    assert_eq!(f.quantize(-1.0), -32767);
    assert_eq!(f.quantize(0.5), 16384);
}

#[test]
fn test_quantize_8_bit_is_centered_at_127() {
    let f = SampleFormat::U8;
    assert_eq!(f.quantize(0.0), 127);
    assert_eq!(f.quantize(1.0), 254);
    assert_eq!(f.quantize(-1.0), 0);
    assert_eq!(f.neutral(), 127);
}

#[test]
fn test_quantize_saturates_out_of_range() {
    assert_eq!(SampleFormat::S16.quantize(2.0), 32767);
    assert_eq!(SampleFormat::S16.quantize(-2.0), -32768);
    assert_eq!(SampleFormat::U8.quantize(3.0), 255);
    assert_eq!(SampleFormat::U8.quantize(-3.0), 0);
}

#[test]
fn test_encode_decode_sample_bytes() {
    let mut out = Vec::new();
    SampleFormat::S16.encode(-2, &mut out);
    assert_eq!(out, vec![0xFE, 0xFF]);
    assert_eq!(SampleFormat::S16.decode(&out), -2);

    let mut out = Vec::new();
    SampleFormat::U8.encode(200, &mut out);
    assert_eq!(out, vec![200]);
    assert_eq!(SampleFormat::U8.decode(&out), 200);
}

// =========================================================================
// Header tests
// =========================================================================

#[test]
fn test_header_layout() {
    let format = WavFormat::mono(8000, BitDepth::Sixteen);
    let bytes = WavHeader::for_payload(&format, 16000).to_bytes();

    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 36 + 16000);
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(&bytes[12..16], b"fmt ");
    assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
    assert_eq!(u16::from_le_bytes([bytes[20], bytes[21]]), 1);
    assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 1);
    assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 8000);
    assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 16000);
    assert_eq!(u16::from_le_bytes([bytes[32], bytes[33]]), 2);
    assert_eq!(u16::from_le_bytes([bytes[34], bytes[35]]), 16);
    assert_eq!(&bytes[36..40], b"data");
    assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), 16000);
}

#[test]
fn test_header_counts_pad_byte_for_odd_payload() {
    let format = WavFormat::mono(8000, BitDepth::Eight);
    let header = WavHeader::for_payload(&format, 7);
    assert_eq!(header.data_size, 7);
    assert_eq!(header.riff_size, 36 + 7 + 1);
}

#[test]
fn test_header_read_back() {
    let format = WavFormat::stereo(22050, BitDepth::Eight);
    let header = WavHeader::for_payload(&format, 882);
    let bytes = header.to_bytes();

    let parsed = WavHeader::read(&mut &bytes[..]).unwrap();
    assert_eq!(parsed, header);
    assert_eq!(parsed.format().unwrap(), format);
    assert_eq!(parsed.frame_count(), 441);
}

#[test]
fn test_header_read_rejects_wrong_magic() {
    let mut bytes = WavHeader::for_payload(&WavFormat::mono(8000, BitDepth::Eight), 0).to_bytes();
    bytes[0..4].copy_from_slice(b"RIFX");
    let err = WavHeader::read(&mut &bytes[..]).unwrap_err();
    assert!(matches!(err, StreamError::MalformedHeader { .. }));
}

#[test]
fn test_header_read_truncated_is_io_error() {
    let bytes = WavHeader::for_payload(&WavFormat::mono(8000, BitDepth::Eight), 0).to_bytes();
    let err = WavHeader::read(&mut &bytes[..20]).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_header_format_rejects_inconsistent_block_align() {
    let mut header = WavHeader::for_payload(&WavFormat::stereo(8000, BitDepth::Sixteen), 0);
    // channels * bits rather than channels * bytes
    header.block_align = 32;
    assert!(matches!(
        header.format(),
        Err(StreamError::MalformedHeader { .. })
    ));
}

// =========================================================================
// PCM extraction tests
// =========================================================================

fn wav_with_payload(payload: &[u8]) -> Vec<u8> {
    let format = WavFormat::mono(8000, BitDepth::Eight);
    let mut wav = WavHeader::for_payload(&format, payload.len() as u32)
        .to_bytes()
        .to_vec();
    wav.extend_from_slice(payload);
    wav
}

#[test]
fn test_extract_pcm_data() {
    let wav = wav_with_payload(&[1, 2, 3, 4]);
    assert_eq!(extract_pcm_data(&wav), Some(&[1u8, 2, 3, 4][..]));
    assert_eq!(wav.len() as u64, HEADER_LEN + 4);
}

#[test]
fn test_extract_pcm_data_skips_unknown_chunks() {
    let mut wav = Vec::new();
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&0u32.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"LIST");
    wav.extend_from_slice(&3u32.to_le_bytes());
    wav.extend_from_slice(&[9, 9, 9, 0]); // odd chunk plus pad byte
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&2u32.to_le_bytes());
    wav.extend_from_slice(&[5, 6]);

    assert_eq!(extract_pcm_data(&wav), Some(&[5u8, 6][..]));
}

#[test]
fn test_extract_pcm_data_rejects_garbage() {
    assert_eq!(extract_pcm_data(b"not a wav file at all"), None);
    assert_eq!(extract_pcm_data(&[]), None);

    let mut wav = wav_with_payload(&[1, 2, 3, 4]);
    wav.truncate(wav.len() - 1);
    assert_eq!(extract_pcm_data(&wav), None);
}

#[test]
fn test_pcm_hash_ignores_header_fields() {
    let wav = wav_with_payload(&[7, 7, 7]);
    assert_eq!(compute_pcm_hash(&wav), Some(pcm_hash(&[7, 7, 7])));
    assert_ne!(pcm_hash(&[7, 7, 7]), pcm_hash(&[7, 7, 8]));
}
