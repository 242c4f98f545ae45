//! PCM payload extraction and hashing.

/// Finds the payload of the `data` chunk in a complete WAV file.
///
/// Walks the RIFF chunk list rather than assuming a 44-byte header, so files
/// written by other tools with extra chunks are handled too. Returns `None`
/// when the buffer is not a RIFF/WAVE file or the data chunk is truncated.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut rest = &wav_data[12..];
    while rest.len() >= 8 {
        let (id, tail) = rest.split_at(4);
        let size = u32::from_le_bytes(tail[..4].try_into().ok()?) as usize;
        let body = &tail[4..];

        if id == b"data" {
            return body.get(..size);
        }

        // Chunks are word aligned.
        let skip = size + (size & 1);
        rest = body.get(skip..)?;
    }

    None
}

/// BLAKE3 hash of a PCM payload, hex encoded.
pub fn pcm_hash(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// Computes the PCM hash of a complete WAV file.
///
/// Returns `None` if the buffer holds no readable data chunk.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(pcm_hash)
}
