//! Chunk-level PNG reduction.
//!
//! Rewrites a PNG stream keeping only the chunks a conforming decoder
//! needs to reconstruct the pixel data; everything else (gamma, text,
//! timestamps, colour profiles) is dropped whole. Retained chunks are
//! copied bit-for-bit, checksums included, so the output stays valid
//! for any standard decoder.

use std::io::{self, Read, Write};

use crate::error::{Result, SwatchError};

/// The 8-byte signature that opens every PNG stream.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Chunk tags passed through by [`reduce`]: image header, pixel data,
/// and stream terminator.
pub const KEPT_CHUNKS: [[u8; 4]; 3] = [*b"IHDR", *b"IDAT", *b"IEND"];

/// Largest declared chunk payload the filter will buffer.
///
/// Chunk buffers are sized from the length field of the input, so a
/// corrupt or hostile stream could otherwise demand an enormous
/// allocation. Single-pixel PNGs carry chunks of at most a few hundred
/// bytes; 16 MiB leaves room for any plausible real input.
pub const MAX_CHUNK_LEN: u32 = 16 * 1024 * 1024;

/// Tags seen by one [`reduce`] pass, in stream order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReduceSummary {
    pub kept: Vec<String>,
    pub dropped: Vec<String>,
}

/// Filter a PNG stream down to its essential chunks.
///
/// Validates and copies the 8-byte signature, then walks the chunk
/// sequence: each chunk is either written through verbatim (length,
/// tag, payload, and checksum untouched) or dropped entirely, so the
/// output is a strict subset of the input's chunks in input order.
/// Running the filter over its own output is a no-op.
///
/// A stream that ends mid-chunk is not an error: a trailing fragment
/// with fewer than 12 total bytes is skipped, and a retained chunk cut
/// short by end-of-stream is written exactly as far as it was read.
///
/// Fails with a format error, before writing anything, when the input
/// does not begin with [`PNG_SIGNATURE`]. The caller owns both streams;
/// nothing is flushed or closed here.
pub fn reduce<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<ReduceSummary> {
    let mut signature = [0u8; 8];
    let n = read_fill(reader, &mut signature)?;
    if n < signature.len() || signature != PNG_SIGNATURE {
        return Err(SwatchError::Format {
            message: "Invalid PNG signature".to_string(),
            help: Some("Input must begin with the 8-byte PNG signature".to_string()),
        });
    }
    writer.write_all(&signature)?;

    let mut summary = ReduceSummary::default();
    let mut head = [0u8; 4];

    loop {
        let n = read_fill(reader, &mut head)?;
        if n < head.len() {
            break; // normal end of stream
        }

        let declared = u32::from_be_bytes(head);
        if declared > MAX_CHUNK_LEN {
            return Err(SwatchError::Format {
                message: format!(
                    "Chunk declares a {} byte payload (limit {})",
                    declared, MAX_CHUNK_LEN
                ),
                help: Some("A length this large means the stream is corrupt".to_string()),
            });
        }

        // tag + payload + checksum
        let mut body = vec![0u8; 8 + declared as usize];
        let got = read_fill(reader, &mut body)?;
        if got < 8 {
            break; // truncated trailing fragment, nothing left to keep
        }

        let tag = String::from_utf8_lossy(&body[..4]).into_owned();
        if KEPT_CHUNKS.iter().any(|kept| body[..4] == kept[..]) {
            writer.write_all(&head)?;
            writer.write_all(&body[..got])?;
            summary.kept.push(tag);
        } else {
            summary.dropped.push(tag);
        }
    }

    Ok(summary)
}

/// Filter an in-memory PNG, returning the reduced bytes.
pub fn reduce_bytes(input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = input;
    let mut output = Vec::with_capacity(input.len());
    reduce(&mut reader, &mut output)?;
    Ok(output)
}

/// Read until `buf` is full or the reader reaches end-of-stream,
/// returning how many bytes arrived.
fn read_fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::colour::Colour;
    use crate::png::encode_pixel;

    /// Build a chunk with a fixed placeholder checksum; the filter
    /// copies checksums without verifying them.
    fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(tag);
        out.extend_from_slice(payload);
        out.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);
        out
    }

    fn stream(chunks: &[Vec<u8>]) -> Vec<u8> {
        let mut out = PNG_SIGNATURE.to_vec();
        for c in chunks {
            out.extend_from_slice(c);
        }
        out
    }

    /// Walk a well-formed stream and collect its chunk tags.
    fn walk_tags(stream: &[u8]) -> Vec<String> {
        let mut tags = Vec::new();
        let mut pos = 8;
        while pos + 8 <= stream.len() {
            let len = u32::from_be_bytes([
                stream[pos],
                stream[pos + 1],
                stream[pos + 2],
                stream[pos + 3],
            ]) as usize;
            tags.push(String::from_utf8_lossy(&stream[pos + 4..pos + 8]).into_owned());
            pos += 12 + len;
        }
        tags
    }

    #[test]
    fn test_requires_signature() {
        let mut output = Vec::new();
        let err = reduce(&mut &b"GIF89a not a png"[..], &mut output).unwrap_err();
        assert!(err.to_string().contains("Invalid PNG signature"));
        assert!(output.is_empty());
    }

    #[test]
    fn test_empty_input_is_format_error() {
        assert!(reduce_bytes(b"").is_err());
    }

    #[test]
    fn test_short_input_writes_nothing() {
        let mut output = Vec::new();
        assert!(reduce(&mut &PNG_SIGNATURE[..4], &mut output).is_err());
        assert!(output.is_empty());
    }

    #[test]
    fn test_signature_only_stream() {
        let reduced = reduce_bytes(&PNG_SIGNATURE).unwrap();
        assert_eq!(reduced, PNG_SIGNATURE.to_vec());
    }

    #[test]
    fn test_drops_ancillary_chunk() {
        let input = stream(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"IDAT", &[1, 2, 3]),
            chunk(b"tEXt", b"Comment\0hello"),
            chunk(b"IEND", &[]),
        ]);
        let expected = stream(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"IDAT", &[1, 2, 3]),
            chunk(b"IEND", &[]),
        ]);

        let mut reader = &input[..];
        let mut output = Vec::new();
        let summary = reduce(&mut reader, &mut output).unwrap();

        assert_eq!(output, expected);
        assert_eq!(summary.kept, vec!["IHDR", "IDAT", "IEND"]);
        assert_eq!(summary.dropped, vec!["tEXt"]);
    }

    #[test]
    fn test_drops_several_ancillary_chunks() {
        let input = stream(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"gAMA", &[0, 0, 0xB1, 0x8F]),
            chunk(b"pHYs", &[0; 9]),
            chunk(b"IDAT", &[9; 40]),
            chunk(b"tIME", &[0; 7]),
            chunk(b"IEND", &[]),
        ]);

        let mut reader = &input[..];
        let mut output = Vec::new();
        let summary = reduce(&mut reader, &mut output).unwrap();

        assert_eq!(walk_tags(&output), vec!["IHDR", "IDAT", "IEND"]);
        assert_eq!(summary.dropped, vec!["gAMA", "pHYs", "tIME"]);
    }

    #[test]
    fn test_preserves_idat_order() {
        let input = stream(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"IDAT", &[1; 5]),
            chunk(b"IDAT", &[2; 5]),
            chunk(b"IEND", &[]),
        ]);
        let reduced = reduce_bytes(&input).unwrap();
        assert_eq!(reduced, input);
    }

    #[test]
    fn test_idempotent() {
        let input = stream(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"sRGB", &[0]),
            chunk(b"IDAT", &[7; 12]),
            chunk(b"IEND", &[]),
        ]);
        let once = reduce_bytes(&input).unwrap();
        let twice = reduce_bytes(&once).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn test_zero_length_chunk_kept() {
        let input = stream(&[chunk(b"IEND", &[])]);
        let reduced = reduce_bytes(&input).unwrap();
        assert_eq!(reduced, input);
    }

    #[test]
    fn test_truncated_length_field_ends_stream() {
        let mut input = stream(&[chunk(b"IHDR", &[0; 13])]);
        input.extend_from_slice(&[0x00, 0x01]); // partial length field
        let reduced = reduce_bytes(&input).unwrap();
        assert_eq!(walk_tags(&reduced), vec!["IHDR"]);
    }

    #[test]
    fn test_truncated_trailing_fragment_skipped() {
        let mut input = stream(&[chunk(b"IHDR", &[0; 13])]);
        input.extend_from_slice(&16u32.to_be_bytes());
        input.extend_from_slice(&[0xFF; 5]); // 5 of the declared 24 bytes
        let expected = stream(&[chunk(b"IHDR", &[0; 13])]);

        let reduced = reduce_bytes(&input).unwrap();
        assert_eq!(reduced, expected);
    }

    #[test]
    fn test_truncated_kept_chunk_written_as_read() {
        // IDAT declaring 10 payload bytes, cut off after 6.
        let mut input = stream(&[]);
        input.extend_from_slice(&10u32.to_be_bytes());
        input.extend_from_slice(b"IDAT");
        input.extend_from_slice(&[5; 6]);

        let reduced = reduce_bytes(&input).unwrap();
        assert_eq!(reduced, input);
    }

    #[test]
    fn test_truncated_dropped_chunk_stays_dropped() {
        let mut input = stream(&[]);
        input.extend_from_slice(&10u32.to_be_bytes());
        input.extend_from_slice(b"tEXt");
        input.extend_from_slice(&[5; 6]);

        let reduced = reduce_bytes(&input).unwrap();
        assert_eq!(reduced, PNG_SIGNATURE.to_vec());
    }

    #[test]
    fn test_declared_length_over_limit() {
        let mut input = PNG_SIGNATURE.to_vec();
        input.extend_from_slice(&(MAX_CHUNK_LEN + 1).to_be_bytes());
        input.extend_from_slice(b"IDAT");

        let err = reduce_bytes(&input).unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn test_non_ascii_tag_dropped() {
        let input = stream(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(&[0xDE, 0xAD, 0xBE, 0xEF], &[1, 2]),
            chunk(b"IEND", &[]),
        ]);
        let reduced = reduce_bytes(&input).unwrap();
        assert_eq!(walk_tags(&reduced), vec!["IHDR", "IEND"]);
    }

    #[test]
    fn test_round_trip_encoded_pixel() {
        for colour in [
            Colour::new(255, 0, 128, 255),
            Colour::TRANSPARENT,
            Colour::new(1, 2, 3, 4),
        ] {
            let encoded = encode_pixel(colour).unwrap();
            let reduced = reduce_bytes(&encoded).unwrap();

            assert_eq!(reduced[..8], PNG_SIGNATURE);
            let tags = walk_tags(&reduced);
            assert_eq!(tags.first().map(String::as_str), Some("IHDR"));
            assert_eq!(tags.last().map(String::as_str), Some("IEND"));
            assert!(tags.iter().all(|t| t == "IHDR" || t == "IDAT" || t == "IEND"));

            // Still a decodable PNG with the same pixel.
            let img = image::load_from_memory(&reduced).unwrap().to_rgba8();
            assert_eq!(img.get_pixel(0, 0).0, colour.to_rgba());
        }
    }
}
