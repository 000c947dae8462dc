//! JPEG frame header probing.
//!
//! Walks the marker segments of a JPEG stream up to the first baseline or
//! extended-sequential frame header and reports its geometry and sample
//! precision. Works for 8-bit and 12-bit streams alike.

use serde::Serialize;

use crate::MapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JpegInfo {
    pub width: u16,
    pub height: u16,
    pub num_components: u8,
    /// Bits per sample, 8 or 12 for the frames probed here
    pub data_precision: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("Not enough input data")]
    TooShort,
    #[error("Not a JPEG file")]
    NotJpeg,
    #[error("Not enough data for marker")]
    TruncatedMarker,
    #[error("Found end of image too early")]
    EarlyEndOfImage,
    #[error("Found start of scan too early")]
    EarlyStartOfScan,
    #[error("Not enough data for segment size")]
    TruncatedSegmentSize,
    #[error("Not enough data for header segment")]
    TruncatedHeader,
    #[error("Invalid header segment size")]
    InvalidHeaderSize,
    #[error("No start of frame found")]
    NoStartOfFrame,
}

impl From<ProbeError> for MapError {
    fn from(err: ProbeError) -> Self {
        MapError::Decode(err.to_string())
    }
}

const MIN_STREAM_LEN: usize = 10;

const SOI: u8 = 0xd8;
const EOI: u8 = 0xd9;
const SOS: u8 = 0xda;
const SOF0: u8 = 0xc0;
const SOF1: u8 = 0xc1;

/// Read the frame header of a JPEG stream.
pub fn probe(data: &[u8]) -> Result<JpegInfo, ProbeError> {
    if data.len() < MIN_STREAM_LEN {
        return Err(ProbeError::TooShort);
    }
    if data[0] != 0xff || data[1] != SOI {
        return Err(ProbeError::NotJpeg);
    }

    let mut pos = 2;
    while pos < data.len() {
        let byte = data[pos];
        pos += 1;
        if byte != 0xff {
            continue;
        }

        let marker = *data.get(pos).ok_or(ProbeError::TruncatedMarker)?;
        pos += 1;
        match marker {
            // fill byte; the next 0xff is the real marker prefix
            0xff => {
                pos -= 1;
                continue;
            }
            // stuffed zero, TEM, RSTn and SOI carry no length
            0x00 | 0x01 | 0xd0..=SOI => continue,
            EOI => return Err(ProbeError::EarlyEndOfImage),
            SOS => return Err(ProbeError::EarlyStartOfScan),
            _ => {}
        }

        let size = usize::from(read_u16(data, pos).ok_or(ProbeError::TruncatedSegmentSize)?);
        if marker == SOF0 || marker == SOF1 {
            return read_frame_header(data, pos, size);
        }
        pos += size;
    }

    Err(ProbeError::NoStartOfFrame)
}

/// Parse a SOF segment whose length field starts at `pos`.
fn read_frame_header(data: &[u8], pos: usize, size: usize) -> Result<JpegInfo, ProbeError> {
    if pos + size > data.len() {
        return Err(ProbeError::TruncatedHeader);
    }
    if size < 8 {
        return Err(ProbeError::InvalidHeaderSize);
    }

    let segment = &data[pos..pos + size];
    let info = JpegInfo {
        data_precision: segment[2],
        height: u16::from_be_bytes([segment[3], segment[4]]),
        width: u16::from_be_bytes([segment[5], segment[6]]),
        num_components: segment[7],
    };

    // 8 bytes of header plus 3 per component
    if size != 8 + 3 * usize::from(info.num_components) {
        return Err(ProbeError::InvalidHeaderSize);
    }
    Ok(info)
}

fn read_u16(data: &[u8], pos: usize) -> Option<u16> {
    let bytes = data.get(pos..pos + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// SOI, an APP0 stub, then a single-component SOF1 frame header.
    pub(crate) fn header(precision: u8, width: u16, height: u16) -> Vec<u8> {
        let mut data = vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x04, 0xaa, 0xbb];
        data.extend_from_slice(&[0xff, 0xc1, 0x00, 0x0b, precision]);
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&[0x01, 0x01, 0x11, 0x00]);
        data
    }

    #[test]
    fn test_probe_12_bit_header() {
        let info = probe(&header(12, 256, 128)).unwrap();
        assert_eq!(
            info,
            JpegInfo {
                width: 256,
                height: 128,
                num_components: 1,
                data_precision: 12,
            }
        );
    }

    #[test]
    fn test_probe_skips_fill_bytes() {
        let mut data = header(12, 64, 64);
        data.insert(8, 0xff);
        data.insert(8, 0xff);
        assert_eq!(probe(&data).unwrap().width, 64);
    }

    #[test]
    fn test_probe_rejects_short_and_foreign_input() {
        assert_eq!(probe(&[0xff, 0xd8, 0xff]), Err(ProbeError::TooShort));
        assert_eq!(probe(b"\x89PNG\r\n\x1a\n\0\0\0\0"), Err(ProbeError::NotJpeg));
    }

    #[test]
    fn test_probe_reports_scan_before_frame() {
        let data = [0xff, 0xd8, 0xff, 0xda, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3f, 0x00];
        assert_eq!(probe(&data), Err(ProbeError::EarlyStartOfScan));
    }

    #[test]
    fn test_probe_reports_end_before_frame() {
        let data = [0xff, 0xd8, 0xff, 0xe0, 0x00, 0x04, 0x00, 0x00, 0xff, 0xd9];
        assert_eq!(probe(&data), Err(ProbeError::EarlyEndOfImage));
    }

    #[test]
    fn test_probe_reports_truncated_frame() {
        let mut data = header(12, 256, 256);
        data.truncate(data.len() - 3);
        assert_eq!(probe(&data), Err(ProbeError::TruncatedHeader));
    }

    #[test]
    fn test_probe_reports_bad_frame_size() {
        let mut data = header(12, 256, 256);
        // claim three components in an 11-byte segment
        data[17] = 3;
        assert_eq!(probe(&data), Err(ProbeError::InvalidHeaderSize));
    }

    #[test]
    fn test_probe_without_frame() {
        let data = [0xff, 0xd8, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
        assert_eq!(probe(&data), Err(ProbeError::NoStartOfFrame));
    }

    #[test]
    fn test_probe_error_converts_to_decode_error() {
        let err: MapError = ProbeError::NotJpeg.into();
        assert_eq!(err.to_string(), "Decode error: Not a JPEG file");
    }
}
