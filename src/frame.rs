//! Frame codec.
//!
//! A frame is the single byte buffer hidden in the carrier:
//!
//! ```text
//! [metadata_length: u32 big-endian][metadata: UTF-8 JSON][payload: metadata.size bytes]
//! ```
//!
//! Anything after the payload is ignored on decode, since extraction always
//! returns every LSB the carrier holds.

use crate::error::{Result, StegoError};
use crate::metadata::Metadata;
use crate::LENGTH_PREFIX_LEN;

/// Metadata plus the payload bytes it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub metadata: Metadata,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Creates a frame, checking that `metadata.size` matches the payload.
    pub fn new(metadata: Metadata, payload: Vec<u8>) -> Result<Self> {
        check_size(&metadata, &payload)?;
        Ok(Self { metadata, payload })
    }

    /// Serializes the frame into its wire form.
    pub fn encode(&self) -> Result<Vec<u8>> {
        check_size(&self.metadata, &self.payload)?;

        let json = self.metadata.to_json()?;
        let json_len = u32::try_from(json.len())
            .map_err(|_| StegoError::InvalidInput("Metadata JSON exceeds 4 GiB".to_string()))?;

        let mut out = Vec::with_capacity(LENGTH_PREFIX_LEN + json.len() + self.payload.len());
        out.extend_from_slice(&json_len.to_be_bytes());
        out.extend_from_slice(&json);
        out.extend_from_slice(&self.payload);
        Ok(out)
    }

    /// Parses a frame from the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (metadata, rest) = split_metadata(bytes)?;

        let size = usize::try_from(metadata.size).map_err(|_| {
            StegoError::MalformedFrame(format!("Payload size {} is not addressable", metadata.size))
        })?;
        if rest.len() < size {
            return Err(StegoError::MalformedFrame(format!(
                "Truncated frame: payload needs {} bytes, {} available",
                size,
                rest.len()
            )));
        }

        Ok(Self {
            metadata,
            payload: rest[..size].to_vec(),
        })
    }
}

fn check_size(metadata: &Metadata, payload: &[u8]) -> Result<()> {
    if metadata.size != payload.len() as u64 {
        return Err(StegoError::InvalidInput(format!(
            "Metadata size {} does not match payload length {}",
            metadata.size,
            payload.len()
        )));
    }
    Ok(())
}

/// Reads only the metadata of a frame.
pub fn decode_metadata(bytes: &[u8]) -> Result<Metadata> {
    let (metadata, _) = split_metadata(bytes)?;
    Ok(metadata)
}

/// Parses the length prefix and metadata, returning the bytes after them.
fn split_metadata(bytes: &[u8]) -> Result<(Metadata, &[u8])> {
    if bytes.len() < LENGTH_PREFIX_LEN {
        return Err(StegoError::MalformedFrame(format!(
            "Truncated frame: {} bytes is shorter than the length prefix",
            bytes.len()
        )));
    }

    let mut prefix = [0u8; LENGTH_PREFIX_LEN];
    prefix.copy_from_slice(&bytes[..LENGTH_PREFIX_LEN]);
    let json_len = u32::from_be_bytes(prefix) as usize;

    let rest = &bytes[LENGTH_PREFIX_LEN..];
    if rest.len() < json_len {
        return Err(StegoError::MalformedFrame(format!(
            "Truncated frame: metadata needs {} bytes, {} available",
            json_len,
            rest.len()
        )));
    }

    let metadata = Metadata::from_json(&rest[..json_len])?;
    Ok((metadata, &rest[json_len..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PayloadKind;

    fn metadata_for(payload: &[u8]) -> Metadata {
        Metadata {
            original_name: "secret.bin".to_string(),
            original_path: "/tmp/secret.bin".to_string(),
            size: payload.len() as u64,
            original_size: None,
            kind: PayloadKind::Binary,
            mime: "application/octet-stream".to_string(),
            compressed: false,
            compression_ratio: None,
            file_count: None,
        }
    }

    #[test]
    fn test_encode_layout() {
        let payload = b"abc";
        let meta = metadata_for(payload);
        let json = meta.to_json().unwrap();

        let frame = Frame::new(meta, payload.to_vec()).unwrap().encode().unwrap();
        assert_eq!(&frame[..4], &(json.len() as u32).to_be_bytes());
        assert_eq!(&frame[4..4 + json.len()], json.as_slice());
        assert_eq!(&frame[4 + json.len()..], payload);
    }

    #[test]
    fn test_decode_matches_encode() {
        let payload: Vec<u8> = (0..=255).collect();
        let mut meta = metadata_for(&payload);
        meta.set_compressed(1234, payload.len() as u64);

        let frame = Frame::new(meta.clone(), payload.clone()).unwrap();
        let bytes = frame.encode().unwrap();
        assert_eq!(bytes.len(), 4 + meta.to_json().unwrap().len() + payload.len());

        let decoded = Frame::decode(&bytes).unwrap();
        assert_eq!(decoded.metadata, meta);
        assert_eq!(decoded.payload, payload);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let payload = b"hidden";
        let meta = metadata_for(payload);
        let mut bytes = Frame::new(meta.clone(), payload.to_vec())
            .unwrap()
            .encode()
            .unwrap();
        bytes.extend_from_slice(&[0xAA; 100]);

        let decoded = Frame::decode(&bytes).unwrap();
        assert_eq!(decoded.metadata, meta);
        assert_eq!(decoded.payload, payload);
    }

    #[test]
    fn test_empty_payload() {
        let meta = metadata_for(&[]);
        let bytes = Frame::new(meta, Vec::new()).unwrap().encode().unwrap();
        assert!(Frame::decode(&bytes).unwrap().payload.is_empty());
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let mut meta = metadata_for(b"abc");
        meta.size = 99;
        assert!(matches!(
            Frame::new(meta.clone(), b"abc".to_vec()),
            Err(StegoError::InvalidInput(_))
        ));

        // Fields are public, so encode checks again.
        let frame = Frame {
            metadata: meta,
            payload: b"abc".to_vec(),
        };
        assert!(matches!(frame.encode(), Err(StegoError::InvalidInput(_))));
    }

    #[test]
    fn test_truncated_payload() {
        let payload = vec![7u8; 64];
        let bytes = Frame::new(metadata_for(&payload), payload).unwrap().encode().unwrap();
        let result = Frame::decode(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(StegoError::MalformedFrame(_))));
    }

    #[test]
    fn test_truncated_metadata() {
        let payload = b"x";
        let bytes = Frame::new(metadata_for(payload), payload.to_vec())
            .unwrap()
            .encode()
            .unwrap();
        assert!(matches!(
            Frame::decode(&bytes[..10]),
            Err(StegoError::MalformedFrame(_))
        ));
        assert!(matches!(
            Frame::decode(&bytes[..3]),
            Err(StegoError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        // Plausible length, but not JSON.
        let mut bytes = 8u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"not json and more");
        assert!(matches!(
            Frame::decode(&bytes),
            Err(StegoError::MalformedFrame(_))
        ));

        // Absurd length from a carrier with no frame.
        let bytes = [0xFFu8; 64];
        assert!(matches!(
            Frame::decode(&bytes),
            Err(StegoError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_decode_metadata_only() {
        let payload = vec![1u8; 10];
        let mut meta = metadata_for(&payload);
        meta.kind = PayloadKind::Directory;
        meta.file_count = Some(2);
        let bytes = Frame::new(meta, payload.clone()).unwrap().encode().unwrap();

        // Payload cut off entirely, metadata still readable.
        let json_end = bytes.len() - payload.len();
        let decoded = decode_metadata(&bytes[..json_end]).unwrap();
        assert_eq!(decoded.file_count, Some(2));
    }
}
