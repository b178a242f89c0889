//! Length-prefixed binary framing around a CBOR-encoded [`Message`].
//!
//! Grounded on `echo-session-proto::wire::Packet`: a 4-byte big-endian
//! length prefix followed by the encoded body. That crate encodes the
//! body with `serde_cbor`; this one uses `ciborium`, the actively
//! maintained replacement with the same data model.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{NetError, NetResult};
use crate::protocol::Message;

/// Byte length of the frame's length prefix.
const LENGTH_PREFIX_BYTES: usize = 4;

/// Encode `message` to its wire representation: a 4-byte big-endian
/// length prefix over the CBOR body.
pub fn encode(message: &Message) -> NetResult<Vec<u8>> {
    let mut body = Vec::new();
    ciborium::into_writer(message, &mut body).map_err(|e| NetError::Decode(e.to_string()))?;

    let mut framed = Vec::with_capacity(LENGTH_PREFIX_BYTES + body.len());
    framed.extend_from_slice(&(body.len() as u32).to_be_bytes());
    framed.extend_from_slice(&body);
    Ok(framed)
}

/// Decode one CBOR body (the length prefix already stripped) into a
/// [`Message`].
pub fn decode(body: &[u8]) -> NetResult<Message> {
    ciborium::from_reader(body).map_err(|e| NetError::Decode(e.to_string()))
}

/// Read one length-prefixed frame from `reader`, rejecting anything
/// whose declared length exceeds `max_frame_bytes` (spec.md §6:
/// "messages larger than a configured maximum are logged and discarded
/// without teardown").
///
/// Returns `Ok(None)` on a clean EOF at a frame boundary (the peer
/// closed the connection between frames, not mid-frame).
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R, max_frame_bytes: usize) -> NetResult<Option<Message>> {
    let mut len_buf = [0u8; LENGTH_PREFIX_BYTES];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(NetError::Io(e)),
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > max_frame_bytes {
        // Drain and discard: the frame is oversized but the stream must
        // stay byte-aligned for whatever follows it (spec.md §6:
        // discarded, not a reason to tear down the connection).
        let mut remaining = len;
        let mut scratch = [0u8; 4096];
        while remaining > 0 {
            let n = remaining.min(scratch.len());
            reader.read_exact(&mut scratch[..n]).await.map_err(NetError::Io)?;
            remaining -= n;
        }
        return Err(NetError::FrameTooLarge { len, max: max_frame_bytes });
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await.map_err(NetError::Io)?;
    decode(&body).map(Some)
}

/// Write one length-prefixed frame to `writer`.
pub async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, message: &Message) -> NetResult<()> {
    let framed = encode(message)?;
    writer.write_all(&framed).await.map_err(NetError::Io)?;
    writer.flush().await.map_err(NetError::Io)
}
