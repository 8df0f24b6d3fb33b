//! PDU record files
//!
//! A record file is a sequence of big-endian records:
//!
//! | field  | size         |
//! |--------|--------------|
//! | magic  | 4 (`PDU1`)   |
//! | length | 4 (`u32`)    |
//! | data   | `length`     |
//!
//! Record files let PDU traffic be captured and replayed through the
//! decoder's message port.

use crate::block::{MetaValue, Pdu};
use binrw::{binrw, BinRead, BinResult, BinWrite};
use std::io::{Read, Seek, SeekFrom, Write};

/// Metadata key holding the record's index in its file
pub const RECORD_INDEX_KEY: &str = "record_index";

/// One length-prefixed PDU payload
#[binrw]
#[brw(big, magic = b"PDU1")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduRecord {
    #[br(temp)]
    #[bw(calc = data.len() as u32)]
    length: u32,

    #[br(count = length)]
    pub data: Vec<u8>,
}

impl PduRecord {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Turn the record into a PDU tagged with its index
    pub fn into_pdu(self, index: usize) -> Pdu {
        Pdu::new(self.data).with_meta(RECORD_INDEX_KEY, MetaValue::Int(index as i64))
    }
}

/// Read every record from the current position to the end of the stream
pub fn read_records<R: Read + Seek>(reader: &mut R) -> BinResult<Vec<PduRecord>> {
    let start = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(start))?;

    let mut records = Vec::new();
    while reader.stream_position()? < end {
        records.push(PduRecord::read(reader)?);
    }
    Ok(records)
}

/// Write `payloads` as consecutive records
pub fn write_records<W, T>(writer: &mut W, payloads: &[T]) -> BinResult<()>
where
    W: Write + Seek,
    T: AsRef<[u8]>,
{
    for payload in payloads {
        let data = payload.as_ref();
        if u32::try_from(data.len()).is_err() {
            return Err(binrw::Error::AssertFail {
                pos: writer.stream_position()?,
                message: format!("record of {} bytes exceeds u32 length", data.len()),
            });
        }
        PduRecord::new(data.to_vec()).write(writer)?;
    }
    Ok(())
}
