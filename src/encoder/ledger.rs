use crate::array::ArrayRef;

/// an array waiting to be written to the appended section, and the offset it will be written at
#[derive(Debug, Clone, Copy)]
pub(crate) struct Record<'a> {
    pub(crate) data: ArrayRef<'a>,
    pub(crate) offset: u64,
}

/// Arrays declared to an appended encoder, in declaration order, together with the running
/// offset into the appended section.
///
/// The running offset always equals the number of bytes the recorded arrays occupy once
/// written, so the offset of a new record is the sum of the encoded sizes of every record
/// before it.
#[derive(Debug, Default)]
pub(crate) struct Ledger<'a> {
    records: Vec<Record<'a>>,
    offset: u64,
}

impl<'a> Ledger<'a> {
    /// remember `data`, which occupies `encoded_len` bytes (length header included) once written.
    /// Returns the offset the data starts at
    pub(crate) fn record(&mut self, data: ArrayRef<'a>, encoded_len: usize) -> u64 {
        let offset = self.offset;

        self.records.push(Record { data, offset });
        self.offset += encoded_len as u64;

        offset
    }

    /// total size of every recorded array
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    /// start offset of the latest record, or the running offset if nothing was recorded yet
    pub(crate) fn last_offset(&self) -> u64 {
        self.records
            .last()
            .map(|record| record.offset)
            .unwrap_or(self.offset)
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = &Record<'a>> {
        self.records.iter()
    }
}
