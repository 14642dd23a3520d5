//! Sentinel-terminated record lists
//!
//! Two lists in the sprite data carry no count. They run until a record
//! matching a type-specific terminal predicate has been seen: the first
//! terminal for one list, the eighth for the other. Terminal records are
//! ordinary entries, so writing the list back is just writing every record.

use crate::error::Result;
use crate::record::{Record, RecordReader, RecordWriter};
use std::io::{Read, Seek, Write};

/// A record type with a terminal marker
pub trait Sentinel: Record {
    /// Whether this record ends (a sub-run of) its list
    fn is_final_entry(&self) -> bool;
}

/// When a sentinel list stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCondition {
    /// Stop after the first terminal record
    FirstTerminal,
    /// Stop after the `n`th terminal record
    NthTerminal(usize),
}

impl StopCondition {
    /// Number of terminal records that end the list (at least one)
    pub const fn terminal_count(self) -> usize {
        match self {
            Self::FirstTerminal | Self::NthTerminal(0) => 1,
            Self::NthTerminal(n) => n,
        }
    }
}

/// Records read by the sentinel protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelRun<T> {
    /// Every record, terminals included, in stream order
    pub records: Vec<T>,
    /// Index of each terminal record within `records`
    pub boundaries: Vec<usize>,
}

/// Read records until `stop` is satisfied
///
/// A stream without enough terminal records runs into
/// [`crate::Error::TruncatedStream`].
pub fn read_sentinel_list<T: Sentinel, R: Read + Seek>(
    reader: &mut RecordReader<R>,
    stop: StopCondition,
) -> Result<SentinelRun<T>> {
    let target = stop.terminal_count();
    let mut records = Vec::new();
    let mut boundaries = Vec::with_capacity(target);

    loop {
        let record: T = reader.read_record()?;
        if record.is_final_entry() {
            boundaries.push(records.len());
        }
        records.push(record);

        if boundaries.len() == target {
            break;
        }
    }

    Ok(SentinelRun {
        records,
        boundaries,
    })
}

/// Write a sentinel list back in order
pub fn write_sentinel_list<T: Sentinel, W: Write + Seek>(
    writer: &mut RecordWriter<W>,
    records: &[T],
) -> Result<()> {
    writer.write_records(records)
}

/// Recompute terminal positions from a stored list
pub fn terminal_positions<T: Sentinel>(records: &[T]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_final_entry())
        .map(|(index, _)| index)
        .collect()
}

/// Whether `records` is exactly what the protocol would read back
///
/// That is: the last record is the `stop`th terminal and no earlier prefix
/// already satisfied the stop condition.
pub fn is_well_terminated<T: Sentinel>(records: &[T], stop: StopCondition) -> bool {
    let positions = terminal_positions(records);
    positions.len() == stop.terminal_count()
        && positions.last().copied() == records.len().checked_sub(1)
}
