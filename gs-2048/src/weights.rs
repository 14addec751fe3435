//! Count-prefixed binary weight dump (little-endian).
//!
//! Layout: `u32` table count, then per table a `u32` element count
//! followed by that many `f32`s. Tables in this crate are always
//! [`TABLE_SIZE`](crate::ntuple::TABLE_SIZE) entries; anything else is a
//! format error.

use crate::ntuple::TABLE_SIZE;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

// A file can't reasonably hold more tables than this; a larger count
// means we're reading garbage.
const MAX_TABLES: u32 = 64;

#[derive(Debug, Error)]
pub enum WeightError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("weight file declares {count} tables (limit {MAX_TABLES})")]
    BadTableCount { count: u32 },
    #[error("weight table has {got} entries, expected {want}")]
    BadTableLen { got: u32, want: u32 },
    #[error("unexpected EOF while reading weight table")]
    UnexpectedEof,
}

pub fn read_tables<R: Read>(r: &mut R) -> Result<Vec<Vec<f32>>, WeightError> {
    let count = read_u32(r)?;
    if count > MAX_TABLES {
        return Err(WeightError::BadTableCount { count });
    }
    let mut tables = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let len = read_u32(r)?;
        if len as usize != TABLE_SIZE {
            return Err(WeightError::BadTableLen {
                got: len,
                want: TABLE_SIZE as u32,
            });
        }
        let mut table = vec![0.0f32; len as usize];
        read_exact_or_eof(r, bytemuck::cast_slice_mut(&mut table))?;
        tables.push(table);
    }
    Ok(tables)
}

pub fn write_tables<W: Write>(w: &mut W, tables: &[Vec<f32>]) -> Result<(), WeightError> {
    w.write_all(&(tables.len() as u32).to_le_bytes())?;
    for table in tables {
        w.write_all(&(table.len() as u32).to_le_bytes())?;
        w.write_all(bytemuck::cast_slice(table))?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_tables_from_path(path: impl AsRef<Path>) -> Result<Vec<Vec<f32>>, WeightError> {
    let mut r = BufReader::new(File::open(path)?);
    read_tables(&mut r)
}

pub fn write_tables_to_path(
    path: impl AsRef<Path>,
    tables: &[Vec<f32>],
) -> Result<(), WeightError> {
    let mut w = BufWriter::new(File::create(path)?);
    write_tables(&mut w, tables)
}

fn read_u32<R: Read>(r: &mut R) -> Result<u32, WeightError> {
    let mut bytes = [0u8; 4];
    read_exact_or_eof(r, &mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_exact_or_eof<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<(), WeightError> {
    let mut off = 0usize;
    while off < buf.len() {
        match r.read(&mut buf[off..])? {
            0 => return Err(WeightError::UnexpectedEof),
            n => off += n,
        }
    }
    Ok(())
}
