//! Baked lookup table files
//!
//! Little endian, header of 14 bytes:
//! 1. width, height, channels -- 3x 32bit ints
//! 2. kind -- 1 byte, see [`LutKind`]
//! 3. table -- 1 byte, [`Table::id`]
//! 4. data -- width*height*channels 32bit floats, x is the fast axis

use std::path::Path;

use nom::{
    multi::count,
    number::complete::{le_f32, le_u32, le_u8},
    sequence::tuple,
    IResult,
};

use crate::{color::RGBA, transfer::Table};

pub const LUT_HEADER_LEN: usize = 3 * 4 + 2;
pub const LUT_CHANNELS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutKind {
    /// 1D function array, height 1
    Function,
    /// Square preintegration table
    Preintegrated,
}

impl LutKind {
    pub fn id(self) -> u8 {
        match self {
            LutKind::Function => 1,
            LutKind::Preintegrated => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<LutKind> {
        match id {
            1 => Some(LutKind::Function),
            2 => Some(LutKind::Preintegrated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LutMetadata {
    pub width: u32,
    pub height: u32,
    pub kind: LutKind,
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BakedLut {
    pub meta: LutMetadata,
    pub texels: Vec<RGBA>,
}

pub fn from_file<P>(path: P) -> Result<BakedLut, &'static str>
where
    P: AsRef<Path>,
{
    let data = std::fs::read(path).map_err(|_| "Cannot read file")?;
    lut_parser(&data)
}

pub fn lut_parser(data: &[u8]) -> Result<BakedLut, &'static str> {
    let (rest, (width, height, channels, kind, table)) = match header_inner(data) {
        Ok(r) => r,
        Err(_) => return Err("Parse error"),
    };

    if channels != LUT_CHANNELS {
        return Err("Unsupported channel count");
    }
    let kind = LutKind::from_id(kind).ok_or("Unknown table kind")?;
    let table = Table::from_id(table).ok_or("Unknown table")?;

    let n = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or("Table too large")?;
    match n.checked_mul(4) {
        Some(len) if len <= rest.len() => {}
        Some(_) => return Err("Data too short"),
        None => return Err("Table too large"),
    }

    let floats = match data_inner(rest, n) {
        Ok((_rest, floats)) => floats,
        Err(_) => return Err("Data too short"),
    };

    let texels = floats
        .chunks_exact(4)
        .map(|c| RGBA::new(c[0], c[1], c[2], c[3]))
        .collect();

    Ok(BakedLut {
        meta: LutMetadata {
            width,
            height,
            kind,
            table,
        },
        texels,
    })
}

fn header_inner(s: &[u8]) -> IResult<&[u8], (u32, u32, u32, u8, u8)> {
    let mut header = tuple((le_u32, le_u32, le_u32, le_u8, le_u8));
    header(s)
}

fn data_inner(s: &[u8], n: usize) -> IResult<&[u8], Vec<f32>> {
    count(le_f32, n)(s)
}
