use byteorder::{ByteOrder, LittleEndian};
use tf_lib::baked::{LUT_CHANNELS, LUT_HEADER_LEN};

use crate::config::Config;

/// Lookup table header
/// little-endian, total length 14B
/// 1. width, height, channels -- 3x 32bit ints
/// 2. kind -- 1 byte, 1 function, 2 preintegrated
/// 3. table -- 1 byte, 0 color-alpha, 1 ambient-specular, 2 advanced
/// 4. data -- width*height*channels 32bit floats
pub fn generate_header(cfg: &Config, width: u32, height: u32) -> Vec<u8> {
    let mut vec = vec![0; LUT_HEADER_LEN];
    let slice = &mut vec[..];

    LittleEndian::write_u32(&mut slice[0..4], width);
    LittleEndian::write_u32(&mut slice[4..8], height);
    LittleEndian::write_u32(&mut slice[8..12], LUT_CHANNELS);
    slice[12] = cfg.kind.id();
    slice[13] = cfg.table.id();

    vec
}
