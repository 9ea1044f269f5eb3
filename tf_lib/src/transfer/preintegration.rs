use crate::color::RGBA;

use super::{FunctionArrays, Table};

/// Square table of averages of a 1D function
///
/// Entry `(x, y)` holds the mean of the function over samples between `x` and `y`,
/// diagonal holds the function itself.
/// Stored with `x` as the fast axis, index `x + resolution * y`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreintegrationTable {
    resolution: usize,
    data: Vec<RGBA>,
}

impl PreintegrationTable {
    pub fn new(function: &[RGBA]) -> PreintegrationTable {
        let res = function.len();

        let mut prefix = Vec::with_capacity(res);
        let mut acc = RGBA::zeros();
        for &f in function {
            acc += f;
            prefix.push(acc);
        }

        let mut data = Vec::with_capacity(res * res);
        for y in 0..res {
            for x in 0..res {
                let texel = match x.cmp(&y) {
                    std::cmp::Ordering::Equal => function[x],
                    std::cmp::Ordering::Greater => (prefix[x] - prefix[y]) / (x - y) as f32,
                    std::cmp::Ordering::Less => (prefix[y] - prefix[x]) / (y - x) as f32,
                };
                data.push(texel);
            }
        }

        PreintegrationTable {
            resolution: res,
            data,
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn get(&self, x: usize, y: usize) -> RGBA {
        self.data[x + self.resolution * y]
    }

    pub fn data(&self) -> &[RGBA] {
        &self.data
    }
}

/// Preintegrated counterparts of all three function arrays
#[derive(Debug, Clone, PartialEq)]
pub struct PreintegrationTables {
    pub color_alpha: PreintegrationTable,
    pub ambient_specular: PreintegrationTable,
    pub advanced: PreintegrationTable,
}

impl PreintegrationTables {
    pub fn new(function: &FunctionArrays) -> PreintegrationTables {
        PreintegrationTables {
            color_alpha: PreintegrationTable::new(&function.color_alpha),
            ambient_specular: PreintegrationTable::new(&function.ambient_specular),
            advanced: PreintegrationTable::new(&function.advanced),
        }
    }

    pub fn table(&self, table: Table) -> &PreintegrationTable {
        match table {
            Table::ColorAlpha => &self.color_alpha,
            Table::AmbientSpecular => &self.ambient_specular,
            Table::Advanced => &self.advanced,
        }
    }
}
