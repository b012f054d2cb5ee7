use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// C 表：C[c] = 文本中严格小于 c 的符号总数。
/// BWT 是文本的一个排列，直接在 BWT 上计数即可。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    c: Vec<u32>,
}

impl CountTable {
    pub fn build(bwt: &[u8], sigma: usize) -> Result<Self, BuildError> {
        let mut freq = vec![0u32; sigma];
        for (position, &ch) in bwt.iter().enumerate() {
            match freq.get_mut(ch as usize) {
                Some(f) => *f += 1,
                None => return Err(BuildError::UnknownSymbol { symbol: ch, position }),
            }
        }
        let mut c = vec![0u32; sigma];
        let mut acc = 0u32;
        for (slot, f) in c.iter_mut().zip(&freq) {
            *slot = acc;
            acc += f;
        }
        Ok(Self { c })
    }

    #[inline]
    pub fn get(&self, code: u8) -> u32 {
        self.c[code as usize]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gattaca_counts() {
        // BWT of GATTACA$: A C T G A $ T A
        let c = CountTable::build(&[1, 2, 4, 3, 1, 0, 4, 1], 5).unwrap();
        // $:0  A:1  C:4  G:5  T:6
        assert_eq!(c.as_slice(), &[0, 1, 4, 5, 6]);
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(
            CountTable::build(&[1, 7, 0], 5),
            Err(BuildError::UnknownSymbol { symbol: 7, position: 1 })
        );
    }
}
