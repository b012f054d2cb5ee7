use serde::{Deserialize, Serialize};

use crate::error::{BuildError, QueryError};

const NO_RANK: u8 = u8::MAX;

/// 有序字母表。
///
/// 符号按声明顺序编号为 `1..sigma`，哨兵固定为 0 号，严格小于所有其他符号。
/// 索引内部只处理编号（rank），原始字节只在边界处出现。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    /// rank -> 字节，symbols[0] 为哨兵
    symbols: Vec<u8>,
    /// 字节 -> rank，长度 256，不在字母表中的字节为 NO_RANK
    ranks: Vec<u8>,
}

impl Alphabet {
    pub const SENTINEL: u8 = 0;

    pub fn new(sentinel: u8, symbols: &[u8]) -> Result<Self, BuildError> {
        if symbols.len() >= NO_RANK as usize {
            return Err(BuildError::InvalidAlphabet(format!(
                "at most {} symbols are supported, got {}",
                NO_RANK - 1,
                symbols.len()
            )));
        }
        let mut ranks = vec![NO_RANK; 256];
        ranks[sentinel as usize] = Self::SENTINEL;
        for (i, &s) in symbols.iter().enumerate() {
            if ranks[s as usize] != NO_RANK {
                return Err(BuildError::InvalidAlphabet(format!(
                    "symbol {:?} declared twice (or equals the sentinel)",
                    s as char
                )));
            }
            ranks[s as usize] = (i + 1) as u8;
        }
        let mut all = Vec::with_capacity(symbols.len() + 1);
        all.push(sentinel);
        all.extend_from_slice(symbols);
        Ok(Self { symbols: all, ranks })
    }

    /// `$ < A < C < G < T`
    pub fn dna() -> Self {
        let symbols = b"$ACGT".to_vec();
        let mut ranks = vec![NO_RANK; 256];
        for (i, &s) in symbols.iter().enumerate() {
            ranks[s as usize] = i as u8;
        }
        Self { symbols, ranks }
    }

    /// 字母表大小（含哨兵）
    #[inline]
    pub fn sigma(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn sentinel(&self) -> u8 {
        self.symbols[0]
    }

    #[inline]
    pub fn rank(&self, symbol: u8) -> Option<u8> {
        match self.ranks[symbol as usize] {
            NO_RANK => None,
            r => Some(r),
        }
    }

    #[inline]
    pub fn symbol(&self, rank: u8) -> u8 {
        self.symbols[rank as usize]
    }

    /// 非哨兵符号的编号，按字母序
    pub fn search_ranks(&self) -> impl Iterator<Item = u8> {
        1..self.sigma() as u8
    }

    /// 查询模式编码：不允许未知符号，也不允许哨兵。
    pub fn encode_pattern(&self, pattern: &[u8]) -> Result<Vec<u8>, QueryError> {
        pattern
            .iter()
            .enumerate()
            .map(|(position, &symbol)| match self.rank(symbol) {
                None => Err(QueryError::UnknownSymbol { symbol, position }),
                Some(Self::SENTINEL) => Err(QueryError::SentinelInPattern { position }),
                Some(r) => Ok(r),
            })
            .collect()
    }

    /// 按编号排列的全部符号，第 0 个为哨兵
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn decode(&self, ranks: &[u8]) -> Vec<u8> {
        ranks.iter().map(|&r| self.symbol(r)).collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::dna()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dna_order() {
        let a = Alphabet::dna();
        assert_eq!(a.sigma(), 5);
        assert_eq!(a.sentinel(), b'$');
        assert_eq!(a.rank(b'$'), Some(0));
        assert_eq!(a.rank(b'A'), Some(1));
        assert_eq!(a.rank(b'T'), Some(4));
        assert_eq!(a.rank(b'N'), None);
        assert_eq!(a, Alphabet::new(b'$', b"ACGT").unwrap());
    }

    #[test]
    fn custom_order_follows_declaration() {
        let a = Alphabet::new(b'#', b"ZYX").unwrap();
        assert_eq!(a.rank(b'Z'), Some(1));
        assert_eq!(a.rank(b'X'), Some(3));
        assert_eq!(a.search_ranks().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn rejects_duplicates_and_sentinel_reuse() {
        assert!(Alphabet::new(b'$', b"ACA").is_err());
        assert!(Alphabet::new(b'$', b"AC$").is_err());
    }

    #[test]
    fn encode_pattern_errors() {
        let a = Alphabet::dna();
        assert_eq!(a.encode_pattern(b"GAT").unwrap(), vec![3, 1, 4]);
        assert_eq!(
            a.encode_pattern(b"GNT"),
            Err(QueryError::UnknownSymbol { symbol: b'N', position: 1 })
        );
        assert_eq!(a.encode_pattern(b"A$"), Err(QueryError::SentinelInPattern { position: 1 }));
    }
}
