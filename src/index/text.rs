use crate::error::BuildError;
use crate::util::alphabet::Alphabet;

/// 已校验的文本：编号序列，恰好以一个哨兵（编号 0）结尾。
/// 同时记下校验所用字母表的符号表，编号只在该字母表下有意义。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    codes: Vec<u8>,
    symbols: Vec<u8>,
}

impl Text {
    /// 校验并编码原始字节。`bytes` 必须自带末尾哨兵。
    pub fn new(alphabet: &Alphabet, bytes: &[u8]) -> Result<Self, BuildError> {
        let n = bytes.len();
        if n == 0 {
            return Err(BuildError::EmptyText);
        }
        if n > u32::MAX as usize {
            return Err(BuildError::TextTooLong { len: n });
        }
        let mut codes = Vec::with_capacity(n);
        for (position, &symbol) in bytes.iter().enumerate() {
            match alphabet.rank(symbol) {
                None => return Err(BuildError::UnknownSymbol { symbol, position }),
                Some(Alphabet::SENTINEL) if position + 1 != n => {
                    return Err(BuildError::MisplacedSentinel { position });
                }
                Some(r) => codes.push(r),
            }
        }
        if codes[n - 1] != Alphabet::SENTINEL {
            return Err(BuildError::MissingSentinel);
        }
        Ok(Self { codes, symbols: alphabet.symbols().to_vec() })
    }

    /// 由不含哨兵的正文构造，自动追加哨兵。
    pub fn from_body(alphabet: &Alphabet, body: &[u8]) -> Result<Self, BuildError> {
        let mut bytes = Vec::with_capacity(body.len() + 1);
        bytes.extend_from_slice(body);
        bytes.push(alphabet.sentinel());
        Self::new(alphabet, &bytes)
    }

    #[inline]
    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// 文本是否按 `alphabet` 编码
    pub fn is_encoded_with(&self, alphabet: &Alphabet) -> bool {
        self.symbols == alphabet.symbols()
    }

    /// 永远为 false：合法文本至少包含哨兵
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// 正文反转、哨兵仍在末尾的文本，供 D 表的反向索引使用。
    pub fn reversed(&self) -> Self {
        let n = self.codes.len();
        let mut codes: Vec<u8> = self.codes[..n - 1].iter().rev().copied().collect();
        codes.push(Alphabet::SENTINEL);
        Self { codes, symbols: self.symbols.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_text() {
        let t = Text::new(&Alphabet::dna(), b"GATTACA$").unwrap();
        assert_eq!(t.codes(), &[3, 1, 4, 4, 1, 2, 1, 0]);
        assert_eq!(t.len(), 8);
    }

    #[test]
    fn sentinel_only_text_is_valid() {
        let t = Text::from_body(&Alphabet::dna(), b"").unwrap();
        assert_eq!(t.codes(), &[0]);
    }

    #[test]
    fn rejects_sentinel_violations() {
        let a = Alphabet::dna();
        assert_eq!(Text::new(&a, b""), Err(BuildError::EmptyText));
        assert_eq!(Text::new(&a, b"ACGT"), Err(BuildError::MissingSentinel));
        assert_eq!(Text::new(&a, b"AC$GT$"), Err(BuildError::MisplacedSentinel { position: 2 }));
        assert_eq!(Text::new(&a, b"$$"), Err(BuildError::MisplacedSentinel { position: 0 }));
    }

    #[test]
    fn rejects_unknown_symbol() {
        assert_eq!(
            Text::new(&Alphabet::dna(), b"ACNT$"),
            Err(BuildError::UnknownSymbol { symbol: b'N', position: 2 })
        );
    }

    #[test]
    fn reversed_keeps_sentinel_last() {
        let a = Alphabet::dna();
        let t = Text::new(&a, b"GATC$").unwrap();
        assert_eq!(a.decode(t.reversed().codes()), b"CTAG$");
        assert!(t.reversed().is_encoded_with(&a));
    }

    #[test]
    fn remembers_its_alphabet() {
        let t = Text::new(&Alphabet::new(b'#', b"GLO").unwrap(), b"GOOGOL#").unwrap();
        assert!(t.is_encoded_with(&Alphabet::new(b'#', b"GLO").unwrap()));
        assert!(!t.is_encoded_with(&Alphabet::new(b'#', b"GOL").unwrap()));
        assert!(!t.is_encoded_with(&Alphabet::dna()));
    }
}
