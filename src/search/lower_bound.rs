use crate::index::FmIndex;

/// D 表：d[i] 为把模式前缀 W[0..=i] 对齐到文本任意子串所需编辑数的下界。
///
/// 自左向右扫描模式，在反转文本的索引上维护区间（等价于在原文上向右延伸当前片段）。
/// 区间为空说明当前片段不是文本子串，至少要付出一次编辑：计数加一并从全区间重新开始。
/// 各片段互不重叠，因此计数是可采纳的下界，且随 i 单调不减。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowerBounds {
    d: Vec<u32>,
}

impl LowerBounds {
    pub fn compute(index: &FmIndex, pattern: &[u8]) -> Self {
        let mut d = Vec::with_capacity(pattern.len());
        let Some(full) = index.full_interval() else {
            return Self { d };
        };
        let mut iv = full;
        let mut z = 0u32;
        for &code in pattern {
            match index.extend_reversed(iv, code) {
                Some(next) => iv = next,
                None => {
                    iv = full;
                    z += 1;
                }
            }
            d.push(z);
        }
        Self { d }
    }

    /// 剩余 `remaining` 个模式符号（即 W[0..remaining)）所需的最少编辑数
    #[inline]
    pub fn for_prefix(&self, remaining: usize) -> u32 {
        match remaining {
            0 => 0,
            r => self.d[r - 1],
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexOpt;
    use crate::util::alphabet::Alphabet;

    fn index(body: &[u8]) -> FmIndex {
        let mut bytes = body.to_vec();
        bytes.push(b'$');
        FmIndex::from_bytes(Alphabet::dna(), &bytes, &IndexOpt::default()).unwrap()
    }

    fn d(fm: &FmIndex, pat: &[u8]) -> Vec<u32> {
        let codes = fm.alphabet().encode_pattern(pat).unwrap();
        LowerBounds::compute(fm, &codes).as_slice().to_vec()
    }

    #[test]
    fn substring_has_zero_bound() {
        let fm = index(b"GATTACA");
        assert_eq!(d(&fm, b"GATTACA"), vec![0; 7]);
        assert_eq!(d(&fm, b"TAC"), vec![0, 0, 0]);
    }

    #[test]
    fn absent_pieces_are_counted() {
        let fm = index(b"GATTACA");
        // TTT: "TT" 存在，"TTT" 不存在
        assert_eq!(d(&fm, b"TTT"), vec![0, 0, 1]);
        // GG|GG: 每两个 G 中第二个断开
        assert_eq!(d(&fm, b"GGGG"), vec![0, 1, 1, 2]);
    }

    #[test]
    fn occurrence_at_text_start_is_seen() {
        // 正文首字符的出现也必须计入
        let fm = index(b"ACGT");
        assert_eq!(d(&fm, b"A"), vec![0]);
        assert_eq!(d(&fm, b"ACG"), vec![0, 0, 0]);
    }

    #[test]
    fn sentinel_only_text() {
        let fm = index(b"");
        assert_eq!(d(&fm, b"AC"), vec![1, 2]);
        let lb = LowerBounds::compute(&fm, &[]);
        assert_eq!(lb.for_prefix(0), 0);
    }
}
