use serde::{Deserialize, Serialize};

use crate::index::count::CountTable;
use crate::index::occ::RankTable;

/// SA 区间 [lower, upper]（闭区间）。空区间不会被构造出来，用 `None` 表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SaInterval {
    pub lower: usize,
    pub upper: usize,
}

impl SaInterval {
    /// 覆盖全部 n 行
    pub fn full(n: usize) -> Option<Self> {
        (n > 0).then(|| Self { lower: 0, upper: n - 1 })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.upper - self.lower + 1
    }

    /// 永远为 false，保留给 clippy
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// 向左扩展一个符号的反向搜索步：
/// L' = C[c] + occ(c, L)，R' = C[c] + occ(c, R + 1) - 1；L' > R' 时没有出现。
#[inline]
pub fn backward_extend(c: &CountTable, occ: &RankTable, iv: SaInterval, code: u8) -> Option<SaInterval> {
    let base = c.get(code) as usize;
    let lower = base + occ.occ(code, iv.lower) as usize;
    let end = base + occ.occ(code, iv.upper + 1) as usize;
    (lower < end).then(|| SaInterval { lower, upper: end - 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_on_gattaca() {
        // BWT of GATTACA$
        let bwt = vec![1u8, 2, 4, 3, 1, 0, 4, 1];
        let c = CountTable::build(&bwt, 5).unwrap();
        let occ = RankTable::build(bwt, 5, 2).unwrap();
        let full = SaInterval::full(8).unwrap();

        // "A" 占第 1..=3 行
        let a = backward_extend(&c, &occ, full, 1).unwrap();
        assert_eq!(a, SaInterval { lower: 1, upper: 3 });
        // "TA" 只有第 6 行
        let ta = backward_extend(&c, &occ, a, 4).unwrap();
        assert_eq!(ta, SaInterval { lower: 6, upper: 6 });
        // "GA" 只出现在偏移 0
        let ga = backward_extend(&c, &occ, a, 3).unwrap();
        assert_eq!(ga, SaInterval { lower: 5, upper: 5 });
        // "CC" 不存在
        let cc = backward_extend(&c, &occ, SaInterval { lower: 4, upper: 4 }, 2);
        assert!(cc.is_none());
    }
}
