use crate::index::count::CountTable;
use crate::index::occ::RankTable;

/// 根据后缀数组构建 BWT：BWT[k] = text[(SA[k] - 1) mod n]。
/// text 为数值化字母表（0 为哨兵），sa 为后缀数组位置。
pub fn build_bwt(text: &[u8], sa: &[u32]) -> Vec<u8> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut bwt = Vec::with_capacity(n);
    for &p in sa {
        let i = p as usize;
        let prev = if i == 0 { text[n - 1] } else { text[i - 1] };
        bwt.push(prev);
    }
    bwt
}

/// 逆变换：从哨兵所在的第 0 行出发反复做 LF 映射，自右向左还原文本（编号形式）。
pub fn invert(c: &CountTable, occ: &RankTable) -> Vec<u8> {
    let bwt = occ.bwt();
    let n = bwt.len();
    if n == 0 {
        return Vec::new();
    }
    // 末位保持为哨兵 0
    let mut text = vec![0u8; n];
    let mut row = 0usize;
    for k in (0..n - 1).rev() {
        let ch = bwt[row];
        text[k] = ch;
        row = c.get(ch) as usize + occ.occ(ch, row) as usize;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gattaca_bwt() {
        // G A T T A C A $ ; SA = [7,6,4,1,5,0,3,2]
        let text = [3u8, 1, 4, 4, 1, 2, 1, 0];
        let sa = [7u32, 6, 4, 1, 5, 0, 3, 2];
        // A C T G A $ T A
        assert_eq!(build_bwt(&text, &sa), vec![1, 2, 4, 3, 1, 0, 4, 1]);
    }

    #[test]
    fn invert_restores_text() {
        let bwt = vec![1u8, 2, 4, 3, 1, 0, 4, 1];
        let c = CountTable::build(&bwt, 5).unwrap();
        for spacing in [1, 3, 64] {
            let occ = RankTable::build(bwt.clone(), 5, spacing).unwrap();
            assert_eq!(invert(&c, &occ), vec![3, 1, 4, 4, 1, 2, 1, 0]);
        }
    }
}
