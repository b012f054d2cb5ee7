//! SA-IS: 诱导排序构建后缀数组，O(n) 时间。
//!
//! 要求输入以唯一的最小符号 0 结尾（哨兵）。约简后的 LMS 名字串同样满足该条件，
//! 因此递归调用无需再补哨兵。
//!
//! 参考：Nong, Zhang, Chan (2009), "Linear Suffix Array Construction by Almost Pure Induced-Sorting"

const EMPTY: usize = usize::MAX;

pub fn sais(text: &[usize], sigma: usize) -> Vec<usize> {
    let n = text.len();
    if n <= 1 {
        return (0..n).collect();
    }

    // true 表示 S 型后缀
    let mut stype = vec![false; n];
    stype[n - 1] = true;
    for i in (0..n - 1).rev() {
        stype[i] = text[i] < text[i + 1] || (text[i] == text[i + 1] && stype[i + 1]);
    }

    let mut bucket_sizes = vec![0usize; sigma];
    for &c in text {
        bucket_sizes[c] += 1;
    }

    let lms: Vec<usize> = (1..n).filter(|&i| is_lms(&stype, i)).collect();

    // 第一轮：LMS 以文本顺序放入，诱导出 LMS 子串的相对顺序
    let mut sa = vec![EMPTY; n];
    induce(text, &stype, &bucket_sizes, &lms, &mut sa);

    // 为 LMS 子串命名，相同子串同名
    let mut names = vec![EMPTY; n];
    let mut name = 0usize;
    let mut prev: Option<usize> = None;
    for &pos in &sa {
        if !is_lms(&stype, pos) {
            continue;
        }
        if let Some(p) = prev {
            if !lms_substrings_equal(text, &stype, p, pos) {
                name += 1;
            }
        }
        names[pos] = name;
        prev = Some(pos);
    }

    let reduced: Vec<usize> = lms.iter().map(|&p| names[p]).collect();
    let order = if name + 1 < lms.len() {
        sais(&reduced, name + 1)
    } else {
        // 名字互不相同，名字本身即为次序
        let mut order = vec![0usize; reduced.len()];
        for (i, &r) in reduced.iter().enumerate() {
            order[r] = i;
        }
        order
    };

    // 第二轮：按正确次序放入 LMS，诱导出完整后缀数组
    let sorted_lms: Vec<usize> = order.iter().map(|&i| lms[i]).collect();
    sa.fill(EMPTY);
    induce(text, &stype, &bucket_sizes, &sorted_lms, &mut sa);
    sa
}

#[inline]
fn is_lms(stype: &[bool], i: usize) -> bool {
    i != EMPTY && i > 0 && stype[i] && !stype[i - 1]
}

fn bucket_heads(sizes: &[usize]) -> Vec<usize> {
    let mut acc = 0;
    sizes
        .iter()
        .map(|&s| {
            let head = acc;
            acc += s;
            head
        })
        .collect()
}

fn bucket_tails(sizes: &[usize]) -> Vec<usize> {
    let mut acc = 0;
    sizes
        .iter()
        .map(|&s| {
            acc += s;
            acc
        })
        .collect()
}

fn induce(text: &[usize], stype: &[bool], sizes: &[usize], lms: &[usize], sa: &mut [usize]) {
    let n = text.len();

    let mut tails = bucket_tails(sizes);
    for &pos in lms.iter().rev() {
        let c = text[pos];
        tails[c] -= 1;
        sa[tails[c]] = pos;
    }

    // L 型：从左到右
    let mut heads = bucket_heads(sizes);
    for i in 0..n {
        let pos = sa[i];
        if pos == EMPTY || pos == 0 || stype[pos - 1] {
            continue;
        }
        let c = text[pos - 1];
        sa[heads[c]] = pos - 1;
        heads[c] += 1;
    }

    // S 型：从右到左
    let mut tails = bucket_tails(sizes);
    for i in (0..n).rev() {
        let pos = sa[i];
        if pos == EMPTY || pos == 0 || !stype[pos - 1] {
            continue;
        }
        let c = text[pos - 1];
        tails[c] -= 1;
        sa[tails[c]] = pos - 1;
    }
}

fn lms_substrings_equal(text: &[usize], stype: &[bool], a: usize, b: usize) -> bool {
    let n = text.len();
    if a == n - 1 || b == n - 1 {
        return a == b;
    }
    let mut i = 0;
    loop {
        let (x, y) = (a + i, b + i);
        if text[x] != text[y] || stype[x] != stype[y] {
            return false;
        }
        if i > 0 {
            let (end_x, end_y) = (is_lms(stype, x), is_lms(stype, y));
            if end_x || end_y {
                return end_x && end_y;
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(text: &[usize]) -> Vec<usize> {
        let mut sa: Vec<usize> = (0..text.len()).collect();
        sa.sort_by(|&a, &b| text[a..].cmp(&text[b..]));
        sa
    }

    #[test]
    fn banana() {
        // b a n a n a $ -> 2 1 3 1 3 1 0
        let text = [2, 1, 3, 1, 3, 1, 0];
        assert_eq!(sais(&text, 4), vec![6, 5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn needs_recursion() {
        // 重复的 LMS 子串会触发递归
        let body = [2usize, 1, 2, 1, 2, 1, 2, 1, 3, 2, 1, 2, 1, 2, 1];
        let mut text = body.to_vec();
        text.push(0);
        assert_eq!(sais(&text, 4), naive(&text));
    }

    #[test]
    fn trivial_inputs() {
        assert_eq!(sais(&[], 1), Vec::<usize>::new());
        assert_eq!(sais(&[0], 1), vec![0]);
        assert_eq!(sais(&[1, 0], 2), vec![1, 0]);
    }
}
