use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::index::sais;
use crate::index::text::Text;

/// 后缀数组构建策略。
///
/// 所有实现遵循同一契约：输入以唯一最小哨兵结尾的文本，输出所有循环旋转的字典序排列。
/// 由于哨兵唯一且最小，旋转序与后缀序一致，因此不同策略对同一文本的输出必须逐字节相同。
pub trait SuffixArrayBuilder: Send + Sync {
    fn name(&self) -> &'static str;

    /// `sigma` 为文本编号的上界（不含）
    fn build(&self, text: &Text, sigma: usize) -> Vec<u32>;
}

/// 朴素策略：枚举 n 个循环旋转后整体排序。比较代价 O(n)，适合中小规模文本。
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationSort {
    pub parallel: bool,
}

impl SuffixArrayBuilder for RotationSort {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn build(&self, text: &Text, _sigma: usize) -> Vec<u32> {
        let codes = text.codes();
        let rotation = |i: usize| codes[i..].iter().chain(&codes[..i]);
        let cmp = |a: &u32, b: &u32| rotation(*a as usize).cmp(rotation(*b as usize));

        let mut sa: Vec<u32> = (0..codes.len() as u32).collect();
        // 旋转两两不同，不稳定排序的结果也是确定的
        if self.parallel {
            sa.par_sort_unstable_by(cmp);
        } else {
            sa.sort_unstable_by(cmp);
        }
        sa
    }
}

/// 倍增法，O(n log n) 轮排序。
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixDoubling;

impl SuffixArrayBuilder for PrefixDoubling {
    fn name(&self) -> &'static str {
        "doubling"
    }

    fn build(&self, text: &Text, _sigma: usize) -> Vec<u32> {
        build_sa_doubling(text.codes())
    }
}

/// SA-IS 诱导排序，线性时间。
#[derive(Debug, Clone, Copy, Default)]
pub struct InducedSort;

impl SuffixArrayBuilder for InducedSort {
    fn name(&self) -> &'static str {
        "sais"
    }

    fn build(&self, text: &Text, sigma: usize) -> Vec<u32> {
        let codes: Vec<usize> = text.codes().iter().map(|&c| c as usize).collect();
        sais::sais(&codes, sigma).into_iter().map(|p| p as u32).collect()
    }
}

/// 可序列化的策略选择，供配置与命令行使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaAlgorithm {
    Naive,
    Doubling,
    #[default]
    Sais,
}

impl SaAlgorithm {
    pub fn builder(self, parallel: bool) -> Box<dyn SuffixArrayBuilder> {
        match self {
            SaAlgorithm::Naive => Box::new(RotationSort { parallel }),
            SaAlgorithm::Doubling => Box::new(PrefixDoubling),
            SaAlgorithm::Sais => Box::new(InducedSort),
        }
    }
}

impl FromStr for SaAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(SaAlgorithm::Naive),
            "doubling" => Ok(SaAlgorithm::Doubling),
            "sais" => Ok(SaAlgorithm::Sais),
            other => Err(format!("unknown suffix array algorithm '{}' (naive|doubling|sais)", other)),
        }
    }
}

impl fmt::Display for SaAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SaAlgorithm::Naive => "naive",
            SaAlgorithm::Doubling => "doubling",
            SaAlgorithm::Sais => "sais",
        };
        f.write_str(name)
    }
}

/// 倍增法构建后缀数组。
/// 输入为数值化的文本，末尾的 0 为哨兵。
pub fn build_sa_doubling(text: &[u8]) -> Vec<u32> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut sa: Vec<usize> = (0..n).collect();
    // 名次不超过 n - 1，文本长度上限为 u32::MAX，u32 足够
    let mut rank: Vec<u32> = text.iter().map(|&b| u32::from(b)).collect();
    let mut tmp: Vec<u32> = vec![0; n];

    let mut k = 1usize;
    loop {
        sa.sort_unstable_by_key(|&i| doubling_key(&rank, i, k));

        tmp[sa[0]] = 0;
        for i in 1..n {
            let a = sa[i - 1];
            let b = sa[i];
            tmp[b] = tmp[a] + u32::from(doubling_key(&rank, a, k) != doubling_key(&rank, b, k));
        }

        // 复制回 rank
        rank.copy_from_slice(&tmp);
        if rank[sa[n - 1]] as usize == n - 1 || k >= n {
            break;
        }
        k <<= 1;
    }

    sa.into_iter().map(|x| x as u32).collect()
}

/// 排序键 (rank[i], rank[i + k])；越过文本末尾记为 `None`，排在任何名次之前
#[inline]
fn doubling_key(rank: &[u32], i: usize, k: usize) -> (u32, Option<u32>) {
    (rank[i], rank.get(i + k).copied())
}
