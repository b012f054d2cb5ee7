use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// O 表（rank 表）：occ(c, i) = BWT[0..i) 中 c 的出现次数，i ∈ [0, n]。
///
/// 只在 spacing 的整数倍处存储精确计数，其余位置从最近的采样点向前或向后
/// 扫描 BWT 补偿，最多扫描 spacing - 1 个字符。spacing = 1 即完整物化的表。
/// 采样只影响空间与查询耗时，任何 i 上的取值与完整表一致。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTable {
    sigma: u32,
    spacing: u32,
    /// BWT 序列，采样间隙内的补偿扫描依赖它
    bwt: Vec<u8>,
    /// 采样值（行优先展平）：samples[j * sigma + c] = occ(c, j * spacing)
    samples: Vec<u32>,
}

impl RankTable {
    pub fn build(bwt: Vec<u8>, sigma: usize, spacing: usize) -> Result<Self, BuildError> {
        if spacing == 0 {
            return Err(BuildError::InvalidSpacing);
        }
        let n = bwt.len();
        let num_samples = n / spacing + 1;
        let mut samples = Vec::with_capacity(num_samples * sigma);
        let mut running = vec![0u32; sigma];
        for (i, &ch) in bwt.iter().enumerate() {
            if i % spacing == 0 {
                samples.extend_from_slice(&running);
            }
            match running.get_mut(ch as usize) {
                Some(r) => *r += 1,
                None => return Err(BuildError::UnknownSymbol { symbol: ch, position: i }),
            }
        }
        if n % spacing == 0 {
            samples.extend_from_slice(&running);
        }
        debug_assert_eq!(samples.len(), num_samples * sigma);

        Ok(Self { sigma: sigma as u32, spacing: spacing as u32, bwt, samples })
    }

    #[inline]
    fn sample(&self, j: usize, c: u8) -> u32 {
        self.samples[j * self.sigma as usize + c as usize]
    }

    /// 返回 BWT[0..pos) 中 c 的出现次数
    #[inline]
    pub fn occ(&self, c: u8, pos: usize) -> u32 {
        let spacing = self.spacing as usize;
        let j = pos / spacing;
        let lo = j * spacing;
        if pos == lo {
            return self.sample(j, c);
        }
        let hi = lo + spacing;
        if hi <= self.bwt.len() && hi - pos < pos - lo {
            let after = self.bwt[pos..hi].iter().filter(|&&ch| ch == c).count() as u32;
            self.sample(j + 1, c) - after
        } else {
            let before = self.bwt[lo..pos].iter().filter(|&&ch| ch == c).count() as u32;
            self.sample(j, c) + before
        }
    }

    /// 物化某个符号的整行 occ(c, 0..=n)，用于检查与展示
    pub fn row(&self, c: u8) -> Vec<u32> {
        (0..=self.bwt.len()).map(|i| self.occ(c, i)).collect()
    }

    #[inline]
    pub fn bwt(&self) -> &[u8] {
        &self.bwt
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bwt.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bwt.is_empty()
    }

    pub fn sigma(&self) -> usize {
        self.sigma as usize
    }

    pub fn spacing(&self) -> usize {
        self.spacing as usize
    }

    /// 采样部分占用的计数个数
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}
