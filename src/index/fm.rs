use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, IndexIoError};
use crate::index::bwt;
use crate::index::count::CountTable;
use crate::index::interval::{backward_extend, SaInterval};
use crate::index::occ::RankTable;
use crate::index::sa::SuffixArrayBuilder;
use crate::index::text::Text;
use crate::index::{IndexMeta, IndexOpt};
use crate::util::alphabet::Alphabet;

pub const FORMAT_VERSION: u32 = 1;

/// FM 索引：
/// - 字母以 [0..sigma) 编码，0 为哨兵。
/// - O 表按固定间距采样（间隙内顺扫补偿）。
/// - 保存完整 SA，区间可直接换算为文本偏移。
/// - 另存一份反转文本的 O 表，供 D 表（编辑下界）计算；两者 C 表相同。
///
/// 构建后只读，可在多个查询线程间共享。
#[derive(Debug, Serialize, Deserialize)]
pub struct FmIndex {
    version: u32,
    alphabet: Alphabet,
    opt: IndexOpt,
    sa: Vec<u32>,
    c: CountTable,
    occ: RankTable,
    rev_occ: RankTable,
    meta: IndexMeta,
}

impl FmIndex {
    pub fn build(alphabet: Alphabet, text: &Text, opt: &IndexOpt) -> Result<Self, BuildError> {
        if opt.occ_spacing == 0 {
            return Err(BuildError::InvalidSpacing);
        }
        // 编号必须在同一字母表下解释，否则 SA 构建会越界或得到错误的索引
        if !text.is_encoded_with(&alphabet) {
            return Err(BuildError::AlphabetMismatch);
        }
        let sigma = alphabet.sigma();
        let builder = opt.sa_algorithm.builder(opt.parallel);
        let reversed = text.reversed();

        let start = Instant::now();
        let (fwd, rev) = if opt.parallel {
            rayon::join(
                || build_tables(builder.as_ref(), text, sigma, opt.occ_spacing),
                || build_tables(builder.as_ref(), &reversed, sigma, opt.occ_spacing),
            )
        } else {
            (
                build_tables(builder.as_ref(), text, sigma, opt.occ_spacing),
                build_tables(builder.as_ref(), &reversed, sigma, opt.occ_spacing),
            )
        };
        let (sa, occ) = fwd?;
        let (_, rev_occ) = rev?;
        let c = CountTable::build(occ.bwt(), sigma)?;

        log::info!(
            "built FM index: n={} sigma={} sa={} spacing={} in {:.3}s",
            text.len(),
            sigma,
            builder.name(),
            opt.occ_spacing,
            start.elapsed().as_secs_f64()
        );

        Ok(Self {
            version: FORMAT_VERSION,
            alphabet,
            opt: opt.clone(),
            sa,
            c,
            occ,
            rev_occ,
            meta: IndexMeta::default(),
        })
    }

    /// 便捷入口：校验原始字节（需自带哨兵）后构建。
    pub fn from_bytes(alphabet: Alphabet, bytes: &[u8], opt: &IndexOpt) -> Result<Self, BuildError> {
        let text = Text::new(&alphabet, bytes)?;
        Self::build(alphabet, &text, opt)
    }

    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = meta;
    }

    pub fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    pub fn opt(&self) -> &IndexOpt {
        &self.opt
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// 文本长度（含哨兵）
    #[inline]
    pub fn len(&self) -> usize {
        self.sa.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sa.is_empty()
    }

    pub fn sa(&self) -> &[u32] {
        &self.sa
    }

    pub fn bwt(&self) -> &[u8] {
        self.occ.bwt()
    }

    pub fn c_table(&self) -> &CountTable {
        &self.c
    }

    pub fn occ(&self) -> &RankTable {
        &self.occ
    }

    pub fn rev_occ(&self) -> &RankTable {
        &self.rev_occ
    }

    pub fn full_interval(&self) -> Option<SaInterval> {
        SaInterval::full(self.len())
    }

    /// LF 映射：第 row 行旋转左移一位后所在的行
    #[inline]
    pub fn lf(&self, row: usize) -> usize {
        let ch = self.occ.bwt()[row];
        self.c.get(ch) as usize + self.occ.occ(ch, row) as usize
    }

    /// 在正向索引上把区间向左扩展一个符号
    #[inline]
    pub fn extend(&self, iv: SaInterval, code: u8) -> Option<SaInterval> {
        backward_extend(&self.c, &self.occ, iv, code)
    }

    /// 在反转文本的索引上扩展，等价于在原文本上向右扩展
    #[inline]
    pub fn extend_reversed(&self, iv: SaInterval, code: u8) -> Option<SaInterval> {
        backward_extend(&self.c, &self.rev_occ, iv, code)
    }

    /// 反向搜索精确匹配，pat 为编码后的符号（不应包含 0）
    pub fn backward_search(&self, pat: &[u8]) -> Option<SaInterval> {
        let mut iv = self.full_interval()?;
        for &a in pat.iter().rev() {
            iv = self.extend(iv, a)?;
        }
        Some(iv)
    }

    /// 取出 SA 区间对应的文本起始偏移
    pub fn locate(&self, iv: SaInterval) -> &[u32] {
        &self.sa[iv.lower..=iv.upper]
    }

    /// 经 LF 映射由 BWT 还原原文（含哨兵），用于校验索引
    pub fn recover_text(&self) -> Vec<u8> {
        self.alphabet.decode(&bwt::invert(&self.c, &self.occ))
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), IndexIoError> {
        let f = BufWriter::new(File::create(path)?);
        bincode::serialize_into(f, self)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, IndexIoError> {
        let f = BufReader::new(File::open(path)?);
        let idx: Self = bincode::deserialize_from(f)?;
        if idx.version != FORMAT_VERSION {
            return Err(IndexIoError::VersionMismatch { found: idx.version, expected: FORMAT_VERSION });
        }
        Ok(idx)
    }
}

fn build_tables(
    builder: &dyn SuffixArrayBuilder,
    text: &Text,
    sigma: usize,
    spacing: usize,
) -> Result<(Vec<u32>, RankTable), BuildError> {
    let start = Instant::now();
    let sa = builder.build(text, sigma);
    log::debug!("suffix array ({}) for n={} in {:?}", builder.name(), text.len(), start.elapsed());
    let bwt = bwt::build_bwt(text.codes(), &sa);
    let occ = RankTable::build(bwt, sigma, spacing)?;
    Ok((sa, occ))
}
