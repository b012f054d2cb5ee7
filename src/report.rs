use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::index::FmIndex;
use crate::search::Alignment;

/// 查询所在链
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn as_char(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

/// 一条输出记录：SA 区间展开后的单个文本偏移
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hit {
    pub query: String,
    pub strand: Strand,
    pub offset: u32,
    pub edits: u32,
    pub cigar: String,
}

/// 把区间展开为文本偏移。同一 (偏移, CIGAR) 只保留一次，结果有序。
/// 哨兵所在的偏移 n - 1 不是文本位置，不输出。
pub fn expand_hits<'a>(
    index: &FmIndex,
    query: &str,
    strand: Strand,
    alignments: impl IntoIterator<Item = &'a Alignment>,
) -> Vec<Hit> {
    let sentinel_offset = index.len().saturating_sub(1) as u32;
    let mut hits = BTreeSet::new();
    for aln in alignments {
        let cigar = aln.cigar();
        for &offset in index.locate(aln.interval).iter().filter(|&&o| o != sentinel_offset) {
            hits.insert(Hit {
                query: query.to_string(),
                strand,
                offset,
                edits: aln.edits,
                cigar: cigar.clone(),
            });
        }
    }
    hits.into_iter().collect()
}

pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "#query\tstrand\toffset\tedits\tcigar")
}

pub fn write_hits<W: Write>(out: &mut W, hits: &[Hit]) -> io::Result<()> {
    for h in hits {
        writeln!(out, "{}\t{}\t{}\t{}\t{}", h.query, h.strand.as_char(), h.offset, h.edits, h.cigar)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexOpt;
    use crate::search::{InexactSearcher, Query};
    use crate::util::alphabet::Alphabet;

    #[test]
    fn expands_and_writes_tsv() {
        let fm = FmIndex::from_bytes(Alphabet::dna(), b"ACAGACA$", &IndexOpt::default()).unwrap();
        let q = Query::new(fm.alphabet(), b"ACA", 0).unwrap();
        let alns = InexactSearcher::new(&fm, &q).alignments();
        let hits = expand_hits(&fm, "r1", Strand::Forward, &alns);
        assert_eq!(hits.iter().map(|h| h.offset).collect::<Vec<_>>(), vec![0, 4]);

        let mut buf = Vec::new();
        write_hits(&mut buf, &hits).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "r1\t+\t0\t0\t3M\nr1\t+\t4\t0\t3M\n");
    }

    #[test]
    fn sentinel_row_is_not_reported() {
        // 预算不小于模式长度时，全插入路径停在全区间（含哨兵行）
        let fm = FmIndex::from_bytes(Alphabet::dna(), b"CCC$", &IndexOpt::default()).unwrap();
        let q = Query::new(fm.alphabet(), b"A", 1).unwrap();
        let alns = InexactSearcher::new(&fm, &q).alignments();
        assert!(alns.iter().any(|a| fm.locate(a.interval).contains(&3)));

        let hits = expand_hits(&fm, "r1", Strand::Forward, &alns);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| h.offset < 3));
    }
}
