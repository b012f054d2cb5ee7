//! # fm-search
//!
//! 基于 BWT / FM 索引的精确与容错子串搜索，用作序列比对（如基因组 read 定位）的匹配引擎。
//! 参考文本只建一次索引，之后可被任意多个查询并发使用。
//!
//! - **索引构建**：后缀数组（可替换策略：朴素旋转排序 / 倍增 / SA-IS）、BWT、C 表、采样 O 表
//! - **下界表**：每条查询的 D 表，剪去不可能在预算内完成的分支
//! - **容错搜索**：带编辑预算（替换 / 插入 / 删除）的回溯搜索，返回 SA 区间集合
//!
//! ## 快速示例
//!
//! ```rust
//! use fm_search::index::{FmIndex, IndexOpt};
//! use fm_search::search::{InexactSearcher, Query};
//! use fm_search::util::alphabet::Alphabet;
//!
//! let fm = FmIndex::from_bytes(Alphabet::dna(), b"GATTACA$", &IndexOpt::default()).unwrap();
//! let query = Query::new(fm.alphabet(), b"ATC", 1).unwrap();
//! let hits = InexactSearcher::new(&fm, &query).intervals();
//! assert!(hits.iter().any(|&iv| fm.locate(iv).contains(&1)));
//! ```
//!
//! ## 模块说明
//!
//! - [`index`] — 文本模型、后缀数组、BWT、C / O 表与 FM 索引
//! - [`search`] — D 表与容错回溯搜索
//! - [`report`] — 区间到文本偏移的展开与 TSV 输出
//! - [`io`] — FASTA / FASTQ 解析
//! - [`util`] — 字母表与 DNA 工具函数

pub mod error;
pub mod index;
pub mod io;
pub mod report;
pub mod search;
pub mod util;

pub use error::{BuildError, IndexIoError, QueryError};
