//! 查询：D 表下界与带编辑预算的回溯搜索。

pub mod inexact;
pub mod lower_bound;

use crate::error::QueryError;
use crate::util::alphabet::Alphabet;

pub use inexact::{Alignment, EditOp, InexactSearcher};
pub use lower_bound::LowerBounds;

/// 查询参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOpt {
    /// 单条查询允许的最大编辑数（替换、插入、删除）
    pub max_edits: u32,
    /// 并发处理查询的线程数
    pub threads: usize,
}

impl Default for SearchOpt {
    fn default() -> Self {
        Self { max_edits: 1, threads: 1 }
    }
}

/// 一条已校验的查询：编码后的模式串加编辑预算。
/// 模式中的未知符号或哨兵在这里被拒绝，搜索过程本身不会出错。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pattern: Vec<u8>,
    max_edits: u32,
}

impl Query {
    pub fn new(alphabet: &Alphabet, pattern: &[u8], max_edits: u32) -> Result<Self, QueryError> {
        Ok(Self { pattern: alphabet.encode_pattern(pattern)?, max_edits })
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn max_edits(&self) -> u32 {
        self.max_edits
    }
}
