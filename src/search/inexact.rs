use std::collections::{BTreeSet, HashSet};
use std::fmt::Write as _;

use crate::index::{FmIndex, SaInterval};
use crate::search::lower_bound::LowerBounds;
use crate::search::Query;

/// 单步编辑操作，按 SAM CIGAR 的方向约定（模式为 query，文本为 reference）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EditOp {
    /// 模式符号与文本符号相同
    Match,
    /// 替换
    Mismatch,
    /// 模式多出一个符号，文本中没有对应（CIGAR `I`）
    Insertion,
    /// 文本多出一个符号，模式中没有对应（CIGAR `D`）
    Deletion,
}

impl EditOp {
    pub fn cigar_char(self) -> char {
        match self {
            EditOp::Match => 'M',
            EditOp::Mismatch => 'X',
            EditOp::Insertion => 'I',
            EditOp::Deletion => 'D',
        }
    }

    #[inline]
    fn cost(self) -> u32 {
        u32::from(self != EditOp::Match)
    }
}

/// 一个命中的 SA 区间及到达它的编辑路径（按模式自左向右）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alignment {
    pub interval: SaInterval,
    pub edits: u32,
    pub ops: Vec<EditOp>,
}

impl Alignment {
    /// 游程编码的 CIGAR，如 `2M1X`
    pub fn cigar(&self) -> String {
        let mut out = String::new();
        let mut iter = self.ops.iter().copied().peekable();
        while let Some(op) = iter.next() {
            let mut run = 1;
            while iter.peek() == Some(&op) {
                iter.next();
                run += 1;
            }
            let _ = write!(out, "{}{}", run, op.cigar_char());
        }
        out
    }
}

/// 搜索状态：剩余未消耗的模式前缀 W[0..remaining)、剩余编辑预算和当前区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct State {
    remaining: usize,
    edits_left: u32,
    interval: SaInterval,
}

/// 带编辑预算的回溯搜索。
///
/// 从模式末尾向前消耗符号，每步可以：
/// - 跳过一个模式符号（`Insertion`，区间不变）
/// - 用字母表中某个符号 b 扩展区间：b 等于当前模式符号为 `Match`，否则为 `Mismatch`
/// - 用 b 扩展区间但不消耗模式符号（`Deletion`）
///
/// 剩余预算小于 D 表下界的状态直接剪枝。递归用显式栈展开，深度不受调用栈限制；
/// 整个过程只读索引，可并发执行多个查询。
pub struct InexactSearcher<'a> {
    index: &'a FmIndex,
    pattern: &'a [u8],
    max_edits: u32,
    bounds: LowerBounds,
}

impl<'a> InexactSearcher<'a> {
    pub fn new(index: &'a FmIndex, query: &'a Query) -> Self {
        let bounds = LowerBounds::compute(index, query.pattern());
        Self { index, pattern: query.pattern(), max_edits: query.max_edits(), bounds }
    }

    pub fn lower_bounds(&self) -> &LowerBounds {
        &self.bounds
    }

    fn start(&self) -> Option<State> {
        let interval = self.index.full_interval()?;
        Some(State { remaining: self.pattern.len(), edits_left: self.max_edits, interval })
    }

    #[inline]
    fn pruned(&self, state: &State) -> bool {
        state.edits_left < self.bounds.for_prefix(state.remaining)
    }

    fn successors(&self, state: &State, out: &mut Vec<(EditOp, State)>) {
        let i = state.remaining;
        let e = state.edits_left;
        let want = self.pattern[i - 1];

        if e > 0 {
            out.push((EditOp::Insertion, State { remaining: i - 1, edits_left: e - 1, interval: state.interval }));
        }
        for b in self.index.alphabet().search_ranks() {
            let Some(next) = self.index.extend(state.interval, b) else {
                continue;
            };
            if b == want {
                out.push((EditOp::Match, State { remaining: i - 1, edits_left: e, interval: next }));
            } else if e > 0 {
                out.push((EditOp::Mismatch, State { remaining: i - 1, edits_left: e - 1, interval: next }));
            }
            if e > 0 {
                out.push((EditOp::Deletion, State { remaining: i, edits_left: e - 1, interval: next }));
            }
        }
    }

    /// 所有在预算内可对齐的 SA 区间（集合语义，不同路径到达同一区间只报告一次）
    pub fn intervals(&self) -> BTreeSet<SaInterval> {
        let mut found = BTreeSet::new();
        let Some(start) = self.start() else {
            return found;
        };
        let mut seen: HashSet<State> = HashSet::new();
        let mut stack = vec![start];
        let mut next = Vec::new();

        while let Some(state) = stack.pop() {
            if !seen.insert(state) || self.pruned(&state) {
                continue;
            }
            if state.remaining == 0 {
                found.insert(state.interval);
                continue;
            }
            next.clear();
            self.successors(&state, &mut next);
            stack.extend(next.drain(..).map(|(_, s)| s));
        }

        log::debug!(
            "pattern len={} k={}: {} states, {} intervals",
            self.pattern.len(),
            self.max_edits,
            seen.len(),
            found.len()
        );
        found
    }

    /// 与 `intervals` 覆盖相同的区间，但保留每条编辑路径
    pub fn alignments(&self) -> BTreeSet<Alignment> {
        let mut found = BTreeSet::new();
        let Some(start) = self.start() else {
            return found;
        };
        let mut stack = vec![(start, Vec::new())];
        let mut next = Vec::new();

        while let Some((state, ops)) = stack.pop() {
            if self.pruned(&state) {
                continue;
            }
            if state.remaining == 0 {
                // 路径是自右向左记录的
                let ops: Vec<EditOp> = ops.into_iter().rev().collect();
                let edits = ops.iter().map(|op| op.cost()).sum();
                found.insert(Alignment { interval: state.interval, edits, ops });
                continue;
            }
            next.clear();
            self.successors(&state, &mut next);
            for (op, s) in next.drain(..) {
                let mut path = ops.clone();
                path.push(op);
                stack.push((s, path));
            }
        }
        found
    }
}
