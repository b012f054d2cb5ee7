//! FM 索引构建：文本校验、后缀数组、BWT、C 表与 O 表。

pub mod bwt;
pub mod count;
pub mod fm;
pub mod interval;
pub mod occ;
pub mod sa;
pub mod sais;
pub mod text;

use serde::{Deserialize, Serialize};

pub use fm::FmIndex;
pub use interval::SaInterval;
pub use sa::SaAlgorithm;
pub use text::Text;

/// 索引构建参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOpt {
    /// O 表采样间距；1 为完整表
    pub occ_spacing: usize,
    pub sa_algorithm: SaAlgorithm,
    /// 并行构建（正/反向表同时构建，朴素策略并行排序），结果与串行一致
    pub parallel: bool,
}

impl Default for IndexOpt {
    fn default() -> Self {
        Self { occ_spacing: 32, sa_algorithm: SaAlgorithm::Sais, parallel: false }
    }
}

/// 索引来源信息，随索引一同保存
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub reference_file: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}
