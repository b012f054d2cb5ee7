use thiserror::Error;

fn as_char(symbol: &u8) -> char {
    char::from(*symbol)
}

/// 索引构建阶段的错误。任何一种都会中止整个构建，不会留下半成品索引。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("text must contain at least the sentinel")]
    EmptyText,

    #[error("text does not end with the sentinel symbol")]
    MissingSentinel,

    /// 哨兵出现在末尾以外的位置（包括多次出现）
    #[error("sentinel found at position {position}, only the final position is allowed")]
    MisplacedSentinel { position: usize },

    #[error("symbol {:?} at position {position} is not in the alphabet", as_char(.symbol))]
    UnknownSymbol { symbol: u8, position: usize },

    #[error("text length {len} exceeds the u32 suffix array range")]
    TextTooLong { len: usize },

    /// 文本是按另一个字母表编码的
    #[error("text was encoded with a different alphabet than the one given to the index")]
    AlphabetMismatch,

    #[error("occ sampling spacing must be at least 1")]
    InvalidSpacing,

    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),
}

/// 单条查询的错误，只影响该查询本身。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("pattern symbol {:?} at position {position} is not in the alphabet", as_char(.symbol))]
    UnknownSymbol { symbol: u8, position: usize },

    #[error("pattern contains the sentinel at position {position}")]
    SentinelInPattern { position: usize },
}

/// 索引文件读写错误。
#[derive(Debug, Error)]
pub enum IndexIoError {
    #[error("index I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("index encoding failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error("index format version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
}
