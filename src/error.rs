//! 错误类型定义
//!
//! "不存在"（无路径、无边）不是错误，而是以 `None` 返回；
//! 这里只包含参数错误和结构不变量被破坏两类失败。

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // ==================== 参数错误 ====================
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    #[error("索引越界: {index} (长度 {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("边 {from} -> {to} 的容量为负: {capacity}")]
    NegativeCapacity {
        from: String,
        to: String,
        capacity: f64,
    },

    // ==================== 结构不变量 ====================
    #[error("树已经有根节点")]
    RootAlreadyExists,

    #[error("挂接后节点会成为自己的祖先")]
    CycleDetected,

    #[error("路径不能为空")]
    EmptyPath,

    #[error("只读视图不允许修改")]
    ReadOnlyView,

    // ==================== 导入 ====================
    #[error("导入错误: {0}")]
    Import(String),

    #[error("CSV 错误: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// 是否属于参数错误（调用方传入了非法值）
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_) | Error::IndexOutOfBounds { .. } | Error::NegativeCapacity { .. }
        )
    }

    /// 是否属于结构不变量错误（拓扑构造有误）
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::RootAlreadyExists
                | Error::CycleDetected
                | Error::EmptyPath
                | Error::ReadOnlyView
        )
    }

    pub(crate) fn index(index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { index, len }
    }
}
