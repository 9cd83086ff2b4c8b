use std::io;
use std::path::PathBuf;

/// 核心层错误类型
///
/// 文件系统访问失败单独成为一种错误，调用方可以据此区分；
/// "组织不存在"、"没有匹配结果" 等情况不属于错误，由各操作的返回值表达。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 读取目录或元数据失败（路径不存在、无权限等）
    #[error("无法访问 {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 扫描被取消
    #[error("扫描已取消")]
    Cancelled,

    /// 项目文件序列化失败
    #[error("无法生成项目文件: {0}")]
    ProjectFile(#[from] toml::ser::Error),

    /// 创建时间无法转换为 TOML 时间
    #[error("无法转换创建时间: {0}")]
    Timestamp(#[from] toml::value::DatetimeParseError),
}

/// 根目录校验错误（配置层使用，与核心错误分开）
#[derive(Debug, thiserror::Error)]
pub enum RootError {
    #[error("The environment variable ${variable} needs to be set")]
    NotConfigured { variable: &'static str },

    #[error("The {kind} root directory \"{}\" does not exist", path.display())]
    Missing { kind: &'static str, path: PathBuf },

    #[error("The {kind} root directory \"{}\" is not a directory", path.display())]
    NotADirectory { kind: &'static str, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// 为 io::Error 附加出错的路径
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// 是否为文件系统访问错误
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// 给 `io::Result` 附加路径上下文
pub(crate) trait IoResultExt<T> {
    fn with_path(self, path: &std::path::Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| Error::io(path, source))
    }
}
