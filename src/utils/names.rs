use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// 六位数字加下划线的日期前缀，例如 `230914_`
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}_").expect("日期前缀正则无效"));

static NON_SNAKE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]").expect("字符过滤正则无效"));

static EDGE_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^a-z0-9]+|[^a-z0-9]+$").expect("首尾过滤正则无效"));

/// 去掉名称开头的 `NNNNNN_` 日期前缀，不匹配时原样返回
pub fn strip_date_prefix(name: &str) -> &str {
    match DATE_PREFIX.find(name) {
        Some(prefix) => &name[prefix.end()..],
        None => name,
    }
}

/// 统一大小写和分隔符，用于匹配和显示
pub fn normalize(name: &str) -> String {
    name.to_lowercase().replace('_', " ")
}

/// 项目目录名和搜索词共用的清洗流程
pub fn clean_name(name: &str) -> String {
    normalize(strip_date_prefix(name))
}

/// 把用户输入的项目名转换成安全的目录名
///
/// 小写、空格转下划线、去掉 `[a-z0-9_]` 以外的字符，再去掉首尾的非字母数字。
pub fn snakify(text: &str) -> String {
    let lowered = text.to_lowercase().replace(' ', "_");
    let filtered = NON_SNAKE_CHARS.replace_all(&lowered, "");
    EDGE_NON_ALNUM.replace_all(&filtered, "").into_owned()
}

/// 目录名使用的 `YYMMDD` 日期前缀
pub fn date_prefix(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}
