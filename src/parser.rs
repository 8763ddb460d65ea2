//! 过滤命令的语法分析器
//!
//! ## 命令形式
//!
//! ```text
//! // 完整查询：指定作用域加条件
//! from user.profile where name ilike '%wei%' and age >= 18
//!
//! // 只切换作用域
//! from job_queue.job
//!
//! // 沿用当前作用域继续过滤 (from 子句缺省)
//! where status = pending
//! status = pending
//!
//! // 别名定义：把短名映射到完整作用域段
//! alias accounts as a, job_queue as jq
//! ```
//!
//! ## 拆分规则
//!
//! 1. 取 `from` 关键字 (独立单词) 的首次出现, 其后到首个 `where` 为止
//!    是作用域；没有 `from` 时整个输入都是条件子句, 作用域为空。
//! 2. 条件子句去掉字面 `where` 前缀后, 按字面连接词 `" and "`
//!    (小写、区分大小写) 拆成单个条件, 交给 [`scan_condition`]。
//!    值里出现的 `" and "` 同样会被拆开 —— 语法没有引号感知,
//!    这是有意保留的已知限制。
//! 3. 全部子句先解析完, 再按源顺序报告第一个出错的子句。

use crate::ast::{Condition, ParsedQuery};
use crate::lexer::scan_condition;

/// 解析错误, 携带出错的原始文本
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 条件子句不符合 `<field> <operator> <value>` 语法
    MalformedCondition(String),
    /// 别名定义项不符合 `<source> as <short>` 语法
    MalformedAlias(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedCondition(text) => write!(f, "Bad expression \"{}\"", text),
            ParseError::MalformedAlias(text) => write!(f, "Invalid alias \"{}\"", text),
        }
    }
}

impl std::error::Error for ParseError {}

/// 一条完整的输入命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// 查询命令, 编译后用于跳转
    Query(ParsedQuery),
    /// 别名定义命令, (短名, 完整作用域) 对的列表
    Alias(Vec<(String, String)>),
}

/// 解析一条输入命令并按命令类型分发
///
/// 首个单词是 `alias` 时走别名定义, 其余一律按查询命令处理
/// (没有 `from` 的裸条件子句也是合法查询)。
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let input = input.trim();
    match input.split_whitespace().next() {
        Some("alias") => Ok(Command::Alias(parse_alias(input)?)),
        _ => Ok(Command::Query(parse_query(input)?)),
    }
}

/// 解析查询命令：作用域加条件列表
pub fn parse_query(command: &str) -> Result<ParsedQuery, ParseError> {
    let (scope, clause) = split_scope(command);
    let conditions = parse_conditions(strip_where(clause))?;
    Ok(ParsedQuery { scope, conditions })
}

/// 解析别名定义命令 `alias <source> as <short>, ...`
pub fn parse_alias(command: &str) -> Result<Vec<(String, String)>, ParseError> {
    let command = command.trim();
    let items = command
        .strip_prefix("alias")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim)
        .filter(|rest| !rest.is_empty())
        .ok_or_else(|| ParseError::MalformedAlias(command.to_string()))?;

    items
        .split(',')
        .map(|item| parse_alias_item(item.trim()))
        .collect()
}

/// 解析单个别名项 `<source> as <short>`, 返回 (短名, 完整名)
fn parse_alias_item(item: &str) -> Result<(String, String), ParseError> {
    let mut words = item.split_whitespace();
    match (words.next(), words.next(), words.next(), words.next()) {
        (Some(source), Some("as"), Some(short), None)
            if is_word(source) && is_word(short) =>
        {
            Ok((short.to_string(), source.to_string()))
        }
        _ => Err(ParseError::MalformedAlias(item.to_string())),
    }
}

fn is_word(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// 按 `from` 关键字把命令拆成作用域和条件子句
fn split_scope(command: &str) -> (Option<String>, &str) {
    // from 之后必须还有内容, 收尾的 from 只是普通的值文本
    let rest = match find_keyword(command, "from") {
        Some((_, from_end)) if from_end < command.len() => &command[from_end..],
        _ => return (None, command),
    };
    match find_keyword(rest, "where") {
        Some((where_start, _)) => (non_empty(rest[..where_start].trim()), &rest[where_start..]),
        None => (non_empty(rest.trim()), ""),
    }
}

fn non_empty(scope: &str) -> Option<String> {
    if scope.is_empty() {
        None
    } else {
        Some(scope.to_string())
    }
}

/// 查找关键字作为独立单词的首次出现, 返回其字节区间
fn find_keyword(text: &str, keyword: &str) -> Option<(usize, usize)> {
    let mut search_from = 0;
    while let Some(found) = text[search_from..].find(keyword) {
        let start = search_from + found;
        let end = start + keyword.len();
        let bounded_before = start == 0 || text[..start].ends_with(char::is_whitespace);
        let bounded_after = end == text.len() || text[end..].starts_with(char::is_whitespace);
        if bounded_before && bounded_after {
            return Some((start, end));
        }
        search_from = end;
    }
    None
}

/// 去掉条件子句开头的字面 `where` 前缀
fn strip_where(clause: &str) -> &str {
    let clause = clause.trim();
    if let Some(rest) = clause.strip_prefix("where") {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return rest.trim_start();
        }
    }
    clause
}

/// 按字面 `" and "` 拆分并解析全部条件子句
fn parse_conditions(clause: &str) -> Result<Vec<Condition>, ParseError> {
    if clause.is_empty() {
        return Ok(Vec::new());
    }

    // 先对全部子句做解析, 再按源顺序报告第一个错误
    let parsed: Vec<Result<Condition, ParseError>> = clause
        .split(" and ")
        .map(|text| scan_condition(text.trim()))
        .collect();

    if let Some(Err(error)) = parsed.iter().find(|result| result.is_err()) {
        return Err(error.clone());
    }

    Ok(parsed.into_iter().filter_map(Result::ok).collect())
}
