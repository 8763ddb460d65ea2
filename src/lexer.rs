//! 条件子句的词法分析器
//!
//! 把单个条件子句 `<field> <operator> <value>` 拆成结构化的 [`Condition`]。
//! 字段按最短前缀优先匹配, 运算符按 [`Operator::MATCH_ORDER`] 的优先级
//! 做整体短语匹配, 剩余文本去掉首尾空白后即为值。

use crate::ast::Condition;
use crate::parser::ParseError;
use crate::token::Operator;

/// 字段字符：字母、数字、下划线和点 (关系路径分隔符)
fn is_field_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// 在 rest 的开头匹配一个运算符 token, 返回运算符和剩余文本
///
/// 词形运算符 (like/in/is null 等) 之后必须是非标识符字符或输入结束,
/// 避免把 `intent` 读成 `in` 加 `tent`。
fn match_operator(rest: &str) -> Option<(Operator, &str)> {
    for op in Operator::MATCH_ORDER {
        if let Some(tail) = rest.strip_prefix(op.token()) {
            if op.is_word() && tail.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
                continue;
            }
            return Some((op, tail));
        }
    }
    None
}

/// 扫描单个条件子句
///
/// 字段采用非贪婪匹配：从最短的字段前缀开始, 逐步加长, 直到剩余文本
/// 能以一个运算符开头为止。没有任何拆分成立时, 整个子句判定为
/// 非法条件, 错误里携带原始子句文本。
pub fn scan_condition(clause: &str) -> Result<Condition, ParseError> {
    let field_extent = clause
        .char_indices()
        .find(|&(_, c)| !is_field_char(c))
        .map(|(i, _)| i)
        .unwrap_or(clause.len());

    // 字段字符均为 ASCII, 逐字节加长即可
    for end in 1..=field_extent {
        let rest = clause[end..].trim_start();
        if let Some((operator, tail)) = match_operator(rest) {
            return Ok(Condition {
                field: clause[..end].to_string(),
                operator,
                value: tail.trim().to_string(),
            });
        }
    }

    Err(ParseError::MalformedCondition(clause.to_string()))
}
