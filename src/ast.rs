use crate::token::Operator;

/// 解析结果的根节点, 代表一条完整的过滤命令
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// 过滤的目标作用域 (点分路径), 为 None 时沿用当前作用域
    pub scope: Option<String>,
    /// 按源文本顺序排列的过滤条件列表
    pub conditions: Vec<Condition>,
}

/// 代表单个过滤条件, 例如：`name like '%plan%'`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// 字段的点分查找路径
    pub field: String,
    pub operator: Operator,
    /// 原始值文本, 未做任何转义处理, 可以为空
    pub value: String,
}

/// 单个条件编译后的查询对, 例如：`name__contains` / `plan`
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPair {
    /// 双下划线连接的查找路径, 带运算符后缀
    pub field: String,
    /// 查询值, 尚未做百分号编码
    pub value: String,
}

/// 编译结果：列表页路径加查询串
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// 由作用域解析出的路径, 命令没有 from 子句时为 None
    pub path: Option<String>,
    /// 以 & 连接的 field=value 序列, 保持条件的源顺序
    pub query: String,
}
