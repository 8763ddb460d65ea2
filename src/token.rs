//! The operator vocabulary for the filter language.

/// A filter operator, as written in command text.
///
/// This enumeration is the single definition of the operator set: the
/// condition scanner matches source text against [`Operator::MATCH_ORDER`]
/// and the URL compiler matches exhaustively on the variants, so the two
/// sides cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,        // =
    Gt,        // >
    Gte,       // >=
    Lt,        // <
    Lte,       // <=
    IsNull,    // "is null"
    IsNotNull, // "is not null"
    Like,      // "like", SQL-style % wildcards
    Ilike,     // "ilike", case-insensitive variant
    In,        // "in", parenthesized comma list
}

impl Operator {
    /// All operators in scanning priority order.
    ///
    /// Multi-word phrases come first so `is not null` is never mis-split
    /// on `is`, and two-character symbols come before their one-character
    /// prefixes so `>=` is never read as `>` with value `=5`.
    pub const MATCH_ORDER: [Operator; 10] = [
        Operator::IsNotNull,
        Operator::IsNull,
        Operator::Ilike,
        Operator::Like,
        Operator::In,
        Operator::Gte,
        Operator::Lte,
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
    ];

    /// The source-text spelling of the operator.
    pub fn token(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::IsNull => "is null",
            Operator::IsNotNull => "is not null",
            Operator::Like => "like",
            Operator::Ilike => "ilike",
            Operator::In => "in",
        }
    }

    /// Whether the token is spelled with identifier characters.
    ///
    /// Word tokens need a boundary check after the match; symbol tokens
    /// may run directly into their value (`x>=5`).
    pub fn is_word(self) -> bool {
        matches!(
            self,
            Operator::IsNull | Operator::IsNotNull | Operator::Like | Operator::Ilike | Operator::In
        )
    }
}
