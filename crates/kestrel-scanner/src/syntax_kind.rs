//! Token kinds.
//!
//! `SyntaxKind` has exactly one variant per distinct lexeme shape. Each kind
//! belongs to exactly one `TokenClass`, the coarse partition consumers use
//! when they only care whether a token is a literal, an operator, and so on.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    // Structural
    Unknown = 0,
    EndOfFileToken,
    WhitespaceTrivia,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    ShebangTrivia,

    // Literals
    StringLiteral,
    NumericLiteral,
    BigIntLiteral,
    BooleanLiteral,
    NullLiteral,
    UndefinedLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Names
    Identifier,
    PrivateIdentifier,
    ReservedWord,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    ColonToken,
    QuestionDotToken,
    EqualsGreaterThanToken,

    // Arithmetic operators
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AsteriskAsteriskToken,

    // Comparison operators
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,

    // Logical operators
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionQuestionToken,

    // Bitwise operators
    AmpersandToken,
    BarToken,
    CaretToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,

    // Unary / update operators
    ExclamationToken,
    TildeToken,
    PlusPlusToken,
    MinusMinusToken,

    // Ternary and comma
    QuestionToken,
    CommaToken,

    // Assignment operators
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AsteriskAsteriskEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AmpersandAmpersandEqualsToken,
    BarBarEqualsToken,
    QuestionQuestionEqualsToken,

    // Keywords
    AwaitKeyword,
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    LetKeyword,
    NewKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,
    YieldKeyword,
}

/// Literal sub-classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Regex,
    Template,
    BigInt,
}

/// Operator sub-classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum OperatorClass {
    Assignment,
    Arithmetic,
    Comparison,
    Logical,
    Bitwise,
    Unary,
    Ternary,
    Comma,
}

/// The coarse, closed partition every `SyntaxKind` falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TokenClass {
    Literal(LiteralKind),
    Identifier,
    Keyword,
    ReservedWord,
    Operator(OperatorClass),
    Punctuation,
    EndOfFile,
    Invalid,
    Comment,
    Whitespace,
}

impl SyntaxKind {
    pub fn class(self) -> TokenClass {
        use SyntaxKind::*;
        match self {
            Unknown => TokenClass::Invalid,
            EndOfFileToken => TokenClass::EndOfFile,
            WhitespaceTrivia => TokenClass::Whitespace,
            SingleLineCommentTrivia | MultiLineCommentTrivia | ShebangTrivia => TokenClass::Comment,

            StringLiteral => TokenClass::Literal(LiteralKind::String),
            NumericLiteral => TokenClass::Literal(LiteralKind::Number),
            BigIntLiteral => TokenClass::Literal(LiteralKind::BigInt),
            BooleanLiteral => TokenClass::Literal(LiteralKind::Boolean),
            NullLiteral => TokenClass::Literal(LiteralKind::Null),
            UndefinedLiteral => TokenClass::Literal(LiteralKind::Undefined),
            RegularExpressionLiteral => TokenClass::Literal(LiteralKind::Regex),
            NoSubstitutionTemplateLiteral | TemplateHead | TemplateMiddle | TemplateTail => {
                TokenClass::Literal(LiteralKind::Template)
            }

            Identifier | PrivateIdentifier => TokenClass::Identifier,
            ReservedWord => TokenClass::ReservedWord,

            OpenBraceToken | CloseBraceToken | OpenParenToken | CloseParenToken
            | OpenBracketToken | CloseBracketToken | DotToken | DotDotDotToken
            | SemicolonToken | ColonToken | QuestionDotToken | EqualsGreaterThanToken => {
                TokenClass::Punctuation
            }

            PlusToken | MinusToken | AsteriskToken | SlashToken | PercentToken
            | AsteriskAsteriskToken => TokenClass::Operator(OperatorClass::Arithmetic),

            LessThanToken
            | GreaterThanToken
            | LessThanEqualsToken
            | GreaterThanEqualsToken
            | EqualsEqualsToken
            | ExclamationEqualsToken
            | EqualsEqualsEqualsToken
            | ExclamationEqualsEqualsToken => TokenClass::Operator(OperatorClass::Comparison),

            AmpersandAmpersandToken | BarBarToken | QuestionQuestionToken => {
                TokenClass::Operator(OperatorClass::Logical)
            }

            AmpersandToken
            | BarToken
            | CaretToken
            | LessThanLessThanToken
            | GreaterThanGreaterThanToken
            | GreaterThanGreaterThanGreaterThanToken => TokenClass::Operator(OperatorClass::Bitwise),

            ExclamationToken | TildeToken | PlusPlusToken | MinusMinusToken => {
                TokenClass::Operator(OperatorClass::Unary)
            }

            QuestionToken => TokenClass::Operator(OperatorClass::Ternary),
            CommaToken => TokenClass::Operator(OperatorClass::Comma),

            EqualsToken
            | PlusEqualsToken
            | MinusEqualsToken
            | AsteriskEqualsToken
            | SlashEqualsToken
            | PercentEqualsToken
            | AsteriskAsteriskEqualsToken
            | LessThanLessThanEqualsToken
            | GreaterThanGreaterThanEqualsToken
            | GreaterThanGreaterThanGreaterThanEqualsToken
            | AmpersandEqualsToken
            | BarEqualsToken
            | CaretEqualsToken
            | AmpersandAmpersandEqualsToken
            | BarBarEqualsToken
            | QuestionQuestionEqualsToken => TokenClass::Operator(OperatorClass::Assignment),

            AwaitKeyword | BreakKeyword | CaseKeyword | CatchKeyword | ClassKeyword
            | ConstKeyword | ContinueKeyword | DebuggerKeyword | DefaultKeyword
            | DeleteKeyword | DoKeyword | ElseKeyword | ExportKeyword | ExtendsKeyword
            | FinallyKeyword | ForKeyword | FunctionKeyword | IfKeyword | ImportKeyword
            | InKeyword | InstanceOfKeyword | LetKeyword | NewKeyword | ReturnKeyword
            | SuperKeyword | SwitchKeyword | ThisKeyword | ThrowKeyword | TryKeyword
            | TypeOfKeyword | VarKeyword | VoidKeyword | WhileKeyword | WithKeyword
            | YieldKeyword => TokenClass::Keyword,
        }
    }

    pub fn is_keyword(self) -> bool {
        self.class() == TokenClass::Keyword
    }

    pub fn is_reserved_word(self) -> bool {
        self == SyntaxKind::ReservedWord
    }

    pub fn is_literal(self) -> bool {
        matches!(self.class(), TokenClass::Literal(_))
    }

    pub fn is_operator(self) -> bool {
        matches!(self.class(), TokenClass::Operator(_))
    }

    pub fn is_punctuation(self) -> bool {
        self.class() == TokenClass::Punctuation
    }

    pub fn is_assignment_operator(self) -> bool {
        self.class() == TokenClass::Operator(OperatorClass::Assignment)
    }

    /// Comments and whitespace.
    pub fn is_trivia(self) -> bool {
        matches!(self.class(), TokenClass::Comment | TokenClass::Whitespace)
    }

    /// Identifiers plus every word-like token; valid as a property name.
    pub fn is_identifier_or_keyword(self) -> bool {
        match self.class() {
            TokenClass::Identifier => self != SyntaxKind::PrivateIdentifier,
            TokenClass::Keyword | TokenClass::ReservedWord => true,
            TokenClass::Literal(LiteralKind::Boolean | LiteralKind::Null | LiteralKind::Undefined) => {
                true
            }
            _ => false,
        }
    }

    /// Tokens after which a `/` is a division operator rather than the start
    /// of a regular expression.
    pub fn ends_operand(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            Identifier
                | PrivateIdentifier
                | ReservedWord
                | StringLiteral
                | NumericLiteral
                | BigIntLiteral
                | BooleanLiteral
                | NullLiteral
                | UndefinedLiteral
                | RegularExpressionLiteral
                | NoSubstitutionTemplateLiteral
                | TemplateTail
                | CloseParenToken
                | CloseBracketToken
                | CloseBraceToken
                | ThisKeyword
                | SuperKeyword
                | PlusPlusToken
                | MinusMinusToken
        )
    }
}

/// Future reserved words. They scan as `SyntaxKind::ReservedWord`.
const RESERVED_WORDS: &[&str] = &[
    "abstract",
    "boolean",
    "byte",
    "char",
    "double",
    "enum",
    "final",
    "float",
    "goto",
    "implements",
    "int",
    "interface",
    "long",
    "native",
    "package",
    "private",
    "protected",
    "public",
    "short",
    "static",
    "synchronized",
    "throws",
    "transient",
    "volatile",
];

/// Classify an identifier-shaped word. Returns `None` for plain identifiers.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    use SyntaxKind::*;
    let kind = match text {
        "await" => AwaitKeyword,
        "break" => BreakKeyword,
        "case" => CaseKeyword,
        "catch" => CatchKeyword,
        "class" => ClassKeyword,
        "const" => ConstKeyword,
        "continue" => ContinueKeyword,
        "debugger" => DebuggerKeyword,
        "default" => DefaultKeyword,
        "delete" => DeleteKeyword,
        "do" => DoKeyword,
        "else" => ElseKeyword,
        "export" => ExportKeyword,
        "extends" => ExtendsKeyword,
        "finally" => FinallyKeyword,
        "for" => ForKeyword,
        "function" => FunctionKeyword,
        "if" => IfKeyword,
        "import" => ImportKeyword,
        "in" => InKeyword,
        "instanceof" => InstanceOfKeyword,
        "let" => LetKeyword,
        "new" => NewKeyword,
        "return" => ReturnKeyword,
        "super" => SuperKeyword,
        "switch" => SwitchKeyword,
        "this" => ThisKeyword,
        "throw" => ThrowKeyword,
        "try" => TryKeyword,
        "typeof" => TypeOfKeyword,
        "var" => VarKeyword,
        "void" => VoidKeyword,
        "while" => WhileKeyword,
        "with" => WithKeyword,
        "yield" => YieldKeyword,
        "true" | "false" => BooleanLiteral,
        "null" => NullLiteral,
        "undefined" => UndefinedLiteral,
        _ if RESERVED_WORDS.contains(&text) => ReservedWord,
        _ => return None,
    };
    Some(kind)
}

pub fn keyword_to_text(kind: SyntaxKind) -> Option<&'static str> {
    use SyntaxKind::*;
    let text = match kind {
        AwaitKeyword => "await",
        BreakKeyword => "break",
        CaseKeyword => "case",
        CatchKeyword => "catch",
        ClassKeyword => "class",
        ConstKeyword => "const",
        ContinueKeyword => "continue",
        DebuggerKeyword => "debugger",
        DefaultKeyword => "default",
        DeleteKeyword => "delete",
        DoKeyword => "do",
        ElseKeyword => "else",
        ExportKeyword => "export",
        ExtendsKeyword => "extends",
        FinallyKeyword => "finally",
        ForKeyword => "for",
        FunctionKeyword => "function",
        IfKeyword => "if",
        ImportKeyword => "import",
        InKeyword => "in",
        InstanceOfKeyword => "instanceof",
        LetKeyword => "let",
        NewKeyword => "new",
        ReturnKeyword => "return",
        SuperKeyword => "super",
        SwitchKeyword => "switch",
        ThisKeyword => "this",
        ThrowKeyword => "throw",
        TryKeyword => "try",
        TypeOfKeyword => "typeof",
        VarKeyword => "var",
        VoidKeyword => "void",
        WhileKeyword => "while",
        WithKeyword => "with",
        YieldKeyword => "yield",
        _ => return None,
    };
    Some(text)
}

/// Punctuators and operators, longest first so a prefix scan finds the
/// longest match.
pub(crate) const PUNCTUATORS: &[(&str, SyntaxKind)] = &[
    (">>>=", SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
    ("...", SyntaxKind::DotDotDotToken),
    ("===", SyntaxKind::EqualsEqualsEqualsToken),
    ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
    ("**=", SyntaxKind::AsteriskAsteriskEqualsToken),
    ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
    (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
    (">>>", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
    ("&&=", SyntaxKind::AmpersandAmpersandEqualsToken),
    ("||=", SyntaxKind::BarBarEqualsToken),
    ("??=", SyntaxKind::QuestionQuestionEqualsToken),
    ("=>", SyntaxKind::EqualsGreaterThanToken),
    ("==", SyntaxKind::EqualsEqualsToken),
    ("!=", SyntaxKind::ExclamationEqualsToken),
    ("<=", SyntaxKind::LessThanEqualsToken),
    (">=", SyntaxKind::GreaterThanEqualsToken),
    ("&&", SyntaxKind::AmpersandAmpersandToken),
    ("||", SyntaxKind::BarBarToken),
    ("??", SyntaxKind::QuestionQuestionToken),
    ("?.", SyntaxKind::QuestionDotToken),
    ("++", SyntaxKind::PlusPlusToken),
    ("--", SyntaxKind::MinusMinusToken),
    ("**", SyntaxKind::AsteriskAsteriskToken),
    ("<<", SyntaxKind::LessThanLessThanToken),
    (">>", SyntaxKind::GreaterThanGreaterThanToken),
    ("+=", SyntaxKind::PlusEqualsToken),
    ("-=", SyntaxKind::MinusEqualsToken),
    ("*=", SyntaxKind::AsteriskEqualsToken),
    ("/=", SyntaxKind::SlashEqualsToken),
    ("%=", SyntaxKind::PercentEqualsToken),
    ("&=", SyntaxKind::AmpersandEqualsToken),
    ("|=", SyntaxKind::BarEqualsToken),
    ("^=", SyntaxKind::CaretEqualsToken),
    ("{", SyntaxKind::OpenBraceToken),
    ("}", SyntaxKind::CloseBraceToken),
    ("(", SyntaxKind::OpenParenToken),
    (")", SyntaxKind::CloseParenToken),
    ("[", SyntaxKind::OpenBracketToken),
    ("]", SyntaxKind::CloseBracketToken),
    (".", SyntaxKind::DotToken),
    (";", SyntaxKind::SemicolonToken),
    (":", SyntaxKind::ColonToken),
    (",", SyntaxKind::CommaToken),
    ("?", SyntaxKind::QuestionToken),
    ("=", SyntaxKind::EqualsToken),
    ("+", SyntaxKind::PlusToken),
    ("-", SyntaxKind::MinusToken),
    ("*", SyntaxKind::AsteriskToken),
    ("/", SyntaxKind::SlashToken),
    ("%", SyntaxKind::PercentToken),
    ("<", SyntaxKind::LessThanToken),
    (">", SyntaxKind::GreaterThanToken),
    ("&", SyntaxKind::AmpersandToken),
    ("|", SyntaxKind::BarToken),
    ("^", SyntaxKind::CaretToken),
    ("!", SyntaxKind::ExclamationToken),
    ("~", SyntaxKind::TildeToken),
];

pub fn punctuation_to_text(kind: SyntaxKind) -> Option<&'static str> {
    PUNCTUATORS
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|(text, _)| *text)
}

/// Human-readable description of a kind, for diagnostics.
pub fn describe(kind: SyntaxKind) -> &'static str {
    if let Some(text) = punctuation_to_text(kind).or_else(|| keyword_to_text(kind)) {
        return text;
    }
    match kind {
        SyntaxKind::EndOfFileToken => "end of file",
        SyntaxKind::Identifier | SyntaxKind::ReservedWord => "identifier",
        SyntaxKind::PrivateIdentifier => "private identifier",
        SyntaxKind::StringLiteral => "string literal",
        SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => "numeric literal",
        SyntaxKind::RegularExpressionLiteral => "regular expression",
        SyntaxKind::NoSubstitutionTemplateLiteral
        | SyntaxKind::TemplateHead
        | SyntaxKind::TemplateMiddle
        | SyntaxKind::TemplateTail => "template literal",
        _ => "token",
    }
}
