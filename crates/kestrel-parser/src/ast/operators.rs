//! Operator enums for expression nodes.

use kestrel_scanner::SyntaxKind;
use serde::Serialize;

macro_rules! operator_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($text:literal, $kind:ident)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            pub fn from_token(kind: SyntaxKind) -> Option<Self> {
                match kind {
                    $(SyntaxKind::$kind => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

operator_enum! {
    pub enum BinaryOperator {
        Add => ("+", PlusToken),
        Subtract => ("-", MinusToken),
        Multiply => ("*", AsteriskToken),
        Divide => ("/", SlashToken),
        Remainder => ("%", PercentToken),
        Exponent => ("**", AsteriskAsteriskToken),
        LessThan => ("<", LessThanToken),
        GreaterThan => (">", GreaterThanToken),
        LessThanOrEqual => ("<=", LessThanEqualsToken),
        GreaterThanOrEqual => (">=", GreaterThanEqualsToken),
        Equal => ("==", EqualsEqualsToken),
        NotEqual => ("!=", ExclamationEqualsToken),
        StrictEqual => ("===", EqualsEqualsEqualsToken),
        StrictNotEqual => ("!==", ExclamationEqualsEqualsToken),
        BitwiseAnd => ("&", AmpersandToken),
        BitwiseOr => ("|", BarToken),
        BitwiseXor => ("^", CaretToken),
        ShiftLeft => ("<<", LessThanLessThanToken),
        ShiftRight => (">>", GreaterThanGreaterThanToken),
        ShiftRightUnsigned => (">>>", GreaterThanGreaterThanGreaterThanToken),
        In => ("in", InKeyword),
        InstanceOf => ("instanceof", InstanceOfKeyword),
    }
}

operator_enum! {
    pub enum LogicalOperator {
        And => ("&&", AmpersandAmpersandToken),
        Or => ("||", BarBarToken),
        Coalesce => ("??", QuestionQuestionToken),
    }
}

operator_enum! {
    pub enum UnaryOperator {
        Not => ("!", ExclamationToken),
        BitwiseNot => ("~", TildeToken),
        Plus => ("+", PlusToken),
        Minus => ("-", MinusToken),
        TypeOf => ("typeof", TypeOfKeyword),
        Void => ("void", VoidKeyword),
        Delete => ("delete", DeleteKeyword),
    }
}

operator_enum! {
    pub enum UpdateOperator {
        Increment => ("++", PlusPlusToken),
        Decrement => ("--", MinusMinusToken),
    }
}

operator_enum! {
    pub enum AssignmentOperator {
        Assign => ("=", EqualsToken),
        AddAssign => ("+=", PlusEqualsToken),
        SubtractAssign => ("-=", MinusEqualsToken),
        MultiplyAssign => ("*=", AsteriskEqualsToken),
        DivideAssign => ("/=", SlashEqualsToken),
        RemainderAssign => ("%=", PercentEqualsToken),
        ExponentAssign => ("**=", AsteriskAsteriskEqualsToken),
        ShiftLeftAssign => ("<<=", LessThanLessThanEqualsToken),
        ShiftRightAssign => (">>=", GreaterThanGreaterThanEqualsToken),
        ShiftRightUnsignedAssign => (">>>=", GreaterThanGreaterThanGreaterThanEqualsToken),
        BitwiseAndAssign => ("&=", AmpersandEqualsToken),
        BitwiseOrAssign => ("|=", BarEqualsToken),
        BitwiseXorAssign => ("^=", CaretEqualsToken),
        AndAssign => ("&&=", AmpersandAmpersandEqualsToken),
        OrAssign => ("||=", BarBarEqualsToken),
        CoalesceAssign => ("??=", QuestionQuestionEqualsToken),
    }
}

impl AssignmentOperator {
    /// Plain `=` is the only operator that accepts a destructuring target.
    pub fn is_plain(self) -> bool {
        self == AssignmentOperator::Assign
    }
}
