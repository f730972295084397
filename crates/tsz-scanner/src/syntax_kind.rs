//! Token kinds.
//!
//! Keywords are laid out contiguously (reserved words first, then strict-mode
//! reserved words, then contextual keywords) so classification is a range test.

/// Token kind produced by the scanner.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,
    JsxText,

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
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,
    LessThanSlashToken,

    // Assignment operators
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AmpersandAmpersandEqualsToken,
    BarBarEqualsToken,
    QuestionQuestionEqualsToken,

    // Identifiers
    Identifier,
    PrivateIdentifier,

    // Reserved words
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
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Strict mode reserved words
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,

    // Contextual keywords
    AbstractKeyword,
    AccessorKeyword,
    AsKeyword,
    AssertsKeyword,
    AnyKeyword,
    AsyncKeyword,
    AwaitKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    GetKeyword,
    InferKeyword,
    IsKeyword,
    KeyOfKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    ReadonlyKeyword,
    RequireKeyword,
    NumberKeyword,
    ObjectKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    FromKeyword,
    GlobalKeyword,
    BigIntKeyword,
    OverrideKeyword,
    OfKeyword,
}

const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
const LAST_KEYWORD: SyntaxKind = SyntaxKind::OfKeyword;
const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("break", SyntaxKind::BreakKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("catch", SyntaxKind::CatchKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("debugger", SyntaxKind::DebuggerKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("delete", SyntaxKind::DeleteKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("export", SyntaxKind::ExportKeyword),
    ("extends", SyntaxKind::ExtendsKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("finally", SyntaxKind::FinallyKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("function", SyntaxKind::FunctionKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("import", SyntaxKind::ImportKeyword),
    ("in", SyntaxKind::InKeyword),
    ("instanceof", SyntaxKind::InstanceOfKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("super", SyntaxKind::SuperKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("throw", SyntaxKind::ThrowKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("try", SyntaxKind::TryKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("var", SyntaxKind::VarKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("with", SyntaxKind::WithKeyword),
    ("implements", SyntaxKind::ImplementsKeyword),
    ("interface", SyntaxKind::InterfaceKeyword),
    ("let", SyntaxKind::LetKeyword),
    ("package", SyntaxKind::PackageKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("yield", SyntaxKind::YieldKeyword),
    ("abstract", SyntaxKind::AbstractKeyword),
    ("accessor", SyntaxKind::AccessorKeyword),
    ("as", SyntaxKind::AsKeyword),
    ("asserts", SyntaxKind::AssertsKeyword),
    ("any", SyntaxKind::AnyKeyword),
    ("async", SyntaxKind::AsyncKeyword),
    ("await", SyntaxKind::AwaitKeyword),
    ("boolean", SyntaxKind::BooleanKeyword),
    ("constructor", SyntaxKind::ConstructorKeyword),
    ("declare", SyntaxKind::DeclareKeyword),
    ("get", SyntaxKind::GetKeyword),
    ("infer", SyntaxKind::InferKeyword),
    ("is", SyntaxKind::IsKeyword),
    ("keyof", SyntaxKind::KeyOfKeyword),
    ("module", SyntaxKind::ModuleKeyword),
    ("namespace", SyntaxKind::NamespaceKeyword),
    ("never", SyntaxKind::NeverKeyword),
    ("readonly", SyntaxKind::ReadonlyKeyword),
    ("require", SyntaxKind::RequireKeyword),
    ("number", SyntaxKind::NumberKeyword),
    ("object", SyntaxKind::ObjectKeyword),
    ("satisfies", SyntaxKind::SatisfiesKeyword),
    ("set", SyntaxKind::SetKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("symbol", SyntaxKind::SymbolKeyword),
    ("type", SyntaxKind::TypeKeyword),
    ("undefined", SyntaxKind::UndefinedKeyword),
    ("unique", SyntaxKind::UniqueKeyword),
    ("unknown", SyntaxKind::UnknownKeyword),
    ("from", SyntaxKind::FromKeyword),
    ("global", SyntaxKind::GlobalKeyword),
    ("bigint", SyntaxKind::BigIntKeyword),
    ("override", SyntaxKind::OverrideKeyword),
    ("of", SyntaxKind::OfKeyword),
];

/// Look up the keyword kind for an identifier's text.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    // Every keyword is lowercase ASCII between 2 and 11 bytes
    if text.len() < 2 || text.len() > 11 || !text.as_bytes()[0].is_ascii_lowercase() {
        return None;
    }
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == text)
        .map(|&(_, kind)| kind)
}

/// Text of a keyword kind.
pub fn keyword_to_text(kind: SyntaxKind) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|&&(_, k)| k == kind)
        .map(|&(text, _)| text)
}

/// Text of a punctuation kind.
pub fn punctuation_to_text(kind: SyntaxKind) -> Option<&'static str> {
    use SyntaxKind::*;
    let text = match kind {
        OpenBraceToken => "{",
        CloseBraceToken => "}",
        OpenParenToken => "(",
        CloseParenToken => ")",
        OpenBracketToken => "[",
        CloseBracketToken => "]",
        DotToken => ".",
        DotDotDotToken => "...",
        SemicolonToken => ";",
        CommaToken => ",",
        QuestionDotToken => "?.",
        LessThanToken => "<",
        GreaterThanToken => ">",
        LessThanEqualsToken => "<=",
        GreaterThanEqualsToken => ">=",
        EqualsEqualsToken => "==",
        ExclamationEqualsToken => "!=",
        EqualsEqualsEqualsToken => "===",
        ExclamationEqualsEqualsToken => "!==",
        EqualsGreaterThanToken => "=>",
        PlusToken => "+",
        MinusToken => "-",
        AsteriskToken => "*",
        AsteriskAsteriskToken => "**",
        SlashToken => "/",
        PercentToken => "%",
        PlusPlusToken => "++",
        MinusMinusToken => "--",
        LessThanLessThanToken => "<<",
        GreaterThanGreaterThanToken => ">>",
        GreaterThanGreaterThanGreaterThanToken => ">>>",
        AmpersandToken => "&",
        BarToken => "|",
        CaretToken => "^",
        ExclamationToken => "!",
        TildeToken => "~",
        AmpersandAmpersandToken => "&&",
        BarBarToken => "||",
        QuestionToken => "?",
        ColonToken => ":",
        AtToken => "@",
        QuestionQuestionToken => "??",
        LessThanSlashToken => "</",
        EqualsToken => "=",
        PlusEqualsToken => "+=",
        MinusEqualsToken => "-=",
        AsteriskEqualsToken => "*=",
        AsteriskAsteriskEqualsToken => "**=",
        SlashEqualsToken => "/=",
        PercentEqualsToken => "%=",
        LessThanLessThanEqualsToken => "<<=",
        GreaterThanGreaterThanEqualsToken => ">>=",
        GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
        AmpersandEqualsToken => "&=",
        BarEqualsToken => "|=",
        CaretEqualsToken => "^=",
        AmpersandAmpersandEqualsToken => "&&=",
        BarBarEqualsToken => "||=",
        QuestionQuestionEqualsToken => "??=",
        _ => return None,
    };
    Some(text)
}

/// Text of any fixed-text token (punctuation or keyword).
pub fn token_to_text(kind: SyntaxKind) -> Option<&'static str> {
    punctuation_to_text(kind).or_else(|| keyword_to_text(kind))
}

#[inline]
pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    kind >= FIRST_KEYWORD && kind <= LAST_KEYWORD
}

/// Reserved words can never be used as identifiers.
#[inline]
pub fn token_is_reserved_word(kind: SyntaxKind) -> bool {
    kind >= FIRST_KEYWORD && kind <= LAST_RESERVED_WORD
}

/// Identifier, or a keyword that may still be used as an identifier.
#[inline]
pub fn token_is_identifier(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || (kind > LAST_RESERVED_WORD && kind <= LAST_KEYWORD)
}

/// Identifier or any keyword (valid as a property name).
#[inline]
pub fn token_is_identifier_or_keyword(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || token_is_keyword(kind)
}

#[inline]
pub fn token_is_punctuation(kind: SyntaxKind) -> bool {
    kind >= FIRST_PUNCTUATION && kind <= LAST_PUNCTUATION
}

#[inline]
pub fn token_is_assignment_operator(kind: SyntaxKind) -> bool {
    kind >= FIRST_ASSIGNMENT && kind <= LAST_ASSIGNMENT
}

#[inline]
pub fn token_is_literal(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::NumericLiteral && kind <= SyntaxKind::NoSubstitutionTemplateLiteral
}
