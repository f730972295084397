//! AST node data.
//!
//! Nodes live in a `NodeArena` and refer to each other through `NodeIndex`.
//! Each node carries its source `Span` (excluding leading trivia) and a
//! `NodeData` payload. Payload structs are grouped by shape: every
//! function-like node shares `FunctionData`, every class-like node shares
//! `ClassData`, and so on.

use bitflags::bitflags;
use tsz_common::Span;
use tsz_scanner::SyntaxKind;

/// Index of a node in its `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Sentinel for an absent optional child.
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        NodeIndex::NONE
    }
}

pub type NodeList = Vec<NodeIndex>;

bitflags! {
    /// Modifiers written on a declaration, class member or parameter.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u32 {
        const EXPORT = 1 << 0;
        const DEFAULT = 1 << 1;
        const DECLARE = 1 << 2;
        const ASYNC = 1 << 3;
        const CONST = 1 << 4;
        const ABSTRACT = 1 << 5;
        const STATIC = 1 << 6;
        const READONLY = 1 << 7;
        const PUBLIC = 1 << 8;
        const PRIVATE = 1 << 9;
        const PROTECTED = 1 << 10;
        const OVERRIDE = 1 << 11;
        const ACCESSOR = 1 << 12;
        const IN = 1 << 13;
        const OUT = 1 << 14;

        /// Modifiers that turn a constructor parameter into a property.
        const PARAMETER_PROPERTY = Self::PUBLIC.bits()
            | Self::PRIVATE.bits()
            | Self::PROTECTED.bits()
            | Self::READONLY.bits()
            | Self::OVERRIDE.bits();
    }
}

impl ModifierFlags {
    /// Flag for a modifier keyword, if the keyword is a modifier.
    pub fn from_keyword(kind: SyntaxKind) -> Option<ModifierFlags> {
        use SyntaxKind::*;
        Some(match kind {
            ExportKeyword => ModifierFlags::EXPORT,
            DefaultKeyword => ModifierFlags::DEFAULT,
            DeclareKeyword => ModifierFlags::DECLARE,
            AsyncKeyword => ModifierFlags::ASYNC,
            ConstKeyword => ModifierFlags::CONST,
            AbstractKeyword => ModifierFlags::ABSTRACT,
            StaticKeyword => ModifierFlags::STATIC,
            ReadonlyKeyword => ModifierFlags::READONLY,
            PublicKeyword => ModifierFlags::PUBLIC,
            PrivateKeyword => ModifierFlags::PRIVATE,
            ProtectedKeyword => ModifierFlags::PROTECTED,
            OverrideKeyword => ModifierFlags::OVERRIDE,
            AccessorKeyword => ModifierFlags::ACCESSOR,
            InKeyword => ModifierFlags::IN,
            _ => return None,
        })
    }
}

/// `var`, `let` or `const`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn keyword(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }

    pub fn is_block_scoped(self) -> bool {
        !matches!(self, VariableKind::Var)
    }
}

// =============================================================================
// Shared payloads
// =============================================================================

/// Functions, methods, accessors, constructors and arrows.
#[derive(Clone, Debug, Default)]
pub struct FunctionData {
    pub modifiers: ModifierFlags,
    pub decorators: NodeList,
    pub asterisk: bool,
    pub name: NodeIndex,
    pub question: bool,
    pub type_parameters: NodeList,
    pub parameters: NodeList,
    pub return_type: NodeIndex,
    /// `Block`, an expression for concise arrows, or `NONE` for signatures.
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ClassData {
    pub modifiers: ModifierFlags,
    pub decorators: NodeList,
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    pub extends: NodeIndex,
    pub implements: NodeList,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub exclamation: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub modifiers: ModifierFlags,
    pub decorators: NodeList,
    pub dot_dot_dot: bool,
    pub name: NodeIndex,
    pub question: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct PropertyDeclarationData {
    pub modifiers: ModifierFlags,
    pub decorators: NodeList,
    pub name: NodeIndex,
    pub question: bool,
    pub exclamation: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Call, construct and function-type signatures.
#[derive(Clone, Debug, Default)]
pub struct SignatureData {
    pub type_parameters: NodeList,
    pub parameters: NodeList,
    pub return_type: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ImportDeclData {
    pub import_clause: NodeIndex,
    pub module_specifier: NodeIndex,
    pub attributes: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ExportDeclData {
    pub is_type_only: bool,
    pub export_clause: NodeIndex,
    pub module_specifier: NodeIndex,
    pub attributes: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ModuleDeclData {
    pub modifiers: ModifierFlags,
    /// `Identifier` or `StringLiteral`.
    pub name: NodeIndex,
    /// `ModuleBlock`, a nested `ModuleDeclaration` for `a.b.c`, or `NONE`
    /// for the shorthand `declare module "x";`.
    pub body: NodeIndex,
    pub is_global: bool,
}

// =============================================================================
// Node payload
// =============================================================================

#[derive(Clone, Debug)]
pub enum NodeData {
    SourceFile {
        statements: NodeList,
    },

    // ---------------------------------------------------------------------
    // Names
    // ---------------------------------------------------------------------
    Identifier {
        text: String,
    },
    PrivateIdentifier {
        text: String,
    },
    ComputedPropertyName {
        expression: NodeIndex,
    },
    QualifiedName {
        left: NodeIndex,
        right: NodeIndex,
    },
    ObjectBindingPattern {
        elements: NodeList,
    },
    ArrayBindingPattern {
        elements: NodeList,
    },
    BindingElement {
        dot_dot_dot: bool,
        property_name: NodeIndex,
        name: NodeIndex,
        initializer: NodeIndex,
    },
    Decorator {
        expression: NodeIndex,
    },
    TypeParameter {
        modifiers: ModifierFlags,
        name: NodeIndex,
        constraint: NodeIndex,
        default: NodeIndex,
    },
    Parameter(ParameterData),

    // ---------------------------------------------------------------------
    // Statements
    // ---------------------------------------------------------------------
    VariableStatement {
        modifiers: ModifierFlags,
        declaration_list: NodeIndex,
    },
    VariableDeclarationList {
        kind: VariableKind,
        declarations: NodeList,
    },
    VariableDeclaration(VariableDeclarationData),
    FunctionDeclaration(FunctionData),
    ClassDeclaration(ClassData),
    InterfaceDeclaration {
        modifiers: ModifierFlags,
        name: NodeIndex,
        type_parameters: NodeList,
        heritage: NodeList,
        members: NodeList,
    },
    TypeAliasDeclaration {
        modifiers: ModifierFlags,
        name: NodeIndex,
        type_parameters: NodeList,
        type_node: NodeIndex,
    },
    EnumDeclaration {
        modifiers: ModifierFlags,
        name: NodeIndex,
        members: NodeList,
    },
    EnumMember {
        name: NodeIndex,
        initializer: NodeIndex,
    },
    ModuleDeclaration(ModuleDeclData),
    ModuleBlock {
        statements: NodeList,
    },
    ImportDeclaration(ImportDeclData),
    ImportClause {
        is_type_only: bool,
        name: NodeIndex,
        named_bindings: NodeIndex,
    },
    NamespaceImport {
        name: NodeIndex,
    },
    NamedImports {
        elements: NodeList,
    },
    ImportSpecifier {
        is_type_only: bool,
        property_name: NodeIndex,
        name: NodeIndex,
    },
    ImportEqualsDeclaration {
        modifiers: ModifierFlags,
        is_type_only: bool,
        name: NodeIndex,
        module_reference: NodeIndex,
    },
    ExternalModuleReference {
        expression: NodeIndex,
    },
    ExportDeclaration(ExportDeclData),
    NamedExports {
        elements: NodeList,
    },
    NamespaceExport {
        name: NodeIndex,
    },
    ExportSpecifier {
        is_type_only: bool,
        property_name: NodeIndex,
        name: NodeIndex,
    },
    ExportAssignment {
        is_export_equals: bool,
        expression: NodeIndex,
    },
    Block {
        statements: NodeList,
    },
    EmptyStatement,
    ExpressionStatement {
        expression: NodeIndex,
    },
    IfStatement {
        expression: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    },
    DoStatement {
        statement: NodeIndex,
        expression: NodeIndex,
    },
    WhileStatement {
        expression: NodeIndex,
        statement: NodeIndex,
    },
    ForStatement {
        initializer: NodeIndex,
        condition: NodeIndex,
        incrementor: NodeIndex,
        statement: NodeIndex,
    },
    ForInStatement {
        initializer: NodeIndex,
        expression: NodeIndex,
        statement: NodeIndex,
    },
    ForOfStatement {
        await_modifier: bool,
        initializer: NodeIndex,
        expression: NodeIndex,
        statement: NodeIndex,
    },
    ContinueStatement {
        label: NodeIndex,
    },
    BreakStatement {
        label: NodeIndex,
    },
    ReturnStatement {
        expression: NodeIndex,
    },
    SwitchStatement {
        expression: NodeIndex,
        clauses: NodeList,
    },
    CaseClause {
        expression: NodeIndex,
        statements: NodeList,
    },
    DefaultClause {
        statements: NodeList,
    },
    LabeledStatement {
        label: NodeIndex,
        statement: NodeIndex,
    },
    ThrowStatement {
        expression: NodeIndex,
    },
    TryStatement {
        try_block: NodeIndex,
        catch_clause: NodeIndex,
        finally_block: NodeIndex,
    },
    CatchClause {
        variable_declaration: NodeIndex,
        block: NodeIndex,
    },
    DebuggerStatement,

    // ---------------------------------------------------------------------
    // Class members
    // ---------------------------------------------------------------------
    PropertyDeclaration(PropertyDeclarationData),
    MethodDeclaration(FunctionData),
    Constructor(FunctionData),
    GetAccessor(FunctionData),
    SetAccessor(FunctionData),
    ClassStaticBlock {
        body: NodeIndex,
    },
    SemicolonClassElement,

    // ---------------------------------------------------------------------
    // Expressions
    // ---------------------------------------------------------------------
    /// Numeric, bigint, string, regex and template literal tokens. `text` is
    /// the cooked value; emitters print the raw source slice.
    Literal {
        kind: SyntaxKind,
        text: String,
    },
    /// `this`, `super`, `true`, `false`, `null` and the `import` of
    /// `import(...)`.
    Keyword {
        kind: SyntaxKind,
    },
    TemplateExpression {
        head: NodeIndex,
        spans: NodeList,
    },
    TemplateSpan {
        expression: NodeIndex,
        literal: NodeIndex,
    },
    TaggedTemplateExpression {
        tag: NodeIndex,
        type_arguments: NodeList,
        template: NodeIndex,
    },
    ArrayLiteralExpression {
        elements: NodeList,
        multi_line: bool,
    },
    SpreadElement {
        expression: NodeIndex,
    },
    OmittedExpression,
    ObjectLiteralExpression {
        properties: NodeList,
        multi_line: bool,
    },
    PropertyAssignment {
        name: NodeIndex,
        initializer: NodeIndex,
    },
    ShorthandPropertyAssignment {
        name: NodeIndex,
        initializer: NodeIndex,
    },
    SpreadAssignment {
        expression: NodeIndex,
    },
    ParenthesizedExpression {
        expression: NodeIndex,
    },
    FunctionExpression(FunctionData),
    ArrowFunction(FunctionData),
    ClassExpression(ClassData),
    PropertyAccessExpression {
        expression: NodeIndex,
        question_dot: bool,
        name: NodeIndex,
    },
    ElementAccessExpression {
        expression: NodeIndex,
        question_dot: bool,
        argument: NodeIndex,
    },
    CallExpression {
        expression: NodeIndex,
        question_dot: bool,
        type_arguments: NodeList,
        arguments: NodeList,
    },
    NewExpression {
        expression: NodeIndex,
        type_arguments: NodeList,
        arguments: Option<NodeList>,
    },
    /// Prefix operators, including `typeof`, `void`, `delete` and `await`.
    PrefixUnaryExpression {
        operator: SyntaxKind,
        operand: NodeIndex,
    },
    PostfixUnaryExpression {
        operand: NodeIndex,
        operator: SyntaxKind,
    },
    YieldExpression {
        asterisk: bool,
        expression: NodeIndex,
    },
    BinaryExpression {
        left: NodeIndex,
        operator: SyntaxKind,
        right: NodeIndex,
    },
    ConditionalExpression {
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
    },
    AsExpression {
        expression: NodeIndex,
        type_node: NodeIndex,
    },
    SatisfiesExpression {
        expression: NodeIndex,
        type_node: NodeIndex,
    },
    TypeAssertion {
        type_node: NodeIndex,
        expression: NodeIndex,
    },
    NonNullExpression {
        expression: NodeIndex,
    },
    ExpressionWithTypeArguments {
        expression: NodeIndex,
        type_arguments: NodeList,
    },
    /// `new.target` and `import.meta`.
    MetaProperty {
        keyword: SyntaxKind,
        name: NodeIndex,
    },

    // ---------------------------------------------------------------------
    // JSX
    // ---------------------------------------------------------------------
    /// `<tag ...>children</tag>`.
    JsxElement {
        opening: NodeIndex,
        children: NodeList,
        closing: NodeIndex,
    },
    /// `<tag ... />`.
    JsxSelfClosingElement {
        tag_name: NodeIndex,
        type_arguments: NodeList,
        attributes: NodeList,
    },
    JsxOpeningElement {
        tag_name: NodeIndex,
        type_arguments: NodeList,
        attributes: NodeList,
    },
    JsxClosingElement {
        tag_name: NodeIndex,
    },
    /// `<>children</>`.
    JsxFragment {
        children: NodeList,
    },
    /// `name`, `name="v"`, `name={expr}` or `name=<el/>`. `initializer` is
    /// `NONE` for the bare form.
    JsxAttribute {
        name: NodeIndex,
        initializer: NodeIndex,
    },
    /// `{...expr}` in an attribute list.
    JsxSpreadAttribute {
        expression: NodeIndex,
    },
    /// `{expr}` as a child or attribute value. `expression` is `NONE` for an
    /// empty `{}` or comment-only container.
    JsxExpression {
        dot_dot_dot: bool,
        expression: NodeIndex,
    },
    /// Raw text between tags, entities left undecoded.
    JsxText {
        text: String,
    },
    /// `ns:name` in a tag or attribute name.
    JsxNamespacedName {
        namespace: NodeIndex,
        name: NodeIndex,
    },

    // ---------------------------------------------------------------------
    // Types
    // ---------------------------------------------------------------------
    /// `any`, `number`, `void`, `this`, `null` and the other keyword types.
    KeywordType {
        kind: SyntaxKind,
    },
    TypeReference {
        type_name: NodeIndex,
        type_arguments: NodeList,
    },
    ArrayType {
        element_type: NodeIndex,
    },
    TupleType {
        elements: NodeList,
    },
    NamedTupleMember {
        dot_dot_dot: bool,
        name: NodeIndex,
        question: bool,
        type_node: NodeIndex,
    },
    OptionalType {
        type_node: NodeIndex,
    },
    RestType {
        type_node: NodeIndex,
    },
    UnionType {
        types: NodeList,
    },
    IntersectionType {
        types: NodeList,
    },
    FunctionType(SignatureData),
    ConstructorType(SignatureData),
    TypeLiteral {
        members: NodeList,
    },
    PropertySignature {
        modifiers: ModifierFlags,
        name: NodeIndex,
        question: bool,
        type_annotation: NodeIndex,
    },
    MethodSignature {
        name: NodeIndex,
        question: bool,
        signature: SignatureData,
    },
    CallSignature(SignatureData),
    ConstructSignature(SignatureData),
    IndexSignature {
        modifiers: ModifierFlags,
        parameters: NodeList,
        type_annotation: NodeIndex,
    },
    MappedType {
        type_parameter: NodeIndex,
        name_type: NodeIndex,
        type_node: NodeIndex,
    },
    ConditionalType {
        check_type: NodeIndex,
        extends_type: NodeIndex,
        true_type: NodeIndex,
        false_type: NodeIndex,
    },
    InferType {
        type_parameter: NodeIndex,
    },
    ParenthesizedType {
        type_node: NodeIndex,
    },
    /// `keyof T`, `unique symbol`, `readonly T[]`.
    TypeOperator {
        operator: SyntaxKind,
        type_node: NodeIndex,
    },
    IndexedAccessType {
        object_type: NodeIndex,
        index_type: NodeIndex,
    },
    LiteralType {
        literal: NodeIndex,
    },
    TypeQuery {
        expr_name: NodeIndex,
        type_arguments: NodeList,
    },
    TypePredicate {
        asserts: bool,
        parameter_name: NodeIndex,
        type_node: NodeIndex,
    },
    TemplateLiteralType {
        types: NodeList,
    },
    ImportType {
        argument: NodeIndex,
        qualifier: NodeIndex,
        type_arguments: NodeList,
    },
}

/// A node in the arena.
#[derive(Clone, Debug)]
pub struct Node {
    pub span: Span,
    pub data: NodeData,
}

impl Node {
    /// Name of the node variant, used in trace output and tests.
    pub fn kind_name(&self) -> &'static str {
        node_kind_name(&self.data)
    }
}

fn node_kind_name(data: &NodeData) -> &'static str {
    use NodeData::*;
    match data {
        SourceFile { .. } => "SourceFile",
        Identifier { .. } => "Identifier",
        PrivateIdentifier { .. } => "PrivateIdentifier",
        ComputedPropertyName { .. } => "ComputedPropertyName",
        QualifiedName { .. } => "QualifiedName",
        ObjectBindingPattern { .. } => "ObjectBindingPattern",
        ArrayBindingPattern { .. } => "ArrayBindingPattern",
        BindingElement { .. } => "BindingElement",
        Decorator { .. } => "Decorator",
        TypeParameter { .. } => "TypeParameter",
        Parameter(_) => "Parameter",
        VariableStatement { .. } => "VariableStatement",
        VariableDeclarationList { .. } => "VariableDeclarationList",
        VariableDeclaration(_) => "VariableDeclaration",
        FunctionDeclaration(_) => "FunctionDeclaration",
        ClassDeclaration(_) => "ClassDeclaration",
        InterfaceDeclaration { .. } => "InterfaceDeclaration",
        TypeAliasDeclaration { .. } => "TypeAliasDeclaration",
        EnumDeclaration { .. } => "EnumDeclaration",
        EnumMember { .. } => "EnumMember",
        ModuleDeclaration(_) => "ModuleDeclaration",
        ModuleBlock { .. } => "ModuleBlock",
        ImportDeclaration(_) => "ImportDeclaration",
        ImportClause { .. } => "ImportClause",
        NamespaceImport { .. } => "NamespaceImport",
        NamedImports { .. } => "NamedImports",
        ImportSpecifier { .. } => "ImportSpecifier",
        ImportEqualsDeclaration { .. } => "ImportEqualsDeclaration",
        ExternalModuleReference { .. } => "ExternalModuleReference",
        ExportDeclaration(_) => "ExportDeclaration",
        NamedExports { .. } => "NamedExports",
        NamespaceExport { .. } => "NamespaceExport",
        ExportSpecifier { .. } => "ExportSpecifier",
        ExportAssignment { .. } => "ExportAssignment",
        Block { .. } => "Block",
        EmptyStatement => "EmptyStatement",
        ExpressionStatement { .. } => "ExpressionStatement",
        IfStatement { .. } => "IfStatement",
        DoStatement { .. } => "DoStatement",
        WhileStatement { .. } => "WhileStatement",
        ForStatement { .. } => "ForStatement",
        ForInStatement { .. } => "ForInStatement",
        ForOfStatement { .. } => "ForOfStatement",
        ContinueStatement { .. } => "ContinueStatement",
        BreakStatement { .. } => "BreakStatement",
        ReturnStatement { .. } => "ReturnStatement",
        SwitchStatement { .. } => "SwitchStatement",
        CaseClause { .. } => "CaseClause",
        DefaultClause { .. } => "DefaultClause",
        LabeledStatement { .. } => "LabeledStatement",
        ThrowStatement { .. } => "ThrowStatement",
        TryStatement { .. } => "TryStatement",
        CatchClause { .. } => "CatchClause",
        DebuggerStatement => "DebuggerStatement",
        PropertyDeclaration(_) => "PropertyDeclaration",
        MethodDeclaration(_) => "MethodDeclaration",
        Constructor(_) => "Constructor",
        GetAccessor(_) => "GetAccessor",
        SetAccessor(_) => "SetAccessor",
        ClassStaticBlock { .. } => "ClassStaticBlock",
        SemicolonClassElement => "SemicolonClassElement",
        Literal { .. } => "Literal",
        Keyword { .. } => "Keyword",
        TemplateExpression { .. } => "TemplateExpression",
        TemplateSpan { .. } => "TemplateSpan",
        TaggedTemplateExpression { .. } => "TaggedTemplateExpression",
        ArrayLiteralExpression { .. } => "ArrayLiteralExpression",
        SpreadElement { .. } => "SpreadElement",
        OmittedExpression => "OmittedExpression",
        ObjectLiteralExpression { .. } => "ObjectLiteralExpression",
        PropertyAssignment { .. } => "PropertyAssignment",
        ShorthandPropertyAssignment { .. } => "ShorthandPropertyAssignment",
        SpreadAssignment { .. } => "SpreadAssignment",
        ParenthesizedExpression { .. } => "ParenthesizedExpression",
        FunctionExpression(_) => "FunctionExpression",
        ArrowFunction(_) => "ArrowFunction",
        ClassExpression(_) => "ClassExpression",
        PropertyAccessExpression { .. } => "PropertyAccessExpression",
        ElementAccessExpression { .. } => "ElementAccessExpression",
        CallExpression { .. } => "CallExpression",
        NewExpression { .. } => "NewExpression",
        PrefixUnaryExpression { .. } => "PrefixUnaryExpression",
        PostfixUnaryExpression { .. } => "PostfixUnaryExpression",
        YieldExpression { .. } => "YieldExpression",
        BinaryExpression { .. } => "BinaryExpression",
        ConditionalExpression { .. } => "ConditionalExpression",
        AsExpression { .. } => "AsExpression",
        SatisfiesExpression { .. } => "SatisfiesExpression",
        TypeAssertion { .. } => "TypeAssertion",
        NonNullExpression { .. } => "NonNullExpression",
        ExpressionWithTypeArguments { .. } => "ExpressionWithTypeArguments",
        MetaProperty { .. } => "MetaProperty",
        JsxElement { .. } => "JsxElement",
        JsxSelfClosingElement { .. } => "JsxSelfClosingElement",
        JsxOpeningElement { .. } => "JsxOpeningElement",
        JsxClosingElement { .. } => "JsxClosingElement",
        JsxFragment { .. } => "JsxFragment",
        JsxAttribute { .. } => "JsxAttribute",
        JsxSpreadAttribute { .. } => "JsxSpreadAttribute",
        JsxExpression { .. } => "JsxExpression",
        JsxText { .. } => "JsxText",
        JsxNamespacedName { .. } => "JsxNamespacedName",
        KeywordType { .. } => "KeywordType",
        TypeReference { .. } => "TypeReference",
        ArrayType { .. } => "ArrayType",
        TupleType { .. } => "TupleType",
        NamedTupleMember { .. } => "NamedTupleMember",
        OptionalType { .. } => "OptionalType",
        RestType { .. } => "RestType",
        UnionType { .. } => "UnionType",
        IntersectionType { .. } => "IntersectionType",
        FunctionType(_) => "FunctionType",
        ConstructorType(_) => "ConstructorType",
        TypeLiteral { .. } => "TypeLiteral",
        PropertySignature { .. } => "PropertySignature",
        MethodSignature { .. } => "MethodSignature",
        CallSignature(_) => "CallSignature",
        ConstructSignature(_) => "ConstructSignature",
        IndexSignature { .. } => "IndexSignature",
        MappedType { .. } => "MappedType",
        ConditionalType { .. } => "ConditionalType",
        InferType { .. } => "InferType",
        ParenthesizedType { .. } => "ParenthesizedType",
        TypeOperator { .. } => "TypeOperator",
        IndexedAccessType { .. } => "IndexedAccessType",
        LiteralType { .. } => "LiteralType",
        TypeQuery { .. } => "TypeQuery",
        TypePredicate { .. } => "TypePredicate",
        TemplateLiteralType { .. } => "TemplateLiteralType",
        ImportType { .. } => "ImportType",
    }
}
