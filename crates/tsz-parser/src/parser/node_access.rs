//! Generic child enumeration for AST nodes.

use super::node::{ClassData, FunctionData, NodeData, NodeIndex, SignatureData};
use super::node_arena::NodeArena;

impl NodeArena {
    /// Direct children of `index` in source order, skipping absent ones.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        if let Some(data) = self.data(index) {
            collect_children(data, &mut out);
        }
        out.retain(|child| child.is_some());
        out
    }
}

fn function_children(function: &FunctionData, out: &mut Vec<NodeIndex>) {
    out.extend_from_slice(&function.decorators);
    out.push(function.name);
    out.extend_from_slice(&function.type_parameters);
    out.extend_from_slice(&function.parameters);
    out.push(function.return_type);
    out.push(function.body);
}

fn class_children(class: &ClassData, out: &mut Vec<NodeIndex>) {
    out.extend_from_slice(&class.decorators);
    out.push(class.name);
    out.extend_from_slice(&class.type_parameters);
    out.push(class.extends);
    out.extend_from_slice(&class.implements);
    out.extend_from_slice(&class.members);
}

fn signature_children(signature: &SignatureData, out: &mut Vec<NodeIndex>) {
    out.extend_from_slice(&signature.type_parameters);
    out.extend_from_slice(&signature.parameters);
    out.push(signature.return_type);
}

fn collect_children(data: &NodeData, out: &mut Vec<NodeIndex>) {
    use NodeData::*;
    match data {
        SourceFile { statements } | Block { statements } | ModuleBlock { statements } => {
            out.extend_from_slice(statements)
        }
        Identifier { .. }
        | PrivateIdentifier { .. }
        | EmptyStatement
        | DebuggerStatement
        | SemicolonClassElement
        | Literal { .. }
        | Keyword { .. }
        | OmittedExpression
        | KeywordType { .. } => {}
        ComputedPropertyName { expression }
        | Decorator { expression }
        | ExternalModuleReference { expression }
        | ExpressionStatement { expression }
        | ReturnStatement { expression }
        | ThrowStatement { expression }
        | SpreadElement { expression }
        | SpreadAssignment { expression }
        | ParenthesizedExpression { expression }
        | NonNullExpression { expression } => out.push(*expression),
        QualifiedName { left, right } => out.extend([*left, *right]),
        ObjectBindingPattern { elements }
        | ArrayBindingPattern { elements }
        | NamedImports { elements }
        | NamedExports { elements }
        | TupleType { elements } => out.extend_from_slice(elements),
        BindingElement {
            property_name,
            name,
            initializer,
            ..
        } => out.extend([*property_name, *name, *initializer]),
        TypeParameter {
            name,
            constraint,
            default,
            ..
        } => out.extend([*name, *constraint, *default]),
        Parameter(param) => {
            out.extend_from_slice(&param.decorators);
            out.extend([param.name, param.type_annotation, param.initializer]);
        }
        VariableStatement {
            declaration_list, ..
        } => out.push(*declaration_list),
        VariableDeclarationList { declarations, .. } => out.extend_from_slice(declarations),
        VariableDeclaration(decl) => {
            out.extend([decl.name, decl.type_annotation, decl.initializer])
        }
        FunctionDeclaration(function)
        | MethodDeclaration(function)
        | Constructor(function)
        | GetAccessor(function)
        | SetAccessor(function)
        | FunctionExpression(function)
        | ArrowFunction(function) => function_children(function, out),
        ClassDeclaration(class) | ClassExpression(class) => class_children(class, out),
        InterfaceDeclaration {
            name,
            type_parameters,
            heritage,
            members,
            ..
        } => {
            out.push(*name);
            out.extend_from_slice(type_parameters);
            out.extend_from_slice(heritage);
            out.extend_from_slice(members);
        }
        TypeAliasDeclaration {
            name,
            type_parameters,
            type_node,
            ..
        } => {
            out.push(*name);
            out.extend_from_slice(type_parameters);
            out.push(*type_node);
        }
        EnumDeclaration { name, members, .. } => {
            out.push(*name);
            out.extend_from_slice(members);
        }
        EnumMember { name, initializer }
        | PropertyAssignment { name, initializer }
        | ShorthandPropertyAssignment { name, initializer } => out.extend([*name, *initializer]),
        ModuleDeclaration(module) => out.extend([module.name, module.body]),
        ImportDeclaration(import) => out.extend([
            import.import_clause,
            import.module_specifier,
            import.attributes,
        ]),
        ImportClause {
            name,
            named_bindings,
            ..
        } => out.extend([*name, *named_bindings]),
        NamespaceImport { name } | NamespaceExport { name } => out.push(*name),
        ImportSpecifier {
            property_name,
            name,
            ..
        }
        | ExportSpecifier {
            property_name,
            name,
            ..
        } => out.extend([*property_name, *name]),
        ImportEqualsDeclaration {
            name,
            module_reference,
            ..
        } => out.extend([*name, *module_reference]),
        ExportDeclaration(export) => out.extend([
            export.export_clause,
            export.module_specifier,
            export.attributes,
        ]),
        ExportAssignment { expression, .. } => out.push(*expression),
        IfStatement {
            expression,
            then_statement,
            else_statement,
        } => out.extend([*expression, *then_statement, *else_statement]),
        DoStatement {
            statement,
            expression,
        } => out.extend([*statement, *expression]),
        WhileStatement {
            expression,
            statement,
        } => out.extend([*expression, *statement]),
        ForStatement {
            initializer,
            condition,
            incrementor,
            statement,
        } => out.extend([*initializer, *condition, *incrementor, *statement]),
        ForInStatement {
            initializer,
            expression,
            statement,
        }
        | ForOfStatement {
            initializer,
            expression,
            statement,
            ..
        } => out.extend([*initializer, *expression, *statement]),
        ContinueStatement { label } | BreakStatement { label } => out.push(*label),
        SwitchStatement {
            expression,
            clauses,
        } => {
            out.push(*expression);
            out.extend_from_slice(clauses);
        }
        CaseClause {
            expression,
            statements,
        } => {
            out.push(*expression);
            out.extend_from_slice(statements);
        }
        DefaultClause { statements } => out.extend_from_slice(statements),
        LabeledStatement { label, statement } => out.extend([*label, *statement]),
        TryStatement {
            try_block,
            catch_clause,
            finally_block,
        } => out.extend([*try_block, *catch_clause, *finally_block]),
        CatchClause {
            variable_declaration,
            block,
        } => out.extend([*variable_declaration, *block]),
        PropertyDeclaration(property) => {
            out.extend_from_slice(&property.decorators);
            out.extend([
                property.name,
                property.type_annotation,
                property.initializer,
            ]);
        }
        ClassStaticBlock { body } => out.push(*body),
        TemplateExpression { head, spans } => {
            out.push(*head);
            out.extend_from_slice(spans);
        }
        TemplateSpan {
            expression,
            literal,
        } => out.extend([*expression, *literal]),
        TaggedTemplateExpression {
            tag,
            type_arguments,
            template,
        } => {
            out.push(*tag);
            out.extend_from_slice(type_arguments);
            out.push(*template);
        }
        ArrayLiteralExpression { elements, .. } => out.extend_from_slice(elements),
        ObjectLiteralExpression { properties, .. } => out.extend_from_slice(properties),
        PropertyAccessExpression {
            expression, name, ..
        } => out.extend([*expression, *name]),
        ElementAccessExpression {
            expression,
            argument,
            ..
        } => out.extend([*expression, *argument]),
        CallExpression {
            expression,
            type_arguments,
            arguments,
            ..
        } => {
            out.push(*expression);
            out.extend_from_slice(type_arguments);
            out.extend_from_slice(arguments);
        }
        NewExpression {
            expression,
            type_arguments,
            arguments,
        } => {
            out.push(*expression);
            out.extend_from_slice(type_arguments);
            if let Some(arguments) = arguments {
                out.extend_from_slice(arguments);
            }
        }
        PrefixUnaryExpression { operand, .. } | PostfixUnaryExpression { operand, .. } => {
            out.push(*operand)
        }
        YieldExpression { expression, .. } => out.push(*expression),
        BinaryExpression { left, right, .. } => out.extend([*left, *right]),
        ConditionalExpression {
            condition,
            when_true,
            when_false,
        } => out.extend([*condition, *when_true, *when_false]),
        AsExpression {
            expression,
            type_node,
        }
        | SatisfiesExpression {
            expression,
            type_node,
        } => out.extend([*expression, *type_node]),
        TypeAssertion {
            type_node,
            expression,
        } => out.extend([*type_node, *expression]),
        ExpressionWithTypeArguments {
            expression,
            type_arguments,
        } => {
            out.push(*expression);
            out.extend_from_slice(type_arguments);
        }
        MetaProperty { name, .. } => out.push(*name),
        JsxElement {
            opening,
            children,
            closing,
        } => {
            out.push(*opening);
            out.extend_from_slice(children);
            out.push(*closing);
        }
        JsxSelfClosingElement {
            tag_name,
            type_arguments,
            attributes,
        }
        | JsxOpeningElement {
            tag_name,
            type_arguments,
            attributes,
        } => {
            out.push(*tag_name);
            out.extend_from_slice(type_arguments);
            out.extend_from_slice(attributes);
        }
        JsxClosingElement { tag_name } => out.push(*tag_name),
        JsxFragment { children } => out.extend_from_slice(children),
        JsxAttribute { name, initializer } => out.extend([*name, *initializer]),
        JsxSpreadAttribute { expression } | JsxExpression { expression, .. } => {
            out.push(*expression)
        }
        JsxText { .. } => {}
        JsxNamespacedName { namespace, name } => out.extend([*namespace, *name]),
        TypeReference {
            type_name,
            type_arguments,
        } => {
            out.push(*type_name);
            out.extend_from_slice(type_arguments);
        }
        ArrayType { element_type } => out.push(*element_type),
        NamedTupleMember {
            name, type_node, ..
        } => out.extend([*name, *type_node]),
        OptionalType { type_node }
        | RestType { type_node }
        | ParenthesizedType { type_node }
        | TypeOperator { type_node, .. } => out.push(*type_node),
        UnionType { types } | IntersectionType { types } | TemplateLiteralType { types } => {
            out.extend_from_slice(types)
        }
        FunctionType(signature)
        | ConstructorType(signature)
        | CallSignature(signature)
        | ConstructSignature(signature) => signature_children(signature, out),
        TypeLiteral { members } => out.extend_from_slice(members),
        PropertySignature {
            name,
            type_annotation,
            ..
        } => out.extend([*name, *type_annotation]),
        MethodSignature {
            name, signature, ..
        } => {
            out.push(*name);
            signature_children(signature, out);
        }
        IndexSignature {
            parameters,
            type_annotation,
            ..
        } => {
            out.extend_from_slice(parameters);
            out.push(*type_annotation);
        }
        MappedType {
            type_parameter,
            name_type,
            type_node,
        } => out.extend([*type_parameter, *name_type, *type_node]),
        ConditionalType {
            check_type,
            extends_type,
            true_type,
            false_type,
        } => out.extend([*check_type, *extends_type, *true_type, *false_type]),
        InferType { type_parameter } => out.push(*type_parameter),
        IndexedAccessType {
            object_type,
            index_type,
        } => out.extend([*object_type, *index_type]),
        LiteralType { literal } => out.push(*literal),
        TypeQuery {
            expr_name,
            type_arguments,
        } => {
            out.push(*expr_name);
            out.extend_from_slice(type_arguments);
        }
        TypePredicate {
            parameter_name,
            type_node,
            ..
        } => out.extend([*parameter_name, *type_node]),
        ImportType {
            argument,
            qualifier,
            type_arguments,
        } => {
            out.extend([*argument, *qualifier]);
            out.extend_from_slice(type_arguments);
        }
    }
}

impl NodeData {
    /// Whether this node belongs to type syntax, which never declares values.
    pub fn is_type_node(&self) -> bool {
        use NodeData::*;
        matches!(
            self,
            KeywordType { .. }
                | TypeReference { .. }
                | ArrayType { .. }
                | TupleType { .. }
                | NamedTupleMember { .. }
                | OptionalType { .. }
                | RestType { .. }
                | UnionType { .. }
                | IntersectionType { .. }
                | FunctionType(_)
                | ConstructorType(_)
                | TypeLiteral { .. }
                | PropertySignature { .. }
                | MethodSignature { .. }
                | CallSignature(_)
                | ConstructSignature(_)
                | IndexSignature { .. }
                | MappedType { .. }
                | ConditionalType { .. }
                | InferType { .. }
                | ParenthesizedType { .. }
                | TypeOperator { .. }
                | IndexedAccessType { .. }
                | LiteralType { .. }
                | TypeQuery { .. }
                | TypePredicate { .. }
                | TemplateLiteralType { .. }
                | ImportType { .. }
                | TypeParameter { .. }
        )
    }
}
