//! Recursive-descent parser over the lexeme stream.

use smol_str::{SmolStr, format_smolstr};

use super::lexer::{Lexeme, Token};
use crate::base::{NodeId, TextRange, TextSize};
use crate::syntax::{
    Block, Class, ClassKind, CompoundName, DeclarationStatement, ForEach, Method, Namespace,
    NodeKind, Property, SourceFile, Variable,
};

/// Declaration modifiers. They never change what a member declares.
const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "internal",
    "static",
    "abstract",
    "virtual",
    "override",
    "const",
    "extern",
    "inline",
    "async",
    "sealed",
    "partial",
    "owned",
    "unowned",
    "weak",
    "dynamic",
    "volatile",
    "unsafe",
];

/// Ownership qualifiers that may prefix a type.
const TYPE_QUALIFIERS: &[&str] = &["owned", "unowned", "weak", "dynamic"];

/// Parameter direction markers.
const PARAM_MARKERS: &[&str] = &["ref", "out", "params", "owned", "unowned", "weak"];

/// Identifiers that start a statement and therefore never a declaration.
const STATEMENT_KEYWORDS: &[&str] = &[
    "if", "else", "while", "do", "switch", "case", "default", "try", "finally", "lock", "unlock",
    "return", "throw", "yield", "delete", "break", "continue", "this", "base",
];

/// Where a member is being declared.
#[derive(Clone, Debug)]
enum Owner {
    /// Full name of the enclosing namespace.
    Namespace(SmolStr),
    Class { id: NodeId, name: SmolStr },
}

pub(super) struct Parser<'p, 's> {
    tokens: &'p [Lexeme<'s>],
    pos: usize,
    file: &'p mut SourceFile,
}

impl<'p, 's> Parser<'p, 's> {
    pub(super) fn new(tokens: &'p [Lexeme<'s>], file: &'p mut SourceFile) -> Self {
        Self {
            tokens,
            pos: 0,
            file,
        }
    }

    pub(super) fn parse_file(mut self) {
        let owner = Owner::Namespace(SmolStr::default());
        let members = self.members(&owner, false);
        self.set_members(NodeId::ROOT, members);
    }

    // =========================================================================
    // TOKEN CURSOR
    // =========================================================================

    fn nth(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn peek(&self) -> Option<Token> {
        self.nth(0)
    }

    fn at(&self, kind: Token) -> bool {
        self.peek() == Some(kind)
    }

    fn nth_text(&self, n: usize) -> &'s str {
        self.tokens.get(self.pos + n).map_or("", |t| t.text)
    }

    fn at_ident(&self, text: &str) -> bool {
        self.at(Token::Ident) && self.nth_text(0) == text
    }

    fn at_ident_in(&self, set: &[&str]) -> bool {
        self.at(Token::Ident) && set.contains(&self.nth_text(0))
    }

    fn bump(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: Token) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Start of the current token (end of input at EOF).
    fn start(&self) -> TextSize {
        match self.tokens.get(self.pos) {
            Some(token) => token.range.start(),
            None => self.tokens.last().map_or(TextSize::from(0), |t| t.range.end()),
        }
    }

    fn prev_end(&self) -> TextSize {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.range.end(),
            None => TextSize::from(0),
        }
    }

    /// Range from `start` to the end of the last consumed token.
    fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.prev_end().max(start))
    }

    fn ident(&mut self) -> Option<SmolStr> {
        if !self.at(Token::Ident) {
            return None;
        }
        let text = self.nth_text(0);
        self.bump();
        Some(SmolStr::new(text.strip_prefix('@').unwrap_or(text)))
    }

    fn error(&mut self, message: &'static str) {
        let offset = self.start();
        self.file.push_error(offset, message);
    }

    // =========================================================================
    // SKIPPING
    // =========================================================================

    /// Skip one token, or a whole bracketed group if the token opens one.
    fn skip_tree(&mut self) {
        if !matches!(
            self.peek(),
            Some(Token::LBrace | Token::LParen | Token::LBracket)
        ) {
            self.bump();
            return;
        }
        let mut depth = 0usize;
        while let Some(kind) = self.peek() {
            match kind {
                Token::LBrace | Token::LParen | Token::LBracket => depth += 1,
                Token::RBrace | Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.bump();
            if depth == 0 {
                break;
            }
        }
    }

    /// Skip to the next depth-0 token in `stop`, or to a closing bracket of
    /// the enclosing group. Neither is consumed.
    fn skip_until(&mut self, stop: &[Token]) {
        while let Some(kind) = self.peek() {
            if stop.contains(&kind)
                || matches!(kind, Token::RBrace | Token::RParen | Token::RBracket)
            {
                return;
            }
            self.skip_tree();
        }
    }

    /// Skip a generic argument list `<...>`.
    fn skip_angle(&mut self) {
        if let Some(end) = self.scan_angle(0) {
            self.pos += end;
        }
    }

    /// Lookahead: index just past the `<...>` group starting at `n`.
    fn scan_angle(&self, mut n: usize) -> Option<usize> {
        let mut depth = 0usize;
        loop {
            match self.nth(n)? {
                Token::Lt => depth += 1,
                Token::Gt => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(n + 1);
                    }
                }
                Token::Semi | Token::LBrace | Token::RBrace | Token::Eq => return None,
                _ => {}
            }
            n += 1;
        }
    }

    /// Lookahead: index just past the `[...]` group starting at `n`.
    fn scan_brackets(&self, mut n: usize) -> Option<usize> {
        let mut depth = 0usize;
        loop {
            match self.nth(n)? {
                Token::LBracket => depth += 1,
                Token::RBracket => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(n + 1);
                    }
                }
                Token::Semi | Token::LBrace | Token::RBrace => return None,
                _ => {}
            }
            n += 1;
        }
    }

    fn skip_attributes(&mut self) {
        while self.at(Token::LBracket) {
            self.skip_tree();
        }
    }

    fn skip_modifiers(&mut self) {
        loop {
            if self.at_ident_in(MODIFIERS) || self.at(Token::New) {
                self.bump();
            } else if self.at(Token::Class) && self.nth(1) == Some(Token::Construct) {
                // `class construct { }`
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Resynchronise after a member the parser does not understand.
    fn recover_member(&mut self) {
        self.skip_until(&[Token::Semi, Token::LBrace]);
        if !self.eat(Token::Semi) && self.at(Token::LBrace) {
            self.skip_tree();
        }
    }

    fn set_members(&mut self, id: NodeId, members: Vec<NodeId>) {
        match &mut self.file.node_mut(id).kind {
            NodeKind::Namespace(ns) => ns.members = members,
            NodeKind::Class(class) => class.members = members,
            _ => {}
        }
    }

    // =========================================================================
    // DECLARATIONS
    // =========================================================================

    /// Members up to the closing `}` (not consumed) or end of input.
    fn members(&mut self, owner: &Owner, nested: bool) -> Vec<NodeId> {
        let mut members = Vec::new();
        loop {
            match self.peek() {
                None => {
                    if nested {
                        self.error("expected `}`");
                    }
                    break;
                }
                Some(Token::RBrace) if nested => break,
                Some(Token::RBrace) => {
                    self.error("unmatched `}`");
                    self.bump();
                    continue;
                }
                Some(Token::Using) if matches!(owner, Owner::Namespace(_)) => {
                    self.parse_using();
                    continue;
                }
                _ => {}
            }
            let before = self.pos;
            self.parse_member(owner, &mut members);
            if self.pos == before {
                self.bump();
            }
        }
        members
    }

    fn parse_using(&mut self) {
        self.bump();
        loop {
            let mut name = String::new();
            while let Some(segment) = self.ident() {
                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&segment);
                if !self.eat(Token::Dot) {
                    break;
                }
            }
            if name.is_empty() {
                self.error("expected a namespace name");
                break;
            }
            self.file.add_using(name);
            if !self.eat(Token::Comma) {
                break;
            }
        }
        if !self.eat(Token::Semi) {
            self.error("expected `;`");
            self.recover_member();
        }
    }

    fn parse_member(&mut self, owner: &Owner, out: &mut Vec<NodeId>) {
        self.skip_attributes();
        let start = self.start();
        self.skip_modifiers();

        let Some(kind) = self.peek() else {
            return;
        };
        match kind {
            Token::Namespace => match owner {
                Owner::Namespace(prefix) => {
                    let prefix = prefix.clone();
                    out.extend(self.parse_namespace(start, &prefix));
                }
                Owner::Class { .. } => {
                    self.error("namespace declared inside a type");
                    self.bump();
                    self.recover_member();
                }
            },
            Token::Class => self.push_class(start, ClassKind::Class, owner, out),
            Token::Interface => self.push_class(start, ClassKind::Interface, owner, out),
            Token::Struct => self.push_class(start, ClassKind::Struct, owner, out),
            Token::Enum => self.push_class(start, ClassKind::Enum, owner, out),
            Token::ErrorDomain => self.push_class(start, ClassKind::ErrorDomain, owner, out),
            Token::Delegate | Token::Signal => {
                self.bump();
                self.parse_typed_member(start, out);
            }
            Token::Construct => {
                self.bump();
                if self.at(Token::LBrace) {
                    out.push(self.parse_block());
                } else {
                    self.recover_member();
                }
            }
            Token::Tilde => {
                // Destructor: only its body can declare anything.
                self.bump();
                self.skip_until(&[Token::LBrace, Token::Semi]);
                if self.at(Token::LBrace) {
                    out.push(self.parse_block());
                } else {
                    self.eat(Token::Semi);
                }
            }
            Token::Ident => match owner {
                Owner::Class { id, name } if self.at_constructor(name) => {
                    let id = *id;
                    out.push(self.parse_constructor(start, id));
                }
                _ => self.parse_typed_member(start, out),
            },
            Token::Semi => self.bump(),
            _ => {
                self.error("expected a declaration");
                self.recover_member();
            }
        }
    }

    fn parse_namespace(&mut self, start: TextSize, prefix: &str) -> Option<NodeId> {
        self.bump();
        let mut ids: Vec<NodeId> = Vec::new();
        let mut full_name = SmolStr::new(prefix);
        while let Some(segment) = self.ident() {
            full_name = if full_name.is_empty() {
                segment.clone()
            } else {
                format_smolstr!("{full_name}.{segment}")
            };
            ids.push(self.file.alloc(
                TextRange::empty(start),
                NodeKind::Namespace(Namespace {
                    name: Some(segment),
                    full_name: full_name.clone(),
                    members: Vec::new(),
                }),
            ));
            if !self.eat(Token::Dot) {
                break;
            }
        }
        let (Some(&outer), Some(&inner)) = (ids.first(), ids.last()) else {
            self.error("expected a namespace name");
            self.recover_member();
            return None;
        };

        if self.eat(Token::LBrace) {
            let members = self.members(&Owner::Namespace(full_name), true);
            self.eat(Token::RBrace);
            self.set_members(inner, members);
        } else {
            self.error("expected `{`");
            self.recover_member();
        }

        let end = self.prev_end();
        for pair in ids.windows(2) {
            self.set_members(pair[0], vec![pair[1]]);
        }
        for &id in &ids {
            self.file.set_end(id, end);
        }
        Some(outer)
    }

    fn push_class(&mut self, start: TextSize, kind: ClassKind, owner: &Owner, out: &mut Vec<NodeId>) {
        out.extend(self.parse_class(start, kind, owner));
    }

    fn parse_class(&mut self, start: TextSize, kind: ClassKind, owner: &Owner) -> Option<NodeId> {
        self.bump();
        let Some(name) = self.ident() else {
            self.error("expected a type name");
            self.recover_member();
            return None;
        };
        if self.at(Token::Lt) {
            self.skip_angle();
        }
        let mut supertypes = Vec::new();
        if self.eat(Token::Colon) {
            while let Some(ty) = self.parse_type() {
                supertypes.push(ty);
                if !self.eat(Token::Comma) {
                    break;
                }
            }
        }
        let enclosing = match owner {
            Owner::Class { id, .. } => Some(*id),
            Owner::Namespace(_) => None,
        };
        let id = self.file.alloc(
            TextRange::empty(start),
            NodeKind::Class(Class {
                name: name.clone(),
                kind,
                supertypes,
                members: Vec::new(),
                enclosing,
            }),
        );

        self.skip_until(&[Token::LBrace, Token::Semi]);
        if self.eat(Token::LBrace) {
            let mut members = Vec::new();
            if matches!(kind, ClassKind::Enum | ClassKind::ErrorDomain) {
                self.parse_enum_values(&name, &mut members);
            }
            let owner = Owner::Class { id, name };
            members.extend(self.members(&owner, true));
            self.eat(Token::RBrace);
            self.set_members(id, members);
        } else {
            self.eat(Token::Semi);
        }
        self.file.set_end(id, self.prev_end());
        Some(id)
    }

    /// Enum values and error codes: fields typed by the enclosing type.
    fn parse_enum_values(&mut self, type_name: &SmolStr, out: &mut Vec<NodeId>) {
        loop {
            self.skip_attributes();
            let is_value = self.at(Token::Ident)
                && matches!(
                    self.nth(1),
                    Some(Token::Comma | Token::Eq | Token::Semi | Token::RBrace)
                );
            if !is_value {
                break;
            }
            let start = self.start();
            let Some(name) = self.ident() else {
                break;
            };
            if self.eat(Token::Eq) {
                self.skip_until(&[Token::Comma, Token::Semi]);
            }
            let range = self.range_from(start);
            out.push(self.file.alloc(
                range,
                NodeKind::Field(Variable {
                    name,
                    ty: CompoundName::Simple(type_name.clone()),
                }),
            ));
            if self.eat(Token::Comma) {
                continue;
            }
            self.eat(Token::Semi);
            break;
        }
    }

    /// `Foo (` or `Foo.named (` inside class `Foo`.
    fn at_constructor(&self, class_name: &str) -> bool {
        let text = self.nth_text(0);
        if text.strip_prefix('@').unwrap_or(text) != class_name {
            return false;
        }
        match self.nth(1) {
            Some(Token::LParen) => true,
            Some(Token::Dot) => {
                self.nth(2) == Some(Token::Ident) && self.nth(3) == Some(Token::LParen)
            }
            _ => false,
        }
    }

    fn parse_constructor(&mut self, start: TextSize, class: NodeId) -> NodeId {
        self.bump();
        let name = if self.eat(Token::Dot) { self.ident() } else { None };
        let (params, body) = self.parse_callable_rest();
        let range = self.range_from(start);
        self.file.alloc(
            range,
            NodeKind::Constructor(Method {
                name,
                return_type: None,
                params,
                body,
                owner: Some(class),
            }),
        )
    }

    /// A member that starts with a type: method, property, or field list.
    fn parse_typed_member(&mut self, start: TextSize, out: &mut Vec<NodeId>) {
        let Some(ty) = self.parse_type() else {
            self.error("expected a type");
            self.recover_member();
            return;
        };
        let Some(name) = self.ident() else {
            self.error("expected a member name");
            self.recover_member();
            return;
        };
        if self.at(Token::Lt) {
            self.skip_angle();
        }

        match self.peek() {
            Some(Token::LParen) => {
                let (params, body) = self.parse_callable_rest();
                let range = self.range_from(start);
                out.push(self.file.alloc(
                    range,
                    NodeKind::Method(Method {
                        name: Some(name),
                        return_type: Some(ty),
                        params,
                        body,
                        owner: None,
                    }),
                ));
            }
            Some(Token::LBrace) => {
                let accessors = self.parse_accessors();
                let range = self.range_from(start);
                out.push(self.file.alloc(
                    range,
                    NodeKind::Property(Property {
                        name,
                        ty,
                        accessors,
                    }),
                ));
            }
            _ => self.parse_fields(start, name, ty, out),
        }
    }

    /// `T a = x, b;` at member level.
    fn parse_fields(
        &mut self,
        start: TextSize,
        first: SmolStr,
        ty: CompoundName,
        out: &mut Vec<NodeId>,
    ) {
        let mut field_start = start;
        let mut name = first;
        loop {
            while self.at(Token::LBracket) {
                self.skip_tree();
            }
            if self.eat(Token::Eq) {
                self.skip_until(&[Token::Comma, Token::Semi]);
            }
            let more = self.at(Token::Comma)
                && self.nth(1) == Some(Token::Ident)
                && matches!(
                    self.nth(2),
                    Some(Token::Eq | Token::Comma | Token::Semi | Token::LBracket)
                );
            if !more && !self.eat(Token::Semi) {
                self.error("expected `;`");
                self.recover_member();
            }
            let range = self.range_from(field_start);
            out.push(self.file.alloc(
                range,
                NodeKind::Field(Variable {
                    name,
                    ty: ty.clone(),
                }),
            ));
            if !more {
                return;
            }
            self.bump();
            field_start = self.start();
            match self.ident() {
                Some(next) => name = next,
                None => return,
            }
        }
    }

    /// Parameters, `throws`/`requires`/`ensures` clauses, and the body.
    fn parse_callable_rest(&mut self) -> (Vec<NodeId>, Option<NodeId>) {
        let params = if self.at(Token::LParen) {
            self.parse_params()
        } else {
            Vec::new()
        };
        loop {
            if self.eat(Token::Throws) {
                while self.parse_type().is_some() {
                    if !self.eat(Token::Comma) {
                        break;
                    }
                }
            } else if self.at_ident_in(&["requires", "ensures"]) {
                self.bump();
                if self.at(Token::LParen) {
                    self.skip_tree();
                }
            } else {
                break;
            }
        }
        self.skip_until(&[Token::LBrace, Token::Semi]);
        let body = if self.at(Token::LBrace) {
            Some(self.parse_block())
        } else {
            self.eat(Token::Semi);
            None
        };
        (params, body)
    }

    fn parse_params(&mut self) -> Vec<NodeId> {
        self.bump();
        let mut params = Vec::new();
        loop {
            self.skip_attributes();
            match self.peek() {
                None => break,
                Some(Token::RParen) => {
                    self.bump();
                    break;
                }
                Some(Token::Comma | Token::Ellipsis) => {
                    self.bump();
                    continue;
                }
                _ => {}
            }
            let before = self.pos;
            let start = self.start();
            while self.at_ident_in(PARAM_MARKERS) && self.nth(1) == Some(Token::Ident) {
                self.bump();
            }
            if let Some(ty) = self.parse_type() {
                if let Some(name) = self.ident() {
                    if self.eat(Token::Eq) {
                        self.skip_until(&[Token::Comma]);
                    }
                    let range = self.range_from(start);
                    params.push(
                        self.file
                            .alloc(range, NodeKind::Parameter(Variable { name, ty })),
                    );
                }
            }
            self.skip_until(&[Token::Comma]);
            if self.pos == before && !self.at(Token::RParen) {
                self.bump();
            }
        }
        params
    }

    /// Property accessors. Only accessor bodies become nodes.
    fn parse_accessors(&mut self) -> Vec<NodeId> {
        self.bump();
        let mut accessors = Vec::new();
        loop {
            match self.peek() {
                None => {
                    self.error("expected `}`");
                    break;
                }
                Some(Token::RBrace) => {
                    self.bump();
                    break;
                }
                _ => {}
            }
            let before = self.pos;
            self.skip_attributes();
            while matches!(self.peek(), Some(Token::Ident | Token::Construct)) {
                self.bump();
            }
            if self.eat(Token::Eq) {
                self.skip_until(&[Token::Semi]);
            }
            if self.at(Token::LBrace) {
                accessors.push(self.parse_block());
            }
            self.eat(Token::Semi);
            if self.pos == before {
                self.skip_tree();
            }
        }
        accessors
    }

    /// A type reference. Generic arguments, nullability, pointers, and array
    /// suffixes are dropped.
    fn parse_type(&mut self) -> Option<CompoundName> {
        while self.at_ident_in(TYPE_QUALIFIERS) && self.nth(1) == Some(Token::Ident) {
            self.bump();
        }
        let mut name = CompoundName::Simple(self.ident()?);
        while self.at(Token::Dot) && self.nth(1) == Some(Token::Ident) {
            self.bump();
            if let Some(segment) = self.ident() {
                name = name.qualify(segment);
            }
        }
        if self.at(Token::Lt) {
            self.skip_angle();
        }
        loop {
            match self.peek() {
                Some(Token::Question | Token::Star) => self.bump(),
                Some(Token::LBracket) => self.skip_tree(),
                _ => break,
            }
        }
        Some(name)
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    fn parse_block(&mut self) -> NodeId {
        let start = self.start();
        self.bump();
        let mut statements = Vec::new();
        loop {
            match self.peek() {
                None => {
                    self.error("expected `}`");
                    break;
                }
                Some(Token::RBrace) => {
                    self.bump();
                    break;
                }
                _ => {}
            }
            let before = self.pos;
            if let Some(id) = self.parse_statement() {
                statements.push(id);
            }
            if self.pos == before {
                self.bump();
            }
        }
        let range = self.range_from(start);
        self.file.alloc(range, NodeKind::Block(Block { statements }))
    }

    /// Wrap the sub-statements of a compound statement in a block.
    fn compound(&mut self, start: TextSize, statements: Vec<NodeId>) -> NodeId {
        let range = self.range_from(start);
        self.file.alloc(range, NodeKind::Block(Block { statements }))
    }

    fn skip_condition(&mut self) {
        if self.at(Token::LParen) {
            self.skip_tree();
        }
    }

    fn parse_statement(&mut self) -> Option<NodeId> {
        let start = self.start();
        match self.peek()? {
            Token::LBrace => Some(self.parse_block()),
            Token::Semi => {
                self.bump();
                None
            }
            Token::Foreach => Some(self.parse_foreach(start)),
            Token::For => Some(self.parse_for(start)),
            Token::Ident => match self.nth_text(0) {
                "if" => {
                    self.bump();
                    self.skip_condition();
                    let mut parts: Vec<NodeId> = self.parse_statement().into_iter().collect();
                    if self.at_ident("else") {
                        self.bump();
                        parts.extend(self.parse_statement());
                    }
                    Some(self.compound(start, parts))
                }
                "while" | "lock" | "switch" => {
                    self.bump();
                    self.skip_condition();
                    let parts = self.parse_statement().into_iter().collect();
                    Some(self.compound(start, parts))
                }
                "do" => {
                    self.bump();
                    let parts = self.parse_statement().into_iter().collect();
                    if self.at_ident("while") {
                        self.bump();
                        self.skip_condition();
                    }
                    self.eat(Token::Semi);
                    Some(self.compound(start, parts))
                }
                "try" => {
                    self.bump();
                    let mut parts: Vec<NodeId> = self.parse_statement().into_iter().collect();
                    loop {
                        if self.at(Token::Catch) {
                            let catch_start = self.start();
                            parts.push(self.parse_catch(catch_start));
                        } else if self.at_ident("finally") {
                            self.bump();
                            parts.extend(self.parse_statement());
                        } else {
                            break;
                        }
                    }
                    Some(self.compound(start, parts))
                }
                "case" => {
                    self.skip_until(&[Token::Colon]);
                    self.eat(Token::Colon);
                    None
                }
                "default" if self.nth(1) == Some(Token::Colon) => {
                    self.bump();
                    self.bump();
                    None
                }
                _ if self.declaration_ahead() => Some(self.parse_declaration(start)),
                _ => Some(self.parse_opaque(start)),
            },
            _ => Some(self.parse_opaque(start)),
        }
    }

    /// Any statement the parser does not look into, up to its `;`.
    fn parse_opaque(&mut self, start: TextSize) -> NodeId {
        let before = self.pos;
        self.skip_until(&[Token::Semi]);
        self.eat(Token::Semi);
        if self.pos == before {
            self.bump();
        }
        let range = self.range_from(start);
        self.file.alloc(range, NodeKind::Statement)
    }

    /// Lookahead: `Type name =`, `Type name;`, `Type name,` or `Type name[`.
    fn declaration_ahead(&self) -> bool {
        if STATEMENT_KEYWORDS.contains(&self.nth_text(0)) {
            return false;
        }
        let mut n = 0;
        while self.nth(n) == Some(Token::Ident)
            && TYPE_QUALIFIERS.contains(&self.nth_text(n))
            && self.nth(n + 1) == Some(Token::Ident)
        {
            n += 1;
        }
        if self.nth(n) != Some(Token::Ident) {
            return false;
        }
        n += 1;
        while self.nth(n) == Some(Token::Dot) && self.nth(n + 1) == Some(Token::Ident) {
            n += 2;
        }
        if self.nth(n) == Some(Token::Lt) {
            match self.scan_angle(n) {
                Some(end) => n = end,
                None => return false,
            }
        }
        loop {
            match self.nth(n) {
                Some(Token::Question | Token::Star) => n += 1,
                Some(Token::LBracket) => match self.scan_brackets(n) {
                    Some(end) => n = end,
                    None => return false,
                },
                _ => break,
            }
        }
        self.nth(n) == Some(Token::Ident)
            && matches!(
                self.nth(n + 1),
                Some(Token::Eq | Token::Semi | Token::Comma | Token::LBracket)
            )
    }

    /// A local declaration statement, including its `;`.
    fn parse_declaration(&mut self, start: TextSize) -> NodeId {
        let mut variables = Vec::new();
        if let Some(ty) = self.parse_type() {
            loop {
                let var_start = self.start();
                let Some(name) = self.ident() else {
                    break;
                };
                while self.at(Token::LBracket) {
                    self.skip_tree();
                }
                if self.eat(Token::Eq) {
                    self.skip_until(&[Token::Comma, Token::Semi]);
                }
                let range = self.range_from(var_start);
                variables.push(self.file.alloc(
                    range,
                    NodeKind::LocalVariable(Variable {
                        name,
                        ty: ty.clone(),
                    }),
                ));
                let more = self.at(Token::Comma)
                    && self.nth(1) == Some(Token::Ident)
                    && matches!(
                        self.nth(2),
                        Some(Token::Eq | Token::Comma | Token::Semi | Token::LBracket)
                    );
                if !more {
                    break;
                }
                self.bump();
            }
        }
        self.skip_until(&[Token::Semi]);
        self.eat(Token::Semi);
        let range = self.range_from(start);
        self.file.alloc(
            range,
            NodeKind::Declaration(DeclarationStatement { variables }),
        )
    }

    /// A single loop/catch variable `Type name`.
    fn parse_bound_variable(&mut self) -> Option<NodeId> {
        let start = self.start();
        let ty = self.parse_type()?;
        let name = self.ident()?;
        let range = self.range_from(start);
        Some(
            self.file
                .alloc(range, NodeKind::LocalVariable(Variable { name, ty })),
        )
    }

    fn parse_foreach(&mut self, start: TextSize) -> NodeId {
        self.bump();
        let mut variable = None;
        if self.eat(Token::LParen) {
            variable = self.parse_bound_variable();
            self.skip_until(&[]);
            self.eat(Token::RParen);
        }
        let body = self.parse_statement();
        match variable {
            Some(variable) => {
                let range = self.range_from(start);
                self.file
                    .alloc(range, NodeKind::ForEach(ForEach { variable, body }))
            }
            None => self.compound(start, body.into_iter().collect()),
        }
    }

    /// `for (init; cond; step) body` becomes a block of `[init, body]` so the
    /// loop variable is scoped to the loop.
    fn parse_for(&mut self, start: TextSize) -> NodeId {
        self.bump();
        let mut parts = Vec::new();
        if self.eat(Token::LParen) {
            if self.at(Token::Ident) && self.declaration_ahead() {
                let init_start = self.start();
                parts.push(self.parse_declaration(init_start));
            }
            self.skip_until(&[]);
            self.eat(Token::RParen);
        }
        parts.extend(self.parse_statement());
        self.compound(start, parts)
    }

    /// `catch (E e) { }` becomes a block of `[declaration of e, body]`.
    fn parse_catch(&mut self, start: TextSize) -> NodeId {
        self.bump();
        let mut parts = Vec::new();
        if self.eat(Token::LParen) {
            if let Some(variable) = self.parse_bound_variable() {
                let range = self.file.node(variable).range;
                parts.push(self.file.alloc(
                    range,
                    NodeKind::Declaration(DeclarationStatement {
                        variables: vec![variable],
                    }),
                ));
            }
            self.skip_until(&[]);
            self.eat(Token::RParen);
        }
        parts.extend(self.parse_statement());
        self.compound(start, parts)
    }
}
