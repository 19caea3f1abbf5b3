//! Recursive-descent parser from tokens to a [`Program`].

use wavelift_lifting::StepKind;

use crate::ast::{
    AddOp, Call, Expression, Factor, Function, MulOp, Operand, Program, Statement, Term,
};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

/// Parses a token stream into a program.
///
/// # Errors
///
/// Returns the first structural error: a missing `;` or `)`, an unknown
/// function, a call with the wrong arity, or a premature end.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut parser = Parser { tokens, pos: 0 };
    let mut statements = Vec::new();
    while !parser.at_end() {
        statements.push(parser.statement()?);
        parser.require(&TokenKind::Semicolon)?;
    }
    Ok(Program { statements })
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn take(&mut self, expected: &str) -> Result<&'t Token, ParseError> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| ParseError::UnexpectedEnd {
                expected: expected.to_string(),
            })?;
        self.pos += 1;
        Ok(token)
    }

    fn require(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        let expected = kind.to_string();
        let token = self.take(&expected)?;
        if &token.kind != kind {
            return Err(ParseError::Unexpected {
                line: token.line,
                expected,
                found: token.kind.to_string(),
            });
        }
        Ok(())
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        let token: &'t Token = &self.tokens[self.pos];
        if let TokenKind::Ident(name) = &token.kind {
            if let Some(kind) = StepKind::from_tag(name) {
                self.pos += 1;
                return Ok(Statement::Tag {
                    kind,
                    line: token.line,
                });
            }
        }
        let line = token.line;
        let expr = self.expression()?;
        Ok(Statement::Coefficient { expr, line })
    }

    fn expression(&mut self) -> Result<Expression, ParseError> {
        let first = self.term()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => AddOp::Add,
                Some(TokenKind::Minus) => AddOp::Sub,
                _ => break,
            };
            self.pos += 1;
            rest.push((op, self.term()?));
        }
        Ok(Expression { first, rest })
    }

    fn term(&mut self) -> Result<Term, ParseError> {
        let first = self.factor()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => MulOp::Mul,
                Some(TokenKind::Slash) => MulOp::Div,
                _ => break,
            };
            self.pos += 1;
            rest.push((op, self.factor()?));
        }
        Ok(Term { first, rest })
    }

    fn factor(&mut self) -> Result<Factor, ParseError> {
        const EXPECTED: &str = "a number, ( or a function call";

        let mut token = self.take(EXPECTED)?;
        let mut negated = false;
        if matches!(token.kind, TokenKind::Plus | TokenKind::Minus) {
            negated = token.kind == TokenKind::Minus;
            token = self.take(EXPECTED)?;
        }
        let line = token.line;

        let operand = match &token.kind {
            TokenKind::Number(value) => Operand::Number(*value),
            TokenKind::LeftParen => {
                let inner = self.expression()?;
                self.require(&TokenKind::RightParen)?;
                Operand::Group(Box::new(inner))
            }
            TokenKind::Ident(name) => {
                let function = Function::from_name(name).ok_or_else(|| {
                    ParseError::UnknownFunction {
                        line,
                        name: name.clone(),
                    }
                })?;
                Operand::Call(self.call(function, line)?)
            }
            other => {
                return Err(ParseError::Unexpected {
                    line,
                    expected: EXPECTED.to_string(),
                    found: other.to_string(),
                });
            }
        };
        Ok(Factor { negated, operand })
    }

    fn call(&mut self, function: Function, line: usize) -> Result<Call, ParseError> {
        self.require(&TokenKind::LeftParen)?;
        let mut args = Vec::new();
        if self.peek() != Some(&TokenKind::RightParen) {
            args.push(self.expression()?);
            while self.peek() == Some(&TokenKind::Comma) {
                self.pos += 1;
                args.push(self.expression()?);
            }
        }
        self.require(&TokenKind::RightParen)?;

        if args.len() != function.arity() {
            return Err(ParseError::Arity {
                line,
                name: function.name().to_string(),
                expected: function.arity(),
                found: args.len(),
            });
        }
        Ok(Call { function, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn parse_text(text: &str) -> Result<Program, ParseError> {
        parse(&tokenize(text)?)
    }

    #[test]
    fn tags_and_coefficients() {
        let program = parse_text("update;\n1;").unwrap();
        assert_eq!(program.statements.len(), 2);
        assert_eq!(
            program.statements[0],
            Statement::Tag {
                kind: StepKind::Update,
                line: 1
            }
        );
        assert!(matches!(
            program.statements[1],
            Statement::Coefficient { line: 2, .. }
        ));
    }

    #[test]
    fn precedence_is_encoded_in_the_tree() {
        let program = parse_text("1 + 2 * 3;").unwrap();
        let Statement::Coefficient { expr, .. } = &program.statements[0] else {
            panic!("expected a coefficient");
        };
        assert_eq!(expr.rest.len(), 1);
        assert_eq!(expr.rest[0].0, AddOp::Add);
        assert_eq!(expr.rest[0].1.rest.len(), 1);
        assert_eq!(expr.rest[0].1.rest[0].0, MulOp::Mul);
    }

    #[test]
    fn missing_semicolon_at_end() {
        assert_eq!(
            parse_text("predict; 1"),
            Err(ParseError::UnexpectedEnd {
                expected: ";".into()
            })
        );
    }

    #[test]
    fn missing_semicolon_between_statements() {
        assert_eq!(
            parse_text("predict\n1;"),
            Err(ParseError::Unexpected {
                line: 2,
                expected: ";".into(),
                found: "1".into(),
            })
        );
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_eq!(
            parse_text("predict; (1 + 2;"),
            Err(ParseError::Unexpected {
                line: 1,
                expected: ")".into(),
                found: ";".into(),
            })
        );
    }

    #[test]
    fn unknown_function_is_named() {
        assert_eq!(
            parse_text("predict;\ntan(1);"),
            Err(ParseError::UnknownFunction {
                line: 2,
                name: "tan".into()
            })
        );
    }

    #[test]
    fn tag_inside_expression_is_unknown_function() {
        assert!(matches!(
            parse_text("1 + update;"),
            Err(ParseError::UnknownFunction { name, .. }) if name == "update"
        ));
    }

    #[test]
    fn arity_is_checked() {
        assert_eq!(
            parse_text("predict; pow(2);"),
            Err(ParseError::Arity {
                line: 1,
                name: "pow".into(),
                expected: 2,
                found: 1,
            })
        );
        assert!(parse_text("predict; sqrt(1, 2);").is_err());
        assert!(parse_text("predict; abs();").is_err());
    }

    #[test]
    fn dangling_operator() {
        assert_eq!(
            parse_text("predict; 1 +"),
            Err(ParseError::UnexpectedEnd {
                expected: "a number, ( or a function call".into()
            })
        );
    }

    #[test]
    fn empty_program() {
        assert_eq!(parse_text("// nothing\n").unwrap().statements, vec![]);
    }
}
