//! Recursive descent evaluation of conditions such as `<if condition="...">`.
//!
//! ```text
//! or         := and ['||' and]
//! and        := relational ['&&' relational]
//! relational := '(' or ')' | primary [relop primary]
//! primary    := '!' ('(' or ')' | primary) | value | '(' | ')'
//! ```
//!
//! Every production evaluates as it parses; no tree is built. `||` and `&&` each take at most one
//! right operand, and the right operand is only read when the left one does not decide the
//! result. Text left over once the result is decided is never tokenized, so calls in it do not
//! run.

use anyhow::Context as _;

use crate::context::Context;
use crate::errors::{ExpressionError, MakeResult};
use crate::tokenizer::{Token, Tokenizer};
use crate::value::{Relation, Value};

pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(context: &'a dyn Context, expression: &'a str) -> Self {
        Parser {
            tokenizer: Tokenizer::new(context, expression),
        }
    }

    pub fn evaluate(&mut self) -> MakeResult<bool> {
        self.logical_or()
    }

    fn logical_or(&mut self) -> MakeResult<bool> {
        let result = self.logical_and()?;
        if !result {
            let token = self.tokenizer.next_token()?;
            if token == Token::Or {
                return self.logical_and();
            }
            self.tokenizer.push_back(token);
        }
        Ok(result)
    }

    fn logical_and(&mut self) -> MakeResult<bool> {
        let result = self.relational()?;
        if result {
            let token = self.tokenizer.next_token()?;
            if token == Token::And {
                return self.relational();
            }
            self.tokenizer.push_back(token);
        }
        Ok(result)
    }

    fn relational(&mut self) -> MakeResult<bool> {
        let lhs = self.primary()?;
        if lhs == Token::LeftParen {
            let result = self.logical_or()?;
            return match self.primary()? {
                Token::RightParen => Ok(result),
                _ => Err(ExpressionError::UnbalancedParenthesis.into()),
            };
        }

        let token = self.tokenizer.next_token()?;
        let relation = match token {
            Token::Eq => Relation::Eq,
            Token::Ne => Relation::Ne,
            Token::Lt => Relation::Lt,
            Token::Gt => Relation::Gt,
            Token::Le => Relation::Le,
            Token::Ge => Relation::Ge,
            token => {
                self.tokenizer.push_back(token);
                return Ok(expect_value(lhs)?.is_true());
            }
        };

        let lhs = expect_value(lhs)?;
        let rhs = expect_value(self.primary()?)?;
        Ok(lhs.relate(relation, &rhs))
    }

    fn primary(&mut self) -> MakeResult<Token> {
        let token = self.tokenizer.next_token()?;
        if token != Token::Not {
            return Ok(token);
        }

        let operand = self.tokenizer.next_token()?;
        let result = if operand == Token::LeftParen {
            let result = self.logical_or()?;
            if self.tokenizer.next_token()? != Token::RightParen {
                return Err(ExpressionError::UnbalancedParenthesis.into());
            }
            result
        } else {
            self.tokenizer.push_back(operand);
            expect_value(self.primary()?)?.is_true()
        };
        Ok(Token::Value(Value::bool(!result)))
    }
}

fn expect_value(token: Token) -> MakeResult<Value> {
    match token {
        Token::Value(value) => Ok(value),
        _ => Err(ExpressionError::ExpectingValue.into()),
    }
}

/// Evaluate `expression` as a condition. Errors carry the expression text as context.
pub fn eval(context: &dyn Context, expression: &str) -> MakeResult<bool> {
    Parser::new(context, expression)
        .evaluate()
        .with_context(|| format!("failed to evaluate '{expression}'"))
}
