use std::rc::Rc;

use crate::{
    ast::{FunctionBody, FunctionName, Stat},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Parses a single statement, dispatching on the lookahead token.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stat> {
        match self.current() {
            Some(Token::SemiColon) => {
                self.advance();
                Ok(Stat::Empty)
            },
            Some(Token::Break) => {
                self.advance();
                Ok(Stat::Break)
            },
            Some(Token::Goto) => {
                self.advance();
                Ok(Stat::Goto(self.expect_identifier()?))
            },
            Some(Token::DoubleColon) => self.parse_label(),
            Some(Token::Do) => {
                self.advance();
                let block = self.parse_block()?;
                self.expect(&Token::End, "'end' keyword")?;
                Ok(Stat::Do(block))
            },
            Some(Token::While) => self.parse_while(),
            Some(Token::Repeat) => self.parse_repeat(),
            Some(Token::If) => self.parse_if(),
            Some(Token::For) => self.parse_for(),
            Some(Token::Function) => self.parse_function_decl(),
            Some(Token::Local) => self.parse_local(),
            Some(Token::Identifier(_) | Token::LParen) => self.parse_assignment_or_call(),
            _ => Err(self.unexpected()),
        }
    }

    /// `label := "::" Name "::"`
    fn parse_label(&mut self) -> ParseResult<Stat> {
        self.advance();
        let name = self.expect_identifier()?;
        self.expect(&Token::DoubleColon, "'::' to close label")?;
        Ok(Stat::Label(name))
    }

    /// `while exp do block end`
    fn parse_while(&mut self) -> ParseResult<Stat> {
        self.advance();
        let cond = self.parse_expression()?;
        self.expect(&Token::Do, "'do' keyword")?;
        let body = self.parse_block()?;
        self.expect(&Token::End, "'end' keyword")?;
        Ok(Stat::While { cond, body })
    }

    /// `repeat block until exp`
    fn parse_repeat(&mut self) -> ParseResult<Stat> {
        self.advance();
        let body = self.parse_block()?;
        self.expect(&Token::Until, "'until' keyword")?;
        let cond = self.parse_expression()?;
        Ok(Stat::Repeat { body, cond })
    }

    /// `if exp then block (elseif exp then block)* (else block)? end`
    fn parse_if(&mut self) -> ParseResult<Stat> {
        self.advance();
        let mut conds = Vec::new();
        let mut blocks = Vec::new();
        loop {
            conds.push(self.parse_expression()?);
            self.expect(&Token::Then, "'then' keyword")?;
            blocks.push(self.parse_block()?);

            if self.eat(&Token::ElseIf) {
                continue;
            }
            if self.eat(&Token::Else) {
                blocks.push(self.parse_block()?);
                self.expect(&Token::End, "'end' keyword")?;
                break;
            }
            self.expect(&Token::End, "'elseif', 'else' or 'end' keyword")?;
            break;
        }
        Ok(Stat::If { conds, blocks })
    }

    /// Parses either loop form after `for`: a `=` after the first name
    /// selects the numeric loop, a name list followed by `in` the generic
    /// one.
    fn parse_for(&mut self) -> ParseResult<Stat> {
        self.advance();
        let name = self.expect_identifier()?;

        if self.eat(&Token::Assign) {
            let init = self.parse_expression()?;
            self.expect(&Token::Comma, "','")?;
            let limit = self.parse_expression()?;
            let step = if self.eat(&Token::Comma) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            self.expect(&Token::Do, "'do' keyword")?;
            let body = self.parse_block()?;
            self.expect(&Token::End, "'end' keyword")?;
            return Ok(Stat::NumericFor { name,
                                         init,
                                         limit,
                                         step,
                                         body });
        }

        let mut names = vec![name];
        while self.eat(&Token::Comma) {
            names.push(self.expect_identifier()?);
        }
        self.expect(&Token::In, "'in' keyword")?;
        let exprs = self.parse_expression_list()?;
        self.expect(&Token::Do, "'do' keyword")?;
        let body = self.parse_block()?;
        self.expect(&Token::End, "'end' keyword")?;
        Ok(Stat::GenericFor { names, exprs, body })
    }

    /// `function funcname funcbody` where
    /// `funcname := Name ("." Name)* (":" Name)?`.
    fn parse_function_decl(&mut self) -> ParseResult<Stat> {
        self.advance();
        let name = self.parse_function_name()?;
        let body = self.parse_function_body()?;
        Ok(Stat::FunctionDecl { name,
                                body: Rc::new(body), })
    }

    /// Parses a qualified function name, collecting the dotted prefix and
    /// noting whether the final separator was `:`.
    fn parse_function_name(&mut self) -> ParseResult<FunctionName> {
        let mut last = self.expect_identifier()?;
        let mut prefix = Vec::new();
        let mut is_method = false;

        while self.eat(&Token::Dot) {
            prefix.push(last);
            last = self.expect_identifier()?;
        }
        if self.eat(&Token::Colon) {
            prefix.push(last);
            last = self.expect_identifier()?;
            is_method = true;
        }
        Ok(FunctionName { prefix,
                          name: last,
                          is_method })
    }

    /// `local function Name funcbody | local namelist ("=" explist)?`
    fn parse_local(&mut self) -> ParseResult<Stat> {
        self.advance();

        if self.eat(&Token::Function) {
            let name = self.expect_identifier()?;
            let body = self.parse_function_body()?;
            return Ok(Stat::LocalFunction { name,
                                            body: Rc::new(body), });
        }

        if !matches!(self.current(), Some(Token::Identifier(_))) {
            return Err(ParseError::Missing { expected: "identifier or 'function' after 'local'", });
        }
        let mut names = vec![self.expect_identifier()?];
        while self.eat(&Token::Comma) {
            names.push(self.expect_identifier()?);
        }

        let exprs = if self.eat(&Token::Assign) {
            self.parse_expression_list()?
        } else {
            Vec::new()
        };
        Ok(Stat::Local { names, exprs })
    }

    /// `funcbody := "(" parlist? ")" block end` with
    /// `parlist := namelist ("," "...")? | "..."`.
    pub(crate) fn parse_function_body(&mut self) -> ParseResult<FunctionBody> {
        self.expect(&Token::LParen, "'(' to open parameter list")?;

        let mut params = Vec::new();
        let mut is_vararg = false;
        if self.eat(&Token::Ellipsis) {
            is_vararg = true;
        } else {
            while matches!(self.current(), Some(Token::Identifier(_))) {
                params.push(self.expect_identifier()?);
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
            if self.eat(&Token::Ellipsis) {
                is_vararg = true;
            }
        }
        self.expect(&Token::RParen, "')' to close parameter list")?;

        let block = self.parse_block()?;
        self.expect(&Token::End, "'end' keyword")?;
        Ok(FunctionBody { params,
                          is_vararg,
                          block })
    }
}
