use crate::{
    ast::{Args, CallExpr, Expr, Stat},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Parses a prefix expression.
    ///
    /// `prefixexp := (Name | "(" exp ")") postfix*` where each postfix is
    /// one of `[exp]`, `.Name`, `:Name args`, or `args`. The result is a
    /// variable access, a call, or the bare head.
    pub(crate) fn parse_prefix_expression(&mut self) -> ParseResult<Expr> {
        let head = self.parse_prefix_head()?;
        self.parse_prefix_tail(head)
    }

    /// `Name | "(" exp ")"`
    fn parse_prefix_head(&mut self) -> ParseResult<Expr> {
        match self.current() {
            Some(Token::Identifier(_)) => self.expect_identifier().map(Expr::Name),
            Some(Token::LParen) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(expr)
            },
            _ => Err(self.unexpected()),
        }
    }

    /// Applies postfix steps to `head` for as long as the lookahead starts
    /// one.
    fn parse_prefix_tail(&mut self, head: Expr) -> ParseResult<Expr> {
        let mut expr = head;
        loop {
            match self.current() {
                Some(Token::LBracket) => {
                    self.advance();
                    let key = self.parse_expression()?;
                    self.expect(&Token::RBracket, "']'")?;
                    expr = Expr::Index { prefix: Box::new(expr),
                                         key:    Box::new(key), };
                },
                Some(Token::Dot) => {
                    self.advance();
                    let name = self.expect_identifier()?;
                    expr = Expr::Member { prefix: Box::new(expr),
                                          name };
                },
                Some(Token::Colon) => {
                    self.advance();
                    let name = self.expect_identifier()?;
                    let args = self.parse_call_args()?;
                    expr = Expr::Call(Box::new(CallExpr { prefix: expr,
                                                          method: Some(name),
                                                          args }));
                },
                Some(Token::LParen | Token::LBrace | Token::Str(_)) => {
                    let args = self.parse_call_args()?;
                    expr = Expr::Call(Box::new(CallExpr { prefix: expr,
                                                          method: None,
                                                          args }));
                },
                _ => break,
            }
        }
        Ok(expr)
    }

    /// `args := "(" [explist] ")" | tableconstructor | LiteralString`
    fn parse_call_args(&mut self) -> ParseResult<Args> {
        match self.current() {
            Some(Token::LParen) => {
                self.advance();
                if self.eat(&Token::RParen) {
                    return Ok(Args::List(Vec::new()));
                }
                let exprs = self.parse_expression_list()?;
                self.expect(&Token::RParen, "')' after arguments")?;
                Ok(Args::List(exprs))
            },
            Some(Token::LBrace) => Ok(Args::Table(self.parse_table_constructor()?)),
            Some(Token::Str(s)) => {
                let s = s.clone();
                self.advance();
                Ok(Args::Str(s))
            },
            _ => Err(self.unexpected()),
        }
    }

    /// Parses a statement that begins with a prefix expression and decides
    /// between a statement-call and a (multi-)assignment.
    ///
    /// If the parsed chain ends in a call and no `,` or `=` follows, it is
    /// a call statement. If it ends in an assignable form, a variable list
    /// and `=` expression list must follow. Anything else is a parse
    /// error.
    pub(crate) fn parse_assignment_or_call(&mut self) -> ParseResult<Stat> {
        let expr = self.parse_prefix_expression()?;

        if let Expr::Call(call) = expr {
            return Ok(Stat::Call(call));
        }
        if !expr.is_assignable() {
            return Err(ParseError::InvalidAssignmentTarget);
        }

        let mut targets = vec![expr];
        while self.eat(&Token::Comma) {
            let target = self.parse_prefix_expression()?;
            if !target.is_assignable() {
                return Err(ParseError::InvalidAssignmentTarget);
            }
            targets.push(target);
        }
        self.expect(&Token::Assign, "'=' in assignment")?;
        let exprs = self.parse_expression_list()?;
        Ok(Stat::Assign { targets, exprs })
    }
}
