//! Formula parser
//!
//! A recursive descent parser for spreadsheet formulas with proper operator
//! precedence.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use gridcalc_core::{CellRange, Coord};

/// Parse a formula expression string into an AST
///
/// The widget strips the `=` marker before handing the expression over, but
/// a single leading `=` is tolerated because chained formula results carry
/// one.
///
/// # Example
/// ```rust
/// use gridcalc_formula::parse_expression;
///
/// let expr = parse_expression("1+2").unwrap();
/// let expr = parse_expression("SUM(A1:A10)").unwrap();
/// let expr = parse_expression("IF(A1>0,\"Yes\",\"No\")").unwrap();
/// ```
pub fn parse_expression(expression: &str) -> FormulaResult<Expr> {
    let expression = expression.trim();
    let expression = expression.strip_prefix('=').unwrap_or(expression);

    let mut parser = Parser::new(expression);
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    match parser.current_token()? {
        Token::Eof => Ok(expr),
        token => Err(FormulaError::Parse(format!(
            "Unexpected {token:?} after expression"
        ))),
    }
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    // Literals
    Number(f64),
    String(String),
    Boolean(bool),

    // Identifiers and references
    Identifier(String), // Function name
    CellRef(String),    // Cell reference like A1, $A$1

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    Ampersand,
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    Colon,
    Comma,

    // Delimiters
    LeftParen,
    RightParen,

    // End of input
    Eof,
}

/// Formula parser
struct Parser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Option<FormulaResult<Token>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: None,
        };
        parser.advance_token();
        parser
    }

    // === Token scanning ===

    fn advance_token(&mut self) {
        self.skip_whitespace();
        self.current_token = Some(self.scan_token());
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();

        if self.is_at_end() {
            return Ok(Token::Eof);
        }

        let c = self.peek_char().unwrap();

        // Single-character tokens
        match c {
            '+' => {
                self.advance();
                return Ok(Token::Plus);
            }
            '-' => {
                self.advance();
                return Ok(Token::Minus);
            }
            '*' => {
                self.advance();
                return Ok(Token::Star);
            }
            '/' => {
                self.advance();
                return Ok(Token::Slash);
            }
            '^' => {
                self.advance();
                return Ok(Token::Caret);
            }
            '%' => {
                self.advance();
                return Ok(Token::Percent);
            }
            '&' => {
                self.advance();
                return Ok(Token::Ampersand);
            }
            ':' => {
                self.advance();
                return Ok(Token::Colon);
            }
            ',' => {
                self.advance();
                return Ok(Token::Comma);
            }
            '(' => {
                self.advance();
                return Ok(Token::LeftParen);
            }
            ')' => {
                self.advance();
                return Ok(Token::RightParen);
            }
            _ => {}
        }

        // Two-character operators
        if c == '<' {
            self.advance();
            if self.peek_char() == Some('=') {
                self.advance();
                return Ok(Token::LessEqual);
            } else if self.peek_char() == Some('>') {
                self.advance();
                return Ok(Token::NotEqual);
            }
            return Ok(Token::LessThan);
        }

        if c == '>' {
            self.advance();
            if self.peek_char() == Some('=') {
                self.advance();
                return Ok(Token::GreaterEqual);
            }
            return Ok(Token::GreaterThan);
        }

        if c == '=' {
            self.advance();
            return Ok(Token::Equal);
        }

        // String literal
        if c == '"' {
            return self.scan_string();
        }

        // Number
        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit()))
        {
            return Ok(self.scan_number());
        }

        // Identifier, cell reference, or boolean
        if c.is_ascii_alphabetic() || c == '_' || c == '$' {
            return Ok(self.scan_identifier_or_ref());
        }

        Err(FormulaError::Parse(format!("Unexpected character '{c}'")))
    }

    fn scan_string(&mut self) -> FormulaResult<Token> {
        self.advance(); // Skip opening quote

        let mut s = String::new();
        loop {
            match self.peek_char() {
                None => return Err(FormulaError::Parse("Unterminated string literal".into())),
                Some('"') => {
                    // Doubled quote is an escaped quote
                    if self.peek_char_at(1) == Some('"') {
                        s.push('"');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance(); // Skip closing quote
                        break;
                    }
                }
                Some(c) => {
                    s.push(c);
                    self.advance();
                }
            }
        }

        Ok(Token::String(s))
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        // Integer part
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent part
        if self.peek_char().is_some_and(|c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek_char().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let num_str = &self.input[start..self.pos];
        let num: f64 = num_str.parse().unwrap_or(0.0);
        Token::Number(num)
    }

    fn scan_identifier_or_ref(&mut self) -> Token {
        let start = self.pos;

        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
        {
            self.advance();
        }

        let text = &self.input[start..self.pos];

        // Boolean literals (but not if followed by '(' - then it's a function call)
        let upper = text.to_uppercase();
        if upper == "TRUE" && self.peek_char() != Some('(') {
            return Token::Boolean(true);
        }
        if upper == "FALSE" && self.peek_char() != Some('(') {
            return Token::Boolean(false);
        }

        // A cell reference is letters followed by digits, but if followed by
        // '(' it's a function call (e.g. LOG10(100))
        if Self::is_cell_reference(text) && self.peek_char() != Some('(') {
            return Token::CellRef(text.to_string());
        }

        Token::Identifier(text.to_string())
    }

    fn is_cell_reference(text: &str) -> bool {
        // Simplified check: optional $, letters, optional $, digits
        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;

        if chars.get(i) == Some(&'$') {
            i += 1;
        }

        let letter_start = i;
        while i < chars.len() && chars[i].is_ascii_alphabetic() {
            i += 1;
        }
        if i == letter_start {
            return false;
        }

        if chars.get(i) == Some(&'$') {
            i += 1;
        }

        let digit_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i == digit_start {
            return false;
        }

        // Must have consumed everything
        i == chars.len()
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_token(&self) -> FormulaResult<&Token> {
        match self.current_token.as_ref() {
            Some(Ok(token)) => Ok(token),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(&Token::Eof),
        }
    }

    fn consume(&mut self) -> FormulaResult<Token> {
        let token = self.current_token.take().unwrap_or(Ok(Token::Eof))?;
        self.advance_token();
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token()? == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {:?}, got {:?}",
                expected,
                self.current_token()?
            )))
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Comparison: =, <>, <, <=, >, >=
    // 2. Concatenation: &
    // 3. Addition/Subtraction: +, -
    // 4. Multiplication/Division: *, /
    // 5. Exponentiation: ^
    // 6. Unary: -, %
    // 7. Range: :
    // 8. Primary: literals, references, function calls, parentheses

    fn parse_expression(&mut self) -> FormulaResult<Expr> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_concatenation()?;

        loop {
            let op = match self.current_token()? {
                Token::Equal => BinaryOperator::Equal,
                Token::NotEqual => BinaryOperator::NotEqual,
                Token::LessThan => BinaryOperator::LessThan,
                Token::LessEqual => BinaryOperator::LessEqual,
                Token::GreaterThan => BinaryOperator::GreaterThan,
                Token::GreaterEqual => BinaryOperator::GreaterEqual,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_concatenation()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_concatenation(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_additive()?;

        while matches!(self.current_token()?, Token::Ampersand) {
            self.consume()?;
            let right = self.parse_additive()?;
            left = Expr::BinaryOp {
                op: BinaryOperator::Concat,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token()? {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_exponent()?;

        loop {
            let op = match self.current_token()? {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_exponent()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_exponent(&mut self) -> FormulaResult<Expr> {
        let left = self.parse_unary()?;

        if matches!(self.current_token()?, Token::Caret) {
            self.consume()?;
            let right = self.parse_exponent()?; // Right associative
            return Ok(Expr::BinaryOp {
                op: BinaryOperator::Power,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<Expr> {
        // Prefix unary minus
        if matches!(self.current_token()?, Token::Minus) {
            self.consume()?;
            let operand = self.parse_unary()?;
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Negate,
                operand: Box::new(operand),
            });
        }

        // Prefix plus (no-op)
        if matches!(self.current_token()?, Token::Plus) {
            self.consume()?;
            return self.parse_unary();
        }

        // Parse primary, then check for postfix percent
        let mut expr = self.parse_range()?;

        while matches!(self.current_token()?, Token::Percent) {
            self.consume()?;
            expr = Expr::UnaryOp {
                op: UnaryOperator::Percent,
                operand: Box::new(expr),
            };
        }

        Ok(expr)
    }

    fn parse_range(&mut self) -> FormulaResult<Expr> {
        let left = self.parse_primary()?;

        if matches!(self.current_token()?, Token::Colon) {
            self.consume()?;
            let right = self.parse_primary()?;

            return match (&left, &right) {
                (Expr::CellRef(start), Expr::CellRef(end)) => {
                    Ok(Expr::RangeRef(CellRange::new(*start, *end)))
                }
                _ => Err(FormulaError::Parse(
                    "Range corners must be cell references".into(),
                )),
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> FormulaResult<Expr> {
        match self.current_token()?.clone() {
            Token::Number(n) => {
                self.consume()?;
                Ok(Expr::Number(n))
            }

            Token::String(s) => {
                self.consume()?;
                Ok(Expr::String(s))
            }

            Token::Boolean(b) => {
                self.consume()?;
                Ok(Expr::Boolean(b))
            }

            Token::LeftParen => {
                self.consume()?;
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            Token::CellRef(ref_str) => {
                self.consume()?;
                let coord = Coord::parse(&ref_str).map_err(|e| {
                    FormulaError::Parse(format!("Invalid cell reference '{ref_str}': {e}"))
                })?;
                Ok(Expr::CellRef(coord))
            }

            Token::Identifier(name) => {
                self.consume()?;
                if matches!(self.current_token()?, Token::LeftParen) {
                    self.parse_function_call(name)
                } else {
                    Err(FormulaError::Parse(format!(
                        "Unexpected identifier '{name}'"
                    )))
                }
            }

            token => Err(FormulaError::Parse(format!("Unexpected token: {token:?}"))),
        }
    }

    fn parse_function_call(&mut self, name: String) -> FormulaResult<Expr> {
        self.expect(&Token::LeftParen)?;

        let mut args = Vec::new();

        if !matches!(self.current_token()?, Token::RightParen) {
            args.push(self.parse_expression()?);

            while matches!(self.current_token()?, Token::Comma) {
                self.consume()?;
                args.push(self.parse_expression()?);
            }
        }

        self.expect(&Token::RightParen)?;

        Ok(Expr::Function {
            name: name.to_uppercase(),
            args,
        })
    }
}
