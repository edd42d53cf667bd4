//! Dense polynomials in the beam coordinate `x`
//!
//! Coefficients are stored in ascending order: `coeffs[i]` multiplies `x^i`.
//! Trailing zero coefficients are trimmed, so the zero polynomial has no
//! coefficients at all.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BeamError;

/// Highest exponent accepted when parsing `x^n`
const MAX_PARSED_EXPONENT: u32 = 16;
/// Deepest nesting of parentheses, signs and exponents accepted by the parser
const MAX_PARSE_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl From<Vec<f64>> for Polynomial {
    fn from(coeffs: Vec<f64>) -> Self {
        Self::new(coeffs)
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(poly: Polynomial) -> Self {
        poly.coeffs
    }
}

impl Polynomial {
    pub fn new(coeffs: impl Into<Vec<f64>>) -> Self {
        let mut coeffs = coeffs.into();
        while coeffs.last() == Some(&0.0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// `slope * x + intercept`
    pub fn linear(slope: f64, intercept: f64) -> Self {
        Self::new(vec![intercept, slope])
    }

    /// The monomial `x`
    pub fn x() -> Self {
        Self::linear(1.0, 0.0)
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// `None` for the zero polynomial
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Value of a degree-0 polynomial, `None` otherwise
    pub fn as_constant(&self) -> Option<f64> {
        match self.coeffs.len() {
            0 => Some(0.0),
            1 => Some(self.coeffs[0]),
            _ => None,
        }
    }

    /// Horner evaluation
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.coeffs.iter().map(|c| c * factor).collect::<Vec<_>>())
    }

    /// `x * p(x)`
    pub fn mul_x(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = Vec::with_capacity(self.coeffs.len() + 1);
        coeffs.push(0.0);
        coeffs.extend_from_slice(&self.coeffs);
        Self::new(coeffs)
    }

    /// `p(scale * x + offset)`
    pub fn compose_linear(&self, scale: f64, offset: f64) -> Self {
        let inner = Self::linear(scale, offset);
        self.coeffs
            .iter()
            .rev()
            .fold(Self::zero(), |acc, &c| &(&acc * &inner) + &Self::constant(c))
    }

    /// `p(x - origin)`: re-bases a polynomial written in a local coordinate
    /// whose zero sits at `origin`
    pub fn shifted(&self, origin: f64) -> Self {
        self.compose_linear(1.0, -origin)
    }

    /// Antiderivative with zero constant term
    pub fn antiderivative(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = Vec::with_capacity(self.coeffs.len() + 1);
        coeffs.push(0.0);
        coeffs.extend(
            self.coeffs
                .iter()
                .enumerate()
                .map(|(i, c)| c / (i as f64 + 1.0)),
        );
        Self::new(coeffs)
    }

    pub fn derivative(&self) -> Self {
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c * i as f64)
                .collect::<Vec<_>>(),
        )
    }

    /// Definite integral over `[a, b]`
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        let primitive = self.antiderivative();
        primitive.evaluate(b) - primitive.evaluate(a)
    }

    pub fn pow(&self, exponent: u32) -> Self {
        (0..exponent).fold(Self::constant(1.0), |acc, _| &acc * self)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..len)
            .map(|i| self.coeffs.get(i).unwrap_or(&0.0) + rhs.coeffs.get(i).unwrap_or(&0.0))
            .collect::<Vec<_>>();
        Polynomial::new(coeffs)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        &self + &rhs
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self + &(-rhs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scaled(-1.0)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }
        let mut coeffs = vec![0.0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial::new(coeffs)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate().rev() {
            if c == 0.0 {
                continue;
            }
            let sign = if c < 0.0 { "-" } else { "+" };
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {} ", sign)?;
            }
            match i {
                0 => write!(f, "{}", c.abs())?,
                1 => write!(f, "{}*x", c.abs())?,
                _ => write!(f, "{}*x^{}", c.abs(), i)?,
            }
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Polynomial {
    type Err = BeamError;

    /// Parse expressions such as `"10*x + 5"`, `"-2.5x^2 + x"` or `"3*(x - 1)^2"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s)?;
        let mut parser = Parser { tokens, pos: 0, depth: 0 };
        let poly = parser.expression()?;
        match parser.peek() {
            None => Ok(poly),
            Some(token) => Err(BeamError::InvalidExpression(format!(
                "unexpected {:?} in \"{}\"",
                token, s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    X,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, BeamError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => {}
            'x' | 'X' => tokens.push(Token::X),
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '/' => tokens.push(Token::Slash),
            '^' => tokens.push(Token::Caret),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Caret);
                    i += 1;
                } else {
                    tokens.push(Token::Star);
                }
            }
            '0'..='9' | '.' => {
                let start = i;
                while i + 1 < chars.len() && (chars[i + 1].is_ascii_digit() || chars[i + 1] == '.') {
                    i += 1;
                }
                // Scientific notation: 1e3, 2.5E-2
                if i + 1 < chars.len() && matches!(chars[i + 1], 'e' | 'E') {
                    let mut j = i + 2;
                    if j < chars.len() && matches!(chars[j], '+' | '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        while j + 1 < chars.len() && chars[j + 1].is_ascii_digit() {
                            j += 1;
                        }
                        i = j;
                    }
                }
                let text: String = chars[start..=i].iter().collect();
                let value = text.parse::<f64>().map_err(|_| {
                    BeamError::InvalidExpression(format!("malformed number \"{}\"", text))
                })?;
                tokens.push(Token::Number(value));
            }
            other => {
                return Err(BeamError::InvalidExpression(format!(
                    "unexpected character '{}' in \"{}\"",
                    other, input
                )));
            }
        }
        i += 1;
    }

    if tokens.is_empty() {
        return Err(BeamError::InvalidExpression("empty expression".into()));
    }
    Ok(tokens)
}

/// Recursive descent over the token stream
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn expression(&mut self) -> Result<Polynomial, BeamError> {
        let mut acc = self.term()?;
        while let Some(token @ (Token::Plus | Token::Minus)) = self.peek() {
            self.next();
            let rhs = self.term()?;
            acc = if token == Token::Plus { &acc + &rhs } else { &acc - &rhs };
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<Polynomial, BeamError> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.next();
                    let rhs = self.unary()?;
                    acc = &acc * &rhs;
                }
                Some(Token::Slash) => {
                    self.next();
                    let rhs = self.unary()?;
                    let divisor = rhs.as_constant().ok_or_else(|| {
                        BeamError::InvalidExpression("division by a non-constant term".into())
                    })?;
                    if divisor == 0.0 {
                        return Err(BeamError::InvalidExpression("division by zero".into()));
                    }
                    acc = Polynomial::new(acc.coeffs.iter().map(|c| c / divisor).collect::<Vec<_>>());
                }
                // Implicit product: 10x, 2(x + 1)
                Some(Token::X | Token::LParen | Token::Number(_)) => {
                    let rhs = self.power()?;
                    acc = &acc * &rhs;
                }
                _ => return Ok(acc),
            }
        }
    }

    // Every recursive path passes through here
    fn unary(&mut self) -> Result<Polynomial, BeamError> {
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(BeamError::InvalidExpression(format!(
                "nesting deeper than {} levels",
                MAX_PARSE_DEPTH
            )));
        }
        self.depth += 1;
        let result = self.signed();
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> Result<Polynomial, BeamError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.next();
                Ok(-&self.unary()?)
            }
            Some(Token::Plus) => {
                self.next();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Polynomial, BeamError> {
        let base = self.atom()?;
        if self.peek() != Some(Token::Caret) {
            return Ok(base);
        }
        self.next();
        let exponent = self.unary()?;
        let exponent = exponent
            .as_constant()
            .filter(|e| *e >= 0.0 && e.fract() == 0.0 && *e <= MAX_PARSED_EXPONENT as f64)
            .ok_or_else(|| {
                BeamError::InvalidExpression(format!(
                    "exponents must be integers between 0 and {}",
                    MAX_PARSED_EXPONENT
                ))
            })?;
        Ok(base.pow(exponent as u32))
    }

    fn atom(&mut self) -> Result<Polynomial, BeamError> {
        match self.next() {
            Some(Token::Number(value)) => Ok(Polynomial::constant(value)),
            Some(Token::X) => Ok(Polynomial::x()),
            Some(Token::LParen) => {
                let inner = self.expression()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(BeamError::InvalidExpression("missing closing parenthesis".into())),
                }
            }
            Some(token) => Err(BeamError::InvalidExpression(format!(
                "unexpected {:?}",
                token
            ))),
            None => Err(BeamError::InvalidExpression("unexpected end of expression".into())),
        }
    }
}
