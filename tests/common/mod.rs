use handsolve::Num;

/// Evaluates a rendered expression with the usual precedence and left
/// associativity. Panics on malformed input.
#[allow(dead_code)]
pub fn eval(text: &str) -> Option<Num> {
    let tokens: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.sum()?;
    assert_eq!(parser.pos, parser.tokens.len(), "trailing input in {text:?}");
    Some(value)
}

struct Parser {
    tokens: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.tokens.get(self.pos).copied()
    }

    fn sum(&mut self) -> Option<Num> {
        let mut value = self.product()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.product()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Some(value)
    }

    fn product(&mut self) -> Option<Num> {
        let mut value = self.atom()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.pos += 1;
            let rhs = self.atom()?;
            if op == '*' {
                value *= rhs;
            } else if rhs == Num::from_integer(0) {
                return None;
            } else {
                value /= rhs;
            }
        }
        Some(value)
    }

    fn atom(&mut self) -> Option<Num> {
        match self.peek() {
            Some('(') => {
                self.pos += 1;
                let value = self.sum()?;
                assert_eq!(self.peek(), Some(')'), "unbalanced parentheses");
                self.pos += 1;
                Some(value)
            }
            Some('-') => {
                self.pos += 1;
                Some(-self.atom()?)
            }
            _ => {
                let start = self.pos;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
                assert!(self.pos > start, "expected a number at {start}");
                let digits: String = self.tokens[start..self.pos].iter().collect();
                Some(Num::from_integer(digits.parse().ok()?))
            }
        }
    }
}

#[allow(dead_code)]
pub fn ints(values: &[i64]) -> Vec<Num> {
    values.iter().map(|&v| Num::from_integer(v)).collect()
}

/// True when the first parenthesis closes at the very end of `text`.
#[allow(dead_code)]
pub fn wrapped_whole(text: &str) -> bool {
    if !text.starts_with('(') {
        return false;
    }
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return idx == text.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}
