use log::trace;
use super::token::{TokenType, Token, look_up_ident};

/// Byte-oriented ASCII lexer. Once the input is exhausted every call to
/// `next_token` returns an `EOF` token.
pub struct Lexer {
    input: Vec<u8>,
    position: usize,
    read_position: usize,
    ch: u8,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut l = Lexer {
            input: input.as_bytes().to_vec(),
            position: 0,
            read_position: 0,
            ch: 0,
        };
        l.read_char();
        l
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_white_space();

        let tok = match self.ch {
            b'=' => if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenType::EQ, "==")
                } else {
                    new_token(TokenType::ASSIGN, self.ch)
                },
            b'+' => new_token(TokenType::PLUS, self.ch),
            b'-' => new_token(TokenType::MINUS, self.ch),
            b'*' => new_token(TokenType::ASTERISK, self.ch),
            b'/' => new_token(TokenType::SLASH, self.ch),
            b'!' => if self.peek_char() == b'=' {
                self.read_char();
                Token::new(TokenType::NotEq, "!=")
            } else {
                new_token(TokenType::BANG, self.ch)
            },
            b'<' => new_token(TokenType::LT, self.ch),
            b'>' => new_token(TokenType::GT, self.ch),
            b';' => new_token(TokenType::SEMICOLON, self.ch),
            b':' => new_token(TokenType::COLON, self.ch),
            b',' => new_token(TokenType::COMMA, self.ch),
            b'.' => new_token(TokenType::DOT, self.ch),
            b'{' => new_token(TokenType::LBRACE, self.ch),
            b'}' => new_token(TokenType::RBRACE, self.ch),
            b'(' => new_token(TokenType::LPAREN, self.ch),
            b')' => new_token(TokenType::RPAREN, self.ch),
            b'[' => new_token(TokenType::LBRACKET, self.ch),
            b']' => new_token(TokenType::RBRACKET, self.ch),
            b'"' => Token::new(TokenType::STRING, self.read_string()),
            0 => Token::new(TokenType::EOF, ""),
            _ => if is_letter(self.ch) {
                let literal = self.read_identifier();
                let tok = Token::new(look_up_ident(&literal), literal);
                trace!("token {}", tok);
                return tok;
            } else if is_digit(self.ch) {
                let tok = Token::new(TokenType::INT, self.read_number());
                trace!("token {}", tok);
                return tok;
            } else {
                new_token(TokenType::ILLEGAL, self.ch)
            },
        };
        self.read_char();

        trace!("token {}", tok);
        tok
    }

    fn skip_white_space(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn read_char(&mut self) {
        self.ch = self.peek_char();
        self.position = self.read_position;
        if self.read_position <= self.input.len() {
            self.read_position += 1;
        }
    }

    fn peek_char(&self) -> u8 {
        self.input.get(self.read_position).copied().unwrap_or(0)
    }

    fn read_identifier(&mut self) -> String {
        let position = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }
        self.slice(position, self.position)
    }

    fn read_number(&mut self) -> String {
        let position = self.position;
        while is_digit(self.ch) {
            self.read_char();
        }
        self.slice(position, self.position)
    }

    // An unterminated string yields whatever was read before end of input.
    fn read_string(&mut self) -> String {
        let position = self.position + 1;
        loop {
            self.read_char();
            if self.ch == b'"' || self.ch == 0 {
                break;
            }
        }
        self.slice(position, self.position)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.input.len());
        String::from_utf8_lossy(&self.input[start.min(end)..end]).into_owned()
    }
}

/// Yields every token up to, but not including, the end marker.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let tok = self.next_token();
        if tok.token_type == TokenType::EOF {
            None
        } else {
            Some(tok)
        }
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

fn new_token(token_type: TokenType, ch: u8) -> Token {
    Token {
        token_type,
        literal: (ch as char).to_string(),
    }
}
