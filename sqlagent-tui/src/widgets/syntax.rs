//! SQL syntax highlighting.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

#[derive(Debug, Clone)]
pub struct SqlHighlighter {
    pub keyword_color: Color,
    pub function_color: Color,
    pub string_color: Color,
    pub number_color: Color,
    pub comment_color: Color,
}

impl SqlHighlighter {
    /// One output line per input line.
    pub fn highlight(&self, content: &str) -> Text<'static> {
        let lines: Vec<Line<'static>> = content.lines().map(|line| self.highlight_line(line)).collect();
        Text::from(lines)
    }

    pub fn highlight_line(&self, line: &str) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];

            if ch == '-' && chars.get(i + 1) == Some(&'-') {
                let rest: String = chars[i..].iter().collect();
                spans.push(Span::styled(rest, Style::default().fg(self.comment_color)));
                break;
            }

            if ch == '\'' || ch == '"' {
                let start = i;
                i += 1;
                while i < chars.len() {
                    if chars[i] == ch {
                        // doubled quote is an escaped quote
                        if chars.get(i + 1) == Some(&ch) {
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let color = if ch == '\'' {
                    self.string_color
                } else {
                    Color::Reset
                };
                spans.push(Span::styled(literal, Style::default().fg(color)));
                continue;
            }

            if ch.is_ascii_digit() {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let number: String = chars[start..i].iter().collect();
                spans.push(Span::styled(number, Style::default().fg(self.number_color)));
                continue;
            }

            if ch.is_alphabetic() || ch == '_' {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                let upper = word.to_ascii_uppercase();
                let style = if is_keyword(&upper) {
                    Style::default()
                        .fg(self.keyword_color)
                        .add_modifier(Modifier::BOLD)
                } else if chars.get(i) == Some(&'(') {
                    Style::default().fg(self.function_color)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(word, style));
                continue;
            }

            spans.push(Span::raw(ch.to_string()));
            i += 1;
        }

        Line::from(spans)
    }
}

pub fn is_keyword(upper: &str) -> bool {
    matches!(
        upper,
        "SELECT"
            | "FROM"
            | "WHERE"
            | "AND"
            | "OR"
            | "NOT"
            | "IN"
            | "IS"
            | "NULL"
            | "AS"
            | "ON"
            | "JOIN"
            | "LEFT"
            | "RIGHT"
            | "INNER"
            | "OUTER"
            | "FULL"
            | "CROSS"
            | "GROUP"
            | "ORDER"
            | "BY"
            | "HAVING"
            | "LIMIT"
            | "OFFSET"
            | "DISTINCT"
            | "UNION"
            | "ALL"
            | "CASE"
            | "WHEN"
            | "THEN"
            | "ELSE"
            | "END"
            | "ASC"
            | "DESC"
            | "BETWEEN"
            | "LIKE"
            | "ILIKE"
            | "EXISTS"
            | "WITH"
            | "TRUE"
            | "FALSE"
            | "INSERT"
            | "INTO"
            | "VALUES"
            | "UPDATE"
            | "SET"
            | "DELETE"
    )
}
