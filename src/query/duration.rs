use crate::route::model::DurationLiteral;
use serde::Serialize;

/// A `staleTime`/`gcTime` value ready to be placed in a hook options object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationExpr {
    pub expression: String,
    /// Human readable form of a compound duration, e.g. `1 hour 30 minutes`.
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Hour,
    Minute,
    Second,
}

impl Unit {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'h' => Some(Unit::Hour),
            'm' => Some(Unit::Minute),
            's' => Some(Unit::Second),
            _ => None,
        }
    }

    fn millis_expr(&self) -> &'static str {
        match self {
            Unit::Hour => "60 * 60 * 1000",
            Unit::Minute => "60 * 1000",
            Unit::Second => "1000",
        }
    }

    fn label(&self, amount: u64) -> String {
        let name = match self {
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
        };
        if amount == 1 {
            format!("{amount} {name}")
        } else {
            format!("{amount} {name}s")
        }
    }
}

/// Split `1h30m` into `[(1, Hour), (30, Minute)]`; `None` unless the whole
/// string is made of `<int><unit>` tokens.
fn tokens(input: &str) -> Option<Vec<(u64, Unit)>> {
    let mut out = Vec::new();
    let mut digits = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit = Unit::from_char(c)?;
        if digits.is_empty() {
            return None;
        }
        out.push((digits.parse().ok()?, unit));
        digits.clear();
    }

    (digits.is_empty() && !out.is_empty()).then_some(out)
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Convert a duration vendor extension; `None` when the value has no recognised form.
pub fn parse_duration(literal: &DurationLiteral) -> Option<DurationExpr> {
    let text = match literal {
        DurationLiteral::Number(n) if n.is_finite() => {
            return Some(DurationExpr {
                expression: format_number(*n),
                comment: None,
            })
        }
        DurationLiteral::Number(_) => return None,
        DurationLiteral::Text(text) => text.trim(),
    };

    match text {
        "Infinity" => {
            return Some(DurationExpr {
                expression: "Infinity".to_string(),
                comment: None,
            })
        }
        "static" => {
            return Some(DurationExpr {
                expression: "'static'".to_string(),
                comment: None,
            })
        }
        _ => {}
    }

    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        let millis: u64 = text.parse().ok()?;
        return Some(DurationExpr {
            expression: millis.to_string(),
            comment: None,
        });
    }

    let tokens = tokens(text)?;
    let expression = tokens
        .iter()
        .map(|(amount, unit)| format!("{amount} * {}", unit.millis_expr()))
        .collect::<Vec<_>>()
        .join(" + ");
    let comment = tokens
        .iter()
        .map(|(amount, unit)| unit.label(*amount))
        .collect::<Vec<_>>()
        .join(" ");

    Some(DurationExpr {
        expression,
        comment: Some(comment),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> DurationLiteral {
        DurationLiteral::Text(s.to_string())
    }

    #[test]
    fn compound_duration() {
        let expr = parse_duration(&text("1h30m")).unwrap();
        assert_eq!(expr.expression, "1 * 60 * 60 * 1000 + 30 * 60 * 1000");
        assert_eq!(expr.comment.as_deref(), Some("1 hour 30 minutes"));

        let expr = parse_duration(&text("45s")).unwrap();
        assert_eq!(expr.expression, "45 * 1000");
        assert_eq!(expr.comment.as_deref(), Some("45 seconds"));
    }

    #[test]
    fn numbers_and_special_values_pass_through() {
        assert_eq!(
            parse_duration(&DurationLiteral::Number(5000.0)).unwrap().expression,
            "5000"
        );
        assert_eq!(parse_duration(&text("300")).unwrap().expression, "300");
        assert_eq!(parse_duration(&text("Infinity")).unwrap().expression, "Infinity");
        assert_eq!(parse_duration(&text("static")).unwrap().expression, "'static'");
    }

    #[test]
    fn unrecognised_values_are_ignored() {
        assert_eq!(parse_duration(&text("")), None);
        assert_eq!(parse_duration(&text("soon")), None);
        assert_eq!(parse_duration(&text("1d")), None);
        assert_eq!(parse_duration(&text("h30")), None);
        assert_eq!(parse_duration(&text("1h30")), None);
        assert_eq!(parse_duration(&DurationLiteral::Number(f64::NAN)), None);
    }
}
