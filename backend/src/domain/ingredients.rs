//! Ingredient amount scaling.
//!
//! Amounts are free text typed by people ("1 1/2 cups", "2-3 cloves", "½
//! tsp"). [`scale_amount`] rewrites only the leading quantity and keeps the
//! rest of the text verbatim.

use super::validation::FieldViolation;

const FRACTION_TOLERANCE: f64 = 0.02;

const COMMON_FRACTIONS: [(f64, &str); 5] = [
    (0.25, "1/4"),
    (1.0 / 3.0, "1/3"),
    (0.5, "1/2"),
    (2.0 / 3.0, "2/3"),
    (0.75, "3/4"),
];

fn vulgar_fraction(c: char) -> Option<f64> {
    let value = match c {
        '¼' => 0.25,
        '½' => 0.5,
        '¾' => 0.75,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '⅕' => 0.2,
        '⅛' => 0.125,
        '⅜' => 0.375,
        '⅝' => 0.625,
        '⅞' => 0.875,
        _ => return None,
    };
    Some(value)
}

/// Byte-offset cursor over the amount text.
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.bump();
        }
    }

    fn digits(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        (self.pos > start).then(|| &self.text[start..self.pos])
    }

    /// `numerator/denominator` at the cursor; restores the position on failure.
    fn fraction(&mut self) -> Option<f64> {
        let start = self.pos;
        let parsed = self.fraction_parts();
        if parsed.is_none() {
            self.pos = start;
        }
        parsed
    }

    fn fraction_parts(&mut self) -> Option<f64> {
        let numerator: f64 = self.digits()?.parse().ok()?;
        if self.peek() != Some('/') {
            return None;
        }
        self.bump();
        let denominator: f64 = self.digits()?.parse().ok()?;
        (denominator != 0.0).then(|| numerator / denominator)
    }

    /// A single quantity: number, decimal, fraction, mixed or vulgar fraction.
    fn quantity(&mut self) -> Option<f64> {
        if let Some(value) = self.peek().and_then(vulgar_fraction) {
            self.bump();
            return Some(value);
        }
        if let Some(value) = self.fraction() {
            return Some(value);
        }

        let start = self.pos;
        let whole = self.digits()?;
        if self.peek() == Some('.') {
            let dot = self.pos;
            self.bump();
            if self.digits().is_none() {
                self.pos = dot;
            }
            return self.text[start..self.pos].parse().ok();
        }
        if self.peek() == Some('/') {
            return None;
        }
        let whole: f64 = whole.parse().ok()?;

        if let Some(part) = self.peek().and_then(vulgar_fraction) {
            self.bump();
            return Some(whole + part);
        }
        let before_space = self.pos;
        self.skip_spaces();
        if let Some(part) = self.peek().and_then(vulgar_fraction) {
            self.bump();
            return Some(whole + part);
        }
        if self.pos > before_space {
            if let Some(part) = self.fraction().filter(|part| *part < 1.0) {
                return Some(whole + part);
            }
        }
        self.pos = before_space;
        Some(whole)
    }

    /// A range separator (`-` or `–`) with optional surrounding spaces.
    fn range_separator(&mut self) -> Option<&'a str> {
        let start = self.pos;
        self.skip_spaces();
        if matches!(self.peek(), Some('-' | '–')) {
            self.bump();
            self.skip_spaces();
            return Some(&self.text[start..self.pos]);
        }
        self.pos = start;
        None
    }
}

/// Render a scaled quantity for display.
///
/// Whole values lose their decimals, values near a common fraction render as
/// that fraction, everything else keeps at most two decimals. A positive
/// amount never renders as zero; the smallest shown is `0.01`.
pub fn format_quantity(value: f64) -> String {
    let whole = value.trunc();
    let fraction = value - whole;
    if fraction < FRACTION_TOLERANCE && (whole >= 1.0 || fraction == 0.0) {
        return format!("{whole:.0}");
    }
    if 1.0 - fraction < FRACTION_TOLERANCE {
        return format!("{:.0}", whole + 1.0);
    }
    if let Some((_, label)) = COMMON_FRACTIONS
        .iter()
        .find(|(target, _)| (fraction - target).abs() <= FRACTION_TOLERANCE)
    {
        return if whole >= 1.0 {
            format!("{whole:.0} {label}")
        } else {
            (*label).to_owned()
        };
    }
    let rendered = format!("{:.2}", value.max(0.01));
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

/// Multiply the leading quantity of `text` by `multiplier`.
///
/// Text without a recognised quantity, and any text scaled by exactly 1.0,
/// is returned unchanged.
///
/// # Examples
/// ```
/// use wellf::domain::scale_amount;
///
/// assert_eq!(scale_amount("1 1/2 cups flour", 2.0), "3 cups flour");
/// assert_eq!(scale_amount("2-3 cloves", 2.0), "4-6 cloves");
/// assert_eq!(scale_amount("a pinch of salt", 3.0), "a pinch of salt");
/// ```
pub fn scale_amount(text: &str, multiplier: f64) -> String {
    if multiplier == 1.0 || !multiplier.is_finite() {
        return text.to_owned();
    }
    let leading = text.len() - text.trim_start().len();
    let mut cursor = Cursor::new(text);
    cursor.pos = leading;

    let Some(low) = cursor.quantity() else {
        return text.to_owned();
    };
    let low_end = cursor.pos;
    let range = cursor
        .range_separator()
        .and_then(|separator| cursor.quantity().map(|high| (separator, high)));

    let mut scaled = String::with_capacity(text.len());
    scaled.push_str(&text[..leading]);
    scaled.push_str(&format_quantity(low * multiplier));
    match range {
        Some((separator, high)) => {
            scaled.push_str(separator);
            scaled.push_str(&format_quantity(high * multiplier));
            scaled.push_str(cursor.rest());
        }
        None => scaled.push_str(&text[low_end..]),
    }
    scaled
}

/// Ratio between requested and original servings.
pub fn servings_multiplier(original: i32, target: i32) -> Result<f64, FieldViolation> {
    if original <= 0 {
        return Err(FieldViolation::new(
            "servings",
            "invalid",
            "recipe servings must be positive",
        ));
    }
    if target <= 0 {
        return Err(FieldViolation::new(
            "servings",
            "invalid",
            "servings must be positive",
        ));
    }
    Ok(f64::from(target) / f64::from(original))
}
