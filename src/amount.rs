use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};
use std::fmt;

const NUM_DIGITS: u32 = 4;
const SCALE: i64 = 10_i64.pow(NUM_DIGITS);
// i64::MAX has 19 digits.
const MAX_INT_DIGITS: i64 = 19;

/// Fixed-point monetary value with four fraction digits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(pub i64);

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid amount")]
pub struct ParseAmountError;

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_mul(self, quantity: u64) -> Option<Amount> {
        i64::try_from(quantity)
            .ok()
            .and_then(|q| self.0.checked_mul(q))
            .map(Amount)
    }
}

// Honors the precision flag (`{:.2}`), rounding half away from zero. Without
// one all four digits are written.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(NUM_DIGITS as usize);
        let digits = precision.min(NUM_DIGITS as usize) as u32;
        let step = 10_u64.pow(NUM_DIGITS - digits);
        let rounded = (self.0.unsigned_abs() + step / 2) / step;
        let unit = 10_u64.pow(digits);
        let sign = if self.0 < 0 && rounded != 0 { "-" } else { "" };
        if digits == 0 {
            return write!(f, "{}{}", sign, rounded);
        }
        write!(
            f,
            "{}{}.{:0width$}{}",
            sign,
            rounded / unit,
            rounded % unit,
            "0".repeat(precision - digits as usize),
            width = digits as usize
        )
    }
}

impl std::str::FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (mantissa, exponent) = match unsigned.split_once(|c: char| c == 'e' || c == 'E') {
            Some((m, e)) => (m, e.parse::<i32>().map_err(|_| ParseAmountError)?),
            None => (unsigned, 0),
        };
        let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int.is_empty() && frac.is_empty()) || !is_digits(int) || !is_digits(frac) {
            return Err(ParseAmountError);
        }

        // Shift the decimal point by the exponent. Leading zeros are dropped
        // first so the digit count bounds the shift.
        let digits = format!("{}{}", int, frac);
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(Amount::ZERO);
        }
        let point =
            int.len() as i64 - (digits.len() - significant.len()) as i64 + i64::from(exponent);
        if point > MAX_INT_DIGITS {
            return Err(ParseAmountError);
        }
        let (int, frac) = if point <= 0 {
            let zeros = (-point).min(NUM_DIGITS as i64 + 1) as usize;
            (String::new(), format!("{}{}", "0".repeat(zeros), significant))
        } else if point as usize >= significant.len() {
            let zeros = point as usize - significant.len();
            (format!("{}{}", significant, "0".repeat(zeros)), String::new())
        } else {
            let (int, frac) = significant.split_at(point as usize);
            (int.to_owned(), frac.to_owned())
        };

        // trim
        let frac = &frac[..frac.len().min(NUM_DIGITS as usize)];
        // pad
        let frac = format!("{:0<width$}", frac, width = NUM_DIGITS as usize);

        let int = if int.is_empty() {
            0
        } else {
            int.parse::<i64>().map_err(|_| ParseAmountError)?
        };
        let frac = frac.parse::<i64>().map_err(|_| ParseAmountError)?;
        let value = int
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac))
            .ok_or(ParseAmountError)?;
        Ok(Amount(if negative { -value } else { value }))
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        v.checked_mul(SCALE)
            .map(Amount)
            .ok_or_else(|| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(SCALE))
            .map(Amount)
            .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    // f64's Display never uses exponent notation, so the string route is exact
    // up to the fourth fraction digit.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        v.to_string()
            .parse()
            .map_err(|_| E::invalid_value(Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens, assert_de_tokens_error, Token};

    fn assert_parse(s: &str, a: i64) {
        assert_eq!(s.parse::<Amount>().unwrap(), Amount(a));
    }

    fn assert_string(a: i64, s: &str) {
        assert_eq!(Amount(a).to_string(), s)
    }

    #[test]
    fn amount_parse() {
        assert_parse("1", 10000);
        assert_parse("1.0", 10000);
        assert_parse("2.50", 25000);
        assert_parse(" 2.5 ", 25000);
        assert_parse(".5", 5000);
        assert_parse("1.", 10000);
        assert_parse("-1.25", -12500);
        assert_parse("+3", 30000);
        assert_parse("1.1234", 11234);
        assert_parse("1.12345", 11234);
        assert_eq!("1n".parse::<Amount>().unwrap_err(), ParseAmountError);
        assert_eq!("".parse::<Amount>().unwrap_err(), ParseAmountError);
        assert_eq!(".".parse::<Amount>().unwrap_err(), ParseAmountError);
        assert_eq!("1.2.3".parse::<Amount>().unwrap_err(), ParseAmountError);
        assert_parse("1e1", 100000);
        assert_parse("1E1", 100000);
        assert_parse("2.5e+3", 25_000_000);
        assert_parse("25e-1", 25000);
        assert_parse("-1.5e-2", -150);
        assert_parse("1e-5", 0);
        assert_parse("1e-999999", 0);
        assert_parse("0e99999", 0);
        assert_parse("007.50", 75000);
        assert_eq!("1e".parse::<Amount>().unwrap_err(), ParseAmountError);
        assert_eq!("e5".parse::<Amount>().unwrap_err(), ParseAmountError);
        assert_eq!("1e2.5".parse::<Amount>().unwrap_err(), ParseAmountError);
        assert_eq!("1e99".parse::<Amount>().unwrap_err(), ParseAmountError);
        assert_eq!("inf".parse::<Amount>().unwrap_err(), ParseAmountError);
        assert_eq!(
            "99999999999999999999".parse::<Amount>().unwrap_err(),
            ParseAmountError
        );
    }

    #[test]
    fn amount_to_string() {
        assert_string(0, "0.0000");
        assert_string(10, "0.0010");
        assert_string(10000, "1.0000");
        assert_string(-12500, "-1.2500");
    }

    #[test]
    fn amount_precision() {
        assert_eq!(format!("{:.2}", Amount(75000)), "7.50");
        assert_eq!(format!("{:.2}", Amount(12345)), "1.23");
        assert_eq!(format!("{:.2}", Amount(12350)), "1.24");
        assert_eq!(format!("{:.2}", Amount(-12350)), "-1.24");
        assert_eq!(format!("{:.2}", Amount(-10)), "0.00");
        assert_eq!(format!("{:.0}", Amount(15000)), "2");
        assert_eq!(format!("{:.6}", Amount(15000)), "1.500000");
    }

    #[test]
    fn amount_arithmetic() {
        assert_eq!(Amount(25000).checked_mul(3), Some(Amount(75000)));
        assert_eq!(Amount(i64::MAX).checked_mul(2), None);
        assert_eq!(Amount(1).checked_mul(u64::MAX), None);
        assert_eq!(Amount(1).checked_add(Amount(2)), Some(Amount(3)));
        assert_eq!(Amount(i64::MAX).checked_add(Amount(1)), None);
        assert!(Amount(-1).is_negative());
        assert!(!Amount::ZERO.is_negative());
    }

    #[test]
    fn amount_deserialize() {
        assert_de_tokens(&Amount(25000), &[Token::Str("2.50")]);
        assert_de_tokens(&Amount(25000), &[Token::F64(2.5)]);
        assert_de_tokens(&Amount(1000), &[Token::F64(0.1)]);
        assert_de_tokens(&Amount(30000), &[Token::U64(3)]);
        assert_de_tokens(&Amount(-30000), &[Token::I64(-3)]);
        assert_de_tokens_error::<Amount>(
            &[Token::Str("abc")],
            "invalid value: string \"abc\", expected a decimal number or numeric string",
        );
        assert_de_tokens_error::<Amount>(
            &[Token::Bool(true)],
            "invalid type: boolean `true`, expected a decimal number or numeric string",
        );
    }
}
