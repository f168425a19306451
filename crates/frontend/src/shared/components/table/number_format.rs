//! Форматирование чисел для ячеек таблиц биллинга
//!
//! Суммы приходят строками для отображения ("$12.5", "-3", "12.30") и
//! приводятся к двум знакам после запятой с сохранением префикса валюты.

/// Позиция, с которой начинается числовая часть `text`
///
/// Берётся первая ASCII-цифра; если цифр нет, вся строка считается
/// префиксом, поэтому для `"abc"` это 3.
pub fn number_start_index(text: &str) -> usize {
    text.char_indices()
        .find(|(_, c)| c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Оставляет `text[..start]` как есть, остаток печатает с двумя знаками
///
/// Остаток, который не начинается с числа, печатается как `NaN`:
/// `("abc", 3)` даёт `"abcNaN"`.
pub fn to_two_decimal_places(text: &str, start: usize) -> String {
    let start = start.min(text.len());
    let (prefix, rest) = text.split_at(start);
    format!("{}{}", prefix, to_fixed(parse_float_prefix(rest), 2))
}

/// Сумма строкой с двумя знаками после запятой
///
/// # Примеры
///
/// ```
/// use frontend::shared::components::table::format_two_decimals;
///
/// assert_eq!(format_two_decimals("$5"), "$5.00");
/// assert_eq!(format_two_decimals("12.3"), "12.30");
/// ```
pub fn format_two_decimals(text: &str) -> String {
    to_two_decimal_places(text, number_start_index(text))
}

/// Самый длинный числовой префикс `text` как float, NaN если его нет
///
/// Начальные пробелы пропускаются, хвост после числа игнорируется
/// (`"1,234.50"` читается как 1).
pub fn parse_float_prefix(text: &str) -> f64 {
    let s = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Вывод с фиксированной точкой, половины округляются от нуля
///
/// NaN печатается как `NaN`, бесконечности как `Infinity`/`-Infinity`,
/// отрицательный ноль как обычный ноль (малые отрицательные сохраняют знак:
/// `-0.00`), модули от 1e21 в экспоненциальной записи.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() >= 1e21 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }

    // Точное разложение далеко за разрядом округления; double на этом
    // масштабе не бывает ближе 1e-25 к десятичной половине.
    let exact = format!("{:.*}", decimals + 40, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .map(|b| b - b'0')
        .collect();
    let round_up = frac_part
        .as_bytes()
        .get(decimals)
        .map(|b| *b >= b'5')
        .unwrap_or(false);

    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - decimals;
    let to_str = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let mut result = String::new();
    if value < 0.0 {
        result.push('-');
    }
    result.push_str(&to_str(&digits[..split]));
    if decimals > 0 {
        result.push('.');
        result.push_str(&to_str(&digits[split..]));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_two_decimals() {
        assert_eq!(format_two_decimals("$5"), "$5.00");
        assert_eq!(format_two_decimals("12.3"), "12.30");
        assert_eq!(format_two_decimals("-$45.678"), "-$45.68");
        assert_eq!(format_two_decimals("0"), "0.00");
    }

    #[test]
    fn test_non_numeric_input_keeps_nan_suffix() {
        assert_eq!(format_two_decimals("abc"), "abcNaN");
        assert_eq!(format_two_decimals(""), "NaN");
        assert_eq!(format_two_decimals("$"), "$NaN");
    }

    #[test]
    fn test_number_start_index() {
        assert_eq!(number_start_index("$5"), 1);
        assert_eq!(number_start_index("12.3"), 0);
        assert_eq!(number_start_index("abc"), 3);
        assert_eq!(number_start_index(""), 0);
        assert_eq!(number_start_index("-$.5"), 3);
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(format_two_decimals("$1,234.50"), "$1.00");
        assert_eq!(format_two_decimals("$7.5 CR"), "$7.50");
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("  42.5xyz"), 42.5);
        assert_eq!(parse_float_prefix("-3"), -3.0);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("5."), 5.0);
        assert_eq!(parse_float_prefix("1e3"), 1000.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
        assert_eq!(parse_float_prefix("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float_prefix(".").is_nan());
        assert!(parse_float_prefix("-").is_nan());
    }

    #[test]
    fn test_to_fixed_rounding() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(-0.125, 2), "-0.13");
        // 1.005 хранится чуть меньше половины
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(9.999, 2), "10.00");
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(-0.0, 2), "0.00");
        assert_eq!(to_fixed(1234567.891, 2), "1234567.89");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(to_fixed(1e21, 2), "1e+21");
    }
}
