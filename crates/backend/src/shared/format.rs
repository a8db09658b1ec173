fn group_digits(digits: &str, separator: char) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    group_digits(&n.to_string(), '.')
}

/// Сумма в песо для виджетов: "₱75,000"
pub fn format_peso(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{}₱{}", sign, group_digits(&digits, ','))
}

/// Изменение к прошлому периоду: "+12.5%", "-3.0%", "0.0%"
pub fn format_change(current: f64, previous: f64) -> String {
    let percent = if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    };
    let percent = (percent * 10.0).round() / 10.0;
    if percent > 0.0 {
        format!("+{:.1}%", percent)
    } else if percent < 0.0 {
        format!("{:.1}%", percent)
    } else {
        "0.0%".to_string()
    }
}
