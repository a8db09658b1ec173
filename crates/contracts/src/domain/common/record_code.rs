/// Следующий свободный код записи в коллекции
///
/// Берётся максимальный числовой суффикс среди кодов с данным префиксом,
/// поэтому удаление записей не приводит к повторной выдаче кода.
///
/// # Пример
/// ```
/// use contracts::domain::common::next_code;
/// assert_eq!(next_code("SUP-", 3, ["SUP-001", "SUP-004"]), "SUP-005");
/// ```
pub fn next_code<'a, I>(prefix: &str, width: usize, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let next = existing
        .into_iter()
        .filter_map(|code| code.strip_prefix(prefix))
        .filter_map(|digits| digits.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1;
    format!("{}{:0width$}", prefix, next, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_code_empty_collection() {
        assert_eq!(next_code("P", 3, Vec::<&str>::new()), "P001");
    }

    #[test]
    fn test_next_code_skips_gaps_and_foreign_prefixes() {
        let ids = ["LOG001", "LOG007", "INV010", "LOGxyz"];
        assert_eq!(next_code("LOG", 3, ids), "LOG008");
    }

    #[test]
    fn test_next_code_grows_past_width() {
        assert_eq!(next_code("P", 3, ["P999"]), "P1000");
    }
}
