use serde::{Deserialize, Serialize};
use std::fmt;

/// Закрытое перечисление статусов записи
///
/// Порядок `ALL` совпадает с порядком плиток сводки в UI.
pub trait StatusEnum: Copy + Eq + fmt::Debug + fmt::Display + 'static {
    /// Имя перечисления для сообщений об ошибках
    const KIND: &'static str;

    /// Все значения в порядке объявления
    const ALL: &'static [Self];

    /// Отображаемое (и сериализуемое) значение статуса
    fn label(&self) -> &'static str;

    /// Точное сопоставление по метке, без учёта регистра не выполняется
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.label() == label)
    }

    /// Позиция статуса в `ALL`
    fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

/// Неизвестное значение статуса на границе API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownStatus {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Объявление перечисления статусов с метками для UI и сериализации
///
/// Генерирует `Serialize`/`Deserialize` по меткам, `Display`, `FromStr`
/// и реализацию [`StatusEnum`].
#[macro_export]
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $crate::domain::common::StatusEnum for $name {
            const KIND: &'static str = stringify!($name);
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::domain::common::StatusEnum::label(self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::common::UnknownStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as $crate::domain::common::StatusEnum>::from_label(s).ok_or_else(|| {
                    $crate::domain::common::UnknownStatus::new(
                        <$name as $crate::domain::common::StatusEnum>::KIND,
                        s,
                    )
                })
            }
        }
    };
}

/// Фильтр списка по статусу: сентинел "All" или точное значение
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl<S: StatusEnum> StatusFilter<S> {
    /// Метка сентинела в UI и query-параметрах
    pub const ALL_LABEL: &'static str = "All";

    /// Разбор значения из query-параметра (пустая строка = "All")
    pub fn parse(raw: &str) -> Result<Self, UnknownStatus> {
        if raw.is_empty() || raw == Self::ALL_LABEL {
            return Ok(StatusFilter::All);
        }
        S::from_label(raw)
            .map(StatusFilter::Only)
            .ok_or_else(|| UnknownStatus::new(S::KIND, raw))
    }

    /// Разбор необязательного query-параметра
    pub fn parse_opt(raw: Option<&str>) -> Result<Self, UnknownStatus> {
        raw.map(Self::parse).unwrap_or(Ok(StatusFilter::All))
    }

    pub fn matches(&self, status: S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => *expected == status,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => Self::ALL_LABEL,
            StatusFilter::Only(status) => status.label(),
        }
    }
}

/// Тело запроса смены статуса: `{ "status": "..." }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusChange<S> {
    pub status: S,
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::status_enum! {
        enum Light {
            Green => "Green",
            Amber => "Amber Light",
        }
    }

    #[test]
    fn test_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Light::Amber).unwrap();
        assert_eq!(json, "\"Amber Light\"");
        let back: Light = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Light::Amber);
        assert!(serde_json::from_str::<Light>("\"amber light\"").is_err());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(StatusFilter::<Light>::parse("All").unwrap(), StatusFilter::All);
        assert_eq!(StatusFilter::<Light>::parse("").unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::<Light>::parse("Green").unwrap(),
            StatusFilter::Only(Light::Green)
        );
        let err = StatusFilter::<Light>::parse("Blue").unwrap_err();
        assert_eq!(err.kind, "Light");
        assert_eq!(err.value, "Blue");

        let err = StatusFilter::<Light>::parse(" Green ").unwrap_err();
        assert_eq!(err.value, " Green ");
    }

    #[test]
    fn test_filter_matches_exact_status_only() {
        let filter = StatusFilter::Only(Light::Green);
        assert!(filter.matches(Light::Green));
        assert!(!filter.matches(Light::Amber));
        assert!(StatusFilter::<Light>::All.matches(Light::Amber));
    }

    #[test]
    fn test_from_str_and_ordinal() {
        assert_eq!("Amber Light".parse::<Light>().unwrap(), Light::Amber);
        assert!("Red".parse::<Light>().is_err());
        assert_eq!(Light::Amber.ordinal(), 1);
    }

    #[test]
    fn test_status_change_rejects_unknown_fields() {
        let ok: StatusChange<Light> = serde_json::from_str(r#"{"status":"Green"}"#).unwrap();
        assert_eq!(ok.status, Light::Green);
        assert!(
            serde_json::from_str::<StatusChange<Light>>(r#"{"status":"Green","id":"x"}"#).is_err()
        );
    }
}
