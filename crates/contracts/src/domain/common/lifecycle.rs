use serde::{Deserialize, Serialize};

use super::StatusEnum;

/// Жизненный цикл записи: таблица допустимых переходов статуса
pub trait Lifecycle: StatusEnum {
    /// Статусы, в которые можно перейти из текущего
    fn successors(&self) -> &'static [Self];

    /// Переход в тот же статус всегда допустим (идемпотентность)
    fn can_transition_to(&self, next: Self) -> bool {
        *self == next || self.successors().contains(&next)
    }

    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

/// Недопустимый переход статуса
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: transition {from} -> {to} is not allowed")]
pub struct TransitionError {
    pub kind: &'static str,
    pub from: String,
    pub to: String,
}

/// Политика проверки переходов на уровне данных
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Недопустимый переход отклоняется
    #[default]
    Enforce,
    /// Недопустимый переход применяется (с предупреждением в логе)
    Permissive,
}

/// Проверка перехода по таблице жизненного цикла
pub fn check_transition<S: Lifecycle>(from: S, to: S) -> Result<(), TransitionError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(TransitionError {
            kind: S::KIND,
            from: from.label().to_string(),
            to: to.label().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::status_enum! {
        enum Door {
            Closed => "Closed",
            Open => "Open",
            Broken => "Broken",
        }
    }

    impl Lifecycle for Door {
        fn successors(&self) -> &'static [Self] {
            match self {
                Door::Closed => &[Door::Open],
                Door::Open => &[Door::Closed, Door::Broken],
                Door::Broken => &[],
            }
        }
    }

    #[test]
    fn test_check_transition() {
        assert!(check_transition(Door::Closed, Door::Open).is_ok());
        assert!(check_transition(Door::Broken, Door::Broken).is_ok());

        let err = check_transition(Door::Closed, Door::Broken).unwrap_err();
        assert_eq!(err.kind, "Door");
        assert_eq!(err.to_string(), "Door: transition Closed -> Broken is not allowed");
    }

    #[test]
    fn test_terminal() {
        assert!(Door::Broken.is_terminal());
        assert!(!Door::Open.is_terminal());
    }

    #[test]
    fn test_policy_parses_lowercase() {
        let policy: TransitionPolicy = serde_json::from_str("\"permissive\"").unwrap();
        assert_eq!(policy, TransitionPolicy::Permissive);
        assert_eq!(TransitionPolicy::default(), TransitionPolicy::Enforce);
    }
}
