use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{EnumIter, IntoEnumIterator};

/// The number of units a course is worth
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum UnitCount {
    #[default]
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl UnitCount {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn all() -> Vec<UnitCount> {
        UnitCount::iter().collect()
    }
}

impl TryFrom<u8> for UnitCount {
    type Error = ValidationError;

    fn try_from(units: u8) -> Result<Self, Self::Error> {
        UnitCount::iter()
            .find(|unit_count| unit_count.value() == units)
            .ok_or_else(|| ValidationError::InvalidChoice {
                field: "unit_count",
                value: units.to_string(),
            })
    }
}

impl From<UnitCount> for u8 {
    fn from(units: UnitCount) -> Self {
        units.value()
    }
}

impl Display for UnitCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.value())
    }
}

#[cfg(feature = "database")]
mod column {
    use super::UnitCount;
    use sea_orm::Value;

    impl sea_orm::sea_query::ValueType for UnitCount {
        fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
            match v {
                Value::SmallInt(Some(units)) => <u8 as TryFrom<i16>>::try_from(units)
                    .ok()
                    .and_then(|units| <UnitCount as TryFrom<u8>>::try_from(units).ok())
                    .ok_or(sea_orm::sea_query::ValueTypeErr),
                _ => Err(sea_orm::sea_query::ValueTypeErr),
            }
        }

        fn type_name() -> String {
            "UnitCount".to_string()
        }

        fn array_type() -> sea_orm::sea_query::ArrayType {
            sea_orm::sea_query::ArrayType::SmallInt
        }

        fn column_type() -> sea_orm::sea_query::ColumnType {
            sea_orm::sea_query::ColumnType::SmallInteger
        }
    }

    impl From<UnitCount> for Value {
        fn from(units: UnitCount) -> Self {
            Value::SmallInt(Some(i16::from(units.value())))
        }
    }

    impl sea_orm::TryGetable for UnitCount {
        fn try_get_by<I: sea_orm::ColIdx>(
            res: &sea_orm::QueryResult,
            index: I,
        ) -> Result<Self, sea_orm::TryGetError> {
            let val: i16 = res.try_get_by(index)?;

            <u8 as TryFrom<i16>>::try_from(val)
                .ok()
                .and_then(|units| <UnitCount as TryFrom<u8>>::try_from(units).ok())
                .ok_or_else(|| {
                    sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                        "Invalid unit count: {val}"
                    )))
                })
        }
    }

    impl sea_orm::sea_query::Nullable for UnitCount {
        fn null() -> Value {
            Value::SmallInt(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_count_choices() {
        assert_eq!(UnitCount::all().len(), 5);
        assert_eq!(UnitCount::Three.value(), 3);
        assert_eq!(UnitCount::default(), UnitCount::Zero);
    }

    #[test]
    fn test_unit_count_try_from() {
        assert_eq!(UnitCount::try_from(4).unwrap(), UnitCount::Four);
        assert_eq!(
            UnitCount::try_from(5),
            Err(ValidationError::InvalidChoice {
                field: "unit_count",
                value: "5".to_owned()
            })
        );
    }

    #[cfg(feature = "database")]
    #[test]
    fn test_unit_count_column_value() {
        use sea_orm::{Value, sea_query::ValueType};

        assert_eq!(
            <UnitCount as ValueType>::try_from(Value::SmallInt(Some(2))).ok(),
            Some(UnitCount::Two)
        );
        assert!(<UnitCount as ValueType>::try_from(Value::SmallInt(Some(7))).is_err());
        assert!(<UnitCount as ValueType>::try_from(Value::SmallInt(Some(-1))).is_err());
        assert_eq!(Value::from(UnitCount::Four), Value::SmallInt(Some(4)));
    }

    #[test]
    fn test_unit_count_ordering_and_display() {
        assert!(UnitCount::One < UnitCount::Two);
        assert_eq!(UnitCount::Two.to_string(), "2");
    }
}
