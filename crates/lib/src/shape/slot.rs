//! [`Slot`] implementations for the supported field types.

use chrono::{DateTime, Utc};

use super::{Record, Reflect, Shape, ShapeError, Slot};
use crate::catalog::TypedValue;

macro_rules! value_slots {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Slot for $ty {
                fn slot_type(&self) -> &'static str {
                    stringify!($ty)
                }

                fn assign(&mut self, value: TypedValue) -> Result<(), ShapeError> {
                    match value {
                        TypedValue::$variant(inner) => {
                            *self = inner;
                            Ok(())
                        }
                        other => Err(ShapeError::TypeMismatch {
                            expected: stringify!($ty),
                            found: other.value_type(),
                        }),
                    }
                }

                fn read(&self) -> Option<TypedValue> {
                    Some(TypedValue::$variant(self.clone()))
                }
            }
        )*
    };
}

value_slots! {
    bool => Bool,
    Box<[bool]> => BoolArray,
    Vec<bool> => BoolList,
    DateTime<Utc> => DateTime,
    Box<[DateTime<Utc>]> => DateTimeArray,
    Vec<DateTime<Utc>> => DateTimeList,
    i64 => Int,
    Box<[i64]> => IntArray,
    Vec<i64> => IntList,
    String => String,
    Box<[String]> => StringArray,
    Vec<String> => StringList,
}

impl Slot for i32 {
    fn slot_type(&self) -> &'static str {
        "i32"
    }

    fn assign(&mut self, value: TypedValue) -> Result<(), ShapeError> {
        match value {
            TypedValue::Int(wide) => {
                *self = i32::try_from(wide).map_err(|_| ShapeError::OutOfRange {
                    expected: "i32",
                    value: wide,
                })?;
                Ok(())
            }
            other => Err(ShapeError::TypeMismatch {
                expected: "i32",
                found: other.value_type(),
            }),
        }
    }

    fn read(&self) -> Option<TypedValue> {
        Some(TypedValue::Int(i64::from(*self)))
    }
}

/// Lazily materialized nested record: `None` until a descendant is written.
impl<R: Record> Slot for Option<R> {
    fn nested_shape() -> Option<&'static Shape> {
        Some(R::shape())
    }

    fn slot_type(&self) -> &'static str {
        std::any::type_name::<R>()
    }

    fn assign(&mut self, value: TypedValue) -> Result<(), ShapeError> {
        Err(ShapeError::NotAValue {
            expected: std::any::type_name::<R>(),
            found: value.value_type(),
        })
    }

    fn materialize(&mut self) -> Option<&mut dyn Reflect> {
        Some(self.get_or_insert_with(R::default) as &mut dyn Reflect)
    }

    fn as_reflect(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|record| record as &dyn Reflect)
    }
}
