//! The [`record!`](crate::record) macro.

/// Declares a destination record type and generates its field-accessor table.
///
/// The struct is emitted unchanged (attributes, visibility and field
/// attributes are passed through). On top of it the macro implements
/// [`Reflect`](crate::shape::Reflect), [`Record`](crate::shape::Record) and
/// [`Slot`](crate::shape::Slot), so the type can be a conversion target and
/// can also be embedded directly as a nested field of another record.
///
/// Destination paths use the Rust field names. Every field type must
/// implement [`Slot`](crate::shape::Slot) and the struct must implement
/// [`Default`], which provides the zero-valued instance conversions start from.
///
/// # Examples
///
/// ```rust
/// use datamap::record;
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Contact {
///         pub name: String,
///         pub numbers: Vec<i64>,
///     }
/// }
///
/// let contact = Contact::default();
/// assert!(contact.numbers.is_empty());
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::shape::Reflect for $name {
            fn type_name(&self) -> &'static str {
                stringify!($name)
            }

            #[allow(unused_variables)]
            fn slot_mut(&mut self, field: &str) -> Option<&mut dyn $crate::shape::Slot> {
                $(
                    if field == stringify!($field) {
                        return Some(&mut self.$field as &mut dyn $crate::shape::Slot);
                    }
                )*
                None
            }

            #[allow(unused_variables)]
            fn slot(&self, field: &str) -> Option<&dyn $crate::shape::Slot> {
                $(
                    if field == stringify!($field) {
                        return Some(&self.$field as &dyn $crate::shape::Slot);
                    }
                )*
                None
            }
        }

        impl $crate::shape::Record for $name {
            fn shape() -> &'static $crate::shape::Shape {
                const FIELDS: &[$crate::shape::FieldDef] = &[
                    $(
                        $crate::shape::FieldDef::new(
                            stringify!($field),
                            <$ty as $crate::shape::Slot>::nested_shape,
                        ),
                    )*
                ];
                static SHAPE: $crate::shape::Shape =
                    $crate::shape::Shape::record(stringify!($name), FIELDS);
                &SHAPE
            }
        }

        impl $crate::shape::Slot for $name {
            fn nested_shape() -> Option<&'static $crate::shape::Shape> {
                Some(<$name as $crate::shape::Record>::shape())
            }

            fn slot_type(&self) -> &'static str {
                stringify!($name)
            }

            fn assign(
                &mut self,
                value: $crate::catalog::TypedValue,
            ) -> ::core::result::Result<(), $crate::shape::ShapeError> {
                Err($crate::shape::ShapeError::NotAValue {
                    expected: stringify!($name),
                    found: value.value_type(),
                })
            }

            fn materialize(&mut self) -> Option<&mut dyn $crate::shape::Reflect> {
                Some(self as &mut dyn $crate::shape::Reflect)
            }

            fn as_reflect(&self) -> Option<&dyn $crate::shape::Reflect> {
                Some(self as &dyn $crate::shape::Reflect)
            }
        }
    };
}
