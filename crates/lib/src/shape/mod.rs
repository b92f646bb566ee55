//! Destination shapes and field access.
//!
//! Rust has no runtime reflection, so the conversion engine works through an
//! explicit metadata interface instead:
//!
//! - [`Shape`] / [`FieldDef`] describe a destination type statically: its
//!   declared fields and, for nested records, their shapes. Rule sets are
//!   validated against this description before any conversion runs.
//! - [`Reflect`] gives named, dynamic access to the fields of a live instance.
//! - [`Slot`] is implemented by every supported field type and knows how to
//!   accept a [`TypedValue`], or, for nested records, how to materialize itself.
//! - [`Record`] ties the three together and adds a zero-valued constructor
//!   (through [`Default`]).
//!
//! Implementations are generated by the [`record!`](crate::record) macro:
//!
//! ```
//! use datamap::{record, shape::{Record, FieldPath}};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Inner {
//!         pub label: String,
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Outer {
//!         pub count: i64,
//!         pub inner: Option<Inner>,
//!     }
//! }
//!
//! let shape = Outer::shape();
//! assert!(shape.resolve(&FieldPath::parse("inner.label")?).is_ok());
//! assert!(shape.resolve(&FieldPath::parse("count.label")?).is_err());
//! # Ok::<(), datamap::shape::ShapeError>(())
//! ```

use std::fmt;

use crate::catalog::TypedValue;

pub mod errors;
mod macros;
pub mod path;
mod slot;

pub use errors::ShapeError;
pub use path::FieldPath;

/// Static description of a destination type.
#[derive(Debug)]
pub struct Shape {
    name: &'static str,
    kind: ShapeKind,
}

#[derive(Debug)]
enum ShapeKind {
    Record(&'static [FieldDef]),
    Collection,
}

/// One declared field of a record shape.
#[derive(Clone, Copy)]
pub struct FieldDef {
    name: &'static str,
    nested: fn() -> Option<&'static Shape>,
}

impl FieldDef {
    /// Declares a field. `nested` returns the field type's shape when it is a record.
    pub const fn new(name: &'static str, nested: fn() -> Option<&'static Shape>) -> Self {
        Self { name, nested }
    }

    /// Returns the declared field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the shape of the field's type if it is a nested record or collection
    pub fn nested(&self) -> Option<&'static Shape> {
        (self.nested)()
    }
}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("nested", &self.nested().map(Shape::name))
            .finish()
    }
}

impl Shape {
    /// Describes a record type with the given fields
    pub const fn record(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self {
            name,
            kind: ShapeKind::Record(fields),
        }
    }

    /// Describes a bare collection type
    pub const fn collection(name: &'static str) -> Self {
        Self {
            name,
            kind: ShapeKind::Collection,
        }
    }

    /// Returns the type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this shape is a bare collection rather than a record
    pub fn is_collection(&self) -> bool {
        matches!(self.kind, ShapeKind::Collection)
    }

    /// Returns the declared fields (empty for collections)
    pub fn fields(&self) -> &'static [FieldDef] {
        match self.kind {
            ShapeKind::Record(fields) => fields,
            ShapeKind::Collection => &[],
        }
    }

    /// Looks up a declared field by name
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// Walks a destination path through this shape, one segment at a time.
    ///
    /// Every segment but the last must name a nested record field; the last
    /// must name any declared field. This is exactly the walk
    /// [`assign`](crate::assign::assign) performs on an instance, so a path that
    /// resolves here cannot fail to resolve during assignment.
    pub fn resolve(&'static self, path: &FieldPath) -> Result<&'static FieldDef, ShapeError> {
        let mut current = self;
        for segment in path.parents() {
            let field = current.lookup(segment)?;
            current = match field.nested() {
                Some(nested) if !nested.is_collection() => nested,
                _ => {
                    return Err(ShapeError::NotARecord {
                        owner: current.name,
                        field: segment.to_string(),
                    });
                }
            };
        }
        current.lookup(path.leaf())
    }

    fn lookup(&self, field: &str) -> Result<&'static FieldDef, ShapeError> {
        self.field(field).ok_or_else(|| ShapeError::UnknownField {
            owner: self.name,
            field: field.to_string(),
        })
    }
}

/// Named, dynamic field access on a live instance.
pub trait Reflect {
    /// Returns the name of the concrete type
    fn type_name(&self) -> &'static str;

    /// Returns the field with the given name for writing
    fn slot_mut(&mut self, field: &str) -> Option<&mut dyn Slot>;

    /// Returns the field with the given name for reading
    fn slot(&self, field: &str) -> Option<&dyn Slot>;
}

/// A destination type: reflectable, statically described, zero-constructible.
pub trait Record: Reflect + Default + 'static {
    /// Returns the static shape of this type
    fn shape() -> &'static Shape;
}

/// A field type that can live inside a [`Record`].
pub trait Slot {
    /// Shape of this type when it is a nested record (or a collection of them)
    fn nested_shape() -> Option<&'static Shape>
    where
        Self: Sized,
    {
        None
    }

    /// Returns the name of the runtime type held in this slot
    fn slot_type(&self) -> &'static str;

    /// Overwrites the slot with a coerced value
    fn assign(&mut self, value: TypedValue) -> Result<(), ShapeError>;

    /// Reads the slot back as a typed value; `None` for record slots
    fn read(&self) -> Option<TypedValue> {
        None
    }

    /// For record slots: allocates a zero-valued instance if absent and returns it
    fn materialize(&mut self) -> Option<&mut dyn Reflect> {
        None
    }

    /// For record slots: returns the instance if present
    fn as_reflect(&self) -> Option<&dyn Reflect> {
        None
    }
}

/// Shape shared by every bare-collection destination type.
static COLLECTION_SHAPE: Shape = Shape::collection("collection");

impl<R: 'static> Reflect for Vec<R> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn slot_mut(&mut self, _field: &str) -> Option<&mut dyn Slot> {
        None
    }

    fn slot(&self, _field: &str) -> Option<&dyn Slot> {
        None
    }
}

impl<R: 'static> Record for Vec<R> {
    fn shape() -> &'static Shape {
        &COLLECTION_SHAPE
    }
}

impl<R: 'static> Reflect for Box<[R]> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn slot_mut(&mut self, _field: &str) -> Option<&mut dyn Slot> {
        None
    }

    fn slot(&self, _field: &str) -> Option<&dyn Slot> {
        None
    }
}

impl<R: 'static> Record for Box<[R]> {
    fn shape() -> &'static Shape {
        &COLLECTION_SHAPE
    }
}
