//! Typed field accessors.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::warn;

// ---------------------------------------------------------------------------
// FieldPath
// ---------------------------------------------------------------------------

/// Where a bound field lives in the data model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// A scalar field addressed by its exact name.
    Scalar(String),
    /// Field `field` of the `index`-th row of the repeated sequence.
    Row { field: String, index: usize },
    /// A field bound directly by the application, outside any schema.
    Detached(String),
}

impl FieldPath {
    /// Split `<field>_<index>` at the last underscore.
    ///
    /// Returns `None` when there is no underscore, the field part is empty,
    /// or the suffix is not a decimal index.
    pub fn split_indexed(path: &str) -> Option<(&str, usize)> {
        let (field, index) = path.rsplit_once('_')?;
        if field.is_empty() || index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some((field, index.parse().ok()?))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Scalar(name) | FieldPath::Detached(name) => f.write_str(name),
            FieldPath::Row { field, index } => write!(f, "{field}_{index}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

type Getter<V> = Rc<dyn Fn() -> Option<V>>;
type Setter<V> = Rc<dyn Fn(V) -> bool>;

/// A bound value of type `V` living somewhere in application data.
///
/// Reads return `None` and writes return `false` when the data is currently
/// borrowed elsewhere or the target no longer exists (e.g. the row was
/// removed). Neither case panics.
pub struct Field<V> {
    path: FieldPath,
    get: Getter<V>,
    set: Setter<V>,
}

impl<V: Clone + 'static> Field<V> {
    /// Project a field out of a shared record.
    ///
    /// `lens` receives the borrowed record and returns the slot to read or
    /// write, or `None` if the slot does not exist right now.
    pub fn project<R: 'static>(
        path: FieldPath,
        data: &Rc<RefCell<R>>,
        lens: impl Fn(&mut R) -> Option<&mut V> + 'static,
    ) -> Self {
        Self::from_lens(path, data.clone(), Rc::new(lens))
    }

    /// Bind to a standalone shared cell.
    pub fn from_cell(name: impl Into<String>, cell: &Rc<RefCell<V>>) -> Self {
        Self::project(FieldPath::Detached(name.into()), cell, |v: &mut V| Some(v))
    }

    pub(crate) fn from_lens<R: 'static>(
        path: FieldPath,
        data: Rc<RefCell<R>>,
        lens: Rc<dyn Fn(&mut R) -> Option<&mut V>>,
    ) -> Self {
        let (read_data, read_lens) = (data.clone(), lens.clone());
        let read_path = path.clone();
        let get: Getter<V> = Rc::new(move || match read_data.try_borrow_mut() {
            Ok(mut record) => read_lens(&mut *record).map(|v| v.clone()),
            Err(_) => {
                warn!(path = %read_path, "bound data busy, read skipped");
                None
            }
        });

        let write_path = path.clone();
        let set: Setter<V> = Rc::new(move |value: V| match data.try_borrow_mut() {
            Ok(mut record) => match lens(&mut *record) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
            Err(_) => {
                warn!(path = %write_path, "bound data busy, write ignored");
                false
            }
        });

        Self { path, get, set }
    }
}

impl<V> Field<V> {
    /// Where this field lives.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Read the current value.
    pub fn get(&self) -> Option<V> {
        (self.get)()
    }

    /// Write a new value. Returns true if the value was stored.
    pub fn set(&self, value: V) -> bool {
        (self.set)(value)
    }
}

impl<V> Clone for Field<V> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            get: self.get.clone(),
            set: self.set.clone(),
        }
    }
}

impl<V> fmt::Debug for Field<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.path).finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
