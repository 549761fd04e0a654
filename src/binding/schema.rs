//! Bindable-field declarations and string-path resolution.
//!
//! A [`Schema<R>`] lists the scalar fields of a record type `R` by name, plus
//! at most one repeated sequence of sub-records whose fields are addressed as
//! `<field>_<index>`. A [`Model<R>`] pairs a schema with the shared record and
//! implements [`Binder`], the interface the markup translator resolves `bind`
//! attributes through.
//!
//! ```ignore
//! let schema = Schema::<AppData>::new()
//!     .text("name", |d| &mut d.name)
//!     .flag("rust", |d| &mut d.rust)
//!     .rows(|d| &mut d.cities, Schema::<City>::new()
//!         .text("city_name", |c| &mut c.name)
//!         .float("city_lat", |c| &mut c.lat));
//! let model = Model::new(data, schema);
//! let lat = model.float("city_lat_1");
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use super::field::{Field, FieldPath};

type LensFn<R, V> = Rc<dyn Fn(&mut R) -> Option<&mut V>>;
type SeqFn<R, Row> = Rc<dyn Fn(&mut R) -> &mut Vec<Row>>;

fn lens<R, V>(f: impl Fn(&mut R) -> Option<&mut V> + 'static) -> LensFn<R, V> {
    Rc::new(f)
}

// ---------------------------------------------------------------------------
// Lens
// ---------------------------------------------------------------------------

/// A typed path into `R`, one variant per bindable value type.
enum Lens<R> {
    Text(LensFn<R, String>),
    Float(LensFn<R, f32>),
    Int(LensFn<R, i32>),
    Flag(LensFn<R, bool>),
}

impl<R> Clone for Lens<R> {
    fn clone(&self) -> Self {
        match self {
            Lens::Text(f) => Lens::Text(f.clone()),
            Lens::Float(f) => Lens::Float(f.clone()),
            Lens::Int(f) => Lens::Int(f.clone()),
            Lens::Flag(f) => Lens::Flag(f.clone()),
        }
    }
}

fn through_row<R: 'static, Row: 'static, V: 'static>(
    seq: SeqFn<R, Row>,
    field: LensFn<Row, V>,
    index: usize,
) -> LensFn<R, V> {
    lens(move |record: &mut R| seq(record).get_mut(index).and_then(|row| field(row)))
}

impl<Row: 'static> Lens<Row> {
    /// Re-root a row lens at the `index`-th element of the sequence in `R`.
    fn at_row<R: 'static>(&self, seq: &SeqFn<R, Row>, index: usize) -> Lens<R> {
        match self {
            Lens::Text(f) => Lens::Text(through_row(seq.clone(), f.clone(), index)),
            Lens::Float(f) => Lens::Float(through_row(seq.clone(), f.clone(), index)),
            Lens::Int(f) => Lens::Int(through_row(seq.clone(), f.clone(), index)),
            Lens::Flag(f) => Lens::Flag(through_row(seq.clone(), f.clone(), index)),
        }
    }
}

// ---------------------------------------------------------------------------
// Row sequences
// ---------------------------------------------------------------------------

/// Type-erased access to the repeated sequence of a schema.
trait RowAccess<R> {
    fn len(&self, record: &mut R) -> usize;
    fn field(&self, name: &str, index: usize) -> Option<Lens<R>>;
    fn field_names(&self) -> Vec<String>;
}

struct RowSet<R, Row> {
    seq: SeqFn<R, Row>,
    fields: HashMap<String, Lens<Row>>,
}

impl<R: 'static, Row: 'static> RowAccess<R> for RowSet<R, Row> {
    fn len(&self, record: &mut R) -> usize {
        (self.seq)(record).len()
    }

    fn field(&self, name: &str, index: usize) -> Option<Lens<R>> {
        self.fields.get(name).map(|l| l.at_row(&self.seq, index))
    }

    fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.fields.keys().cloned().collect();
        names.sort();
        names
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// The bindable fields of record type `R`.
pub struct Schema<R> {
    scalars: HashMap<String, Lens<R>>,
    rows: Option<Box<dyn RowAccess<R>>>,
}

impl<R: 'static> Schema<R> {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self {
            scalars: HashMap::new(),
            rows: None,
        }
    }

    /// Declare a text field.
    pub fn text(mut self, name: &str, f: impl Fn(&mut R) -> &mut String + 'static) -> Self {
        self.scalars
            .insert(name.to_string(), Lens::Text(lens(move |r: &mut R| Some(f(r)))));
        self
    }

    /// Declare a floating point field.
    pub fn float(mut self, name: &str, f: impl Fn(&mut R) -> &mut f32 + 'static) -> Self {
        self.scalars
            .insert(name.to_string(), Lens::Float(lens(move |r: &mut R| Some(f(r)))));
        self
    }

    /// Declare an integer field. Radio groups bind their selection to one.
    pub fn int(mut self, name: &str, f: impl Fn(&mut R) -> &mut i32 + 'static) -> Self {
        self.scalars
            .insert(name.to_string(), Lens::Int(lens(move |r: &mut R| Some(f(r)))));
        self
    }

    /// Declare a boolean field.
    pub fn flag(mut self, name: &str, f: impl Fn(&mut R) -> &mut bool + 'static) -> Self {
        self.scalars
            .insert(name.to_string(), Lens::Flag(lens(move |r: &mut R| Some(f(r)))));
        self
    }

    /// Declare the repeated sequence. The scalar fields of `fields` become
    /// addressable as `<name>_<index>`. Declaring a second sequence replaces
    /// the first; nested sequences inside `fields` are ignored.
    pub fn rows<Row: 'static>(
        mut self,
        seq: impl Fn(&mut R) -> &mut Vec<Row> + 'static,
        fields: Schema<Row>,
    ) -> Self {
        let seq: SeqFn<R, Row> = Rc::new(seq);
        self.rows = Some(Box::new(RowSet {
            seq,
            fields: fields.scalars,
        }));
        self
    }

    /// Names of every declared field; row fields are listed with a `_N` suffix.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scalars.keys().cloned().collect();
        names.sort();
        if let Some(rows) = &self.rows {
            names.extend(rows.field_names().into_iter().map(|n| format!("{n}_N")));
        }
        names
    }

    /// Resolve `path` against `record`: exact scalar name first, then
    /// `<field>_<index>` into the row sequence with `index < len`.
    fn lookup(&self, record: &mut R, path: &str) -> Option<(FieldPath, Lens<R>)> {
        if let Some(l) = self.scalars.get(path) {
            return Some((FieldPath::Scalar(path.to_string()), l.clone()));
        }
        let rows = self.rows.as_ref()?;
        let (field, index) = FieldPath::split_indexed(path)?;
        let len = rows.len(record);
        if index >= len {
            debug!(path, index, len, "binding index out of range");
            return None;
        }
        let lens = rows.field(field, index)?;
        Some((
            FieldPath::Row {
                field: field.to_string(),
                index,
            },
            lens,
        ))
    }
}

impl<R: 'static> Default for Schema<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("scalars", &self.scalars.len())
            .field("rows", &self.rows.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Binder
// ---------------------------------------------------------------------------

/// A resolved binding of any supported value type.
#[derive(Debug, Clone)]
pub enum BoundField {
    Text(Field<String>),
    Float(Field<f32>),
    Int(Field<i32>),
    Flag(Field<bool>),
}

impl BoundField {
    /// Where the field lives.
    pub fn path(&self) -> &FieldPath {
        match self {
            BoundField::Text(f) => f.path(),
            BoundField::Float(f) => f.path(),
            BoundField::Int(f) => f.path(),
            BoundField::Flag(f) => f.path(),
        }
    }

    /// Name of the bound value type.
    pub fn type_name(&self) -> &'static str {
        match self {
            BoundField::Text(_) => "text",
            BoundField::Float(_) => "float",
            BoundField::Int(_) => "int",
            BoundField::Flag(_) => "flag",
        }
    }
}

/// Resolves string binding paths to fields.
pub trait Binder {
    /// Resolve `path`, or `None` if it names nothing bindable right now.
    fn resolve(&self, path: &str) -> Option<BoundField>;
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// A shared record together with its schema.
pub struct Model<R> {
    data: Rc<RefCell<R>>,
    schema: Rc<Schema<R>>,
}

impl<R: 'static> Model<R> {
    pub fn new(data: Rc<RefCell<R>>, schema: Schema<R>) -> Self {
        Self {
            data,
            schema: Rc::new(schema),
        }
    }

    /// The shared record.
    pub fn data(&self) -> &Rc<RefCell<R>> {
        &self.data
    }

    pub fn schema(&self) -> &Schema<R> {
        &self.schema
    }

    /// Resolve a text field.
    pub fn text(&self, path: &str) -> Option<Field<String>> {
        match self.resolve(path)? {
            BoundField::Text(f) => Some(f),
            _ => None,
        }
    }

    /// Resolve a floating point field.
    pub fn float(&self, path: &str) -> Option<Field<f32>> {
        match self.resolve(path)? {
            BoundField::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Resolve an integer field.
    pub fn int(&self, path: &str) -> Option<Field<i32>> {
        match self.resolve(path)? {
            BoundField::Int(f) => Some(f),
            _ => None,
        }
    }

    /// Resolve a boolean field.
    pub fn flag(&self, path: &str) -> Option<Field<bool>> {
        match self.resolve(path)? {
            BoundField::Flag(f) => Some(f),
            _ => None,
        }
    }
}

impl<R: 'static> Binder for Model<R> {
    fn resolve(&self, path: &str) -> Option<BoundField> {
        let found = {
            let Ok(mut record) = self.data.try_borrow_mut() else {
                warn!(path, "bound data busy, binding not resolved");
                return None;
            };
            self.schema.lookup(&mut *record, path)
        };
        let Some((field_path, lens)) = found else {
            debug!(path, "binding not found");
            return None;
        };
        debug!(path, "binding resolved");
        let data = self.data.clone();
        Some(match lens {
            Lens::Text(l) => BoundField::Text(Field::from_lens(field_path, data, l)),
            Lens::Float(l) => BoundField::Float(Field::from_lens(field_path, data, l)),
            Lens::Int(l) => BoundField::Int(Field::from_lens(field_path, data, l)),
            Lens::Flag(l) => BoundField::Flag(Field::from_lens(field_path, data, l)),
        })
    }
}

impl<R> Clone for Model<R> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            schema: self.schema.clone(),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct City {
        name: String,
        lat: f32,
        pop: i32,
    }

    #[derive(Default)]
    struct Data {
        email: String,
        rust: bool,
        climate: i32,
        cities: Vec<City>,
    }

    fn model() -> Model<Data> {
        let data = Data {
            email: "a@b.c".into(),
            cities: vec![
                City {
                    name: "Lisbon".into(),
                    lat: 38.7,
                    pop: 545_000,
                },
                City {
                    name: "Oslo".into(),
                    lat: 59.9,
                    pop: 709_000,
                },
            ],
            ..Default::default()
        };
        let schema = Schema::<Data>::new()
            .text("email", |d| &mut d.email)
            .flag("rust", |d| &mut d.rust)
            .int("climate", |d| &mut d.climate)
            .rows(
                |d| &mut d.cities,
                Schema::<City>::new()
                    .text("city_name", |c| &mut c.name)
                    .float("city_lat", |c| &mut c.lat)
                    .int("city_pop", |c| &mut c.pop),
            );
        Model::new(Rc::new(RefCell::new(data)), schema)
    }

    #[test]
    fn scalar_resolution() {
        let m = model();
        let email = m.text("email").unwrap();
        assert_eq!(email.path(), &FieldPath::Scalar("email".into()));
        assert_eq!(email.get().as_deref(), Some("a@b.c"));
        assert!(m.flag("rust").unwrap().set(true));
        assert!(m.data().borrow().rust);
    }

    #[test]
    fn row_resolution() {
        let m = model();
        let lat = m.float("city_lat_1").unwrap();
        assert_eq!(
            lat.path(),
            &FieldPath::Row {
                field: "city_lat".into(),
                index: 1
            }
        );
        assert_eq!(lat.get(), Some(59.9));
        assert!(lat.set(60.0));
        assert_eq!(m.data().borrow().cities[1].lat, 60.0);
    }

    #[test]
    fn index_at_or_past_length_is_unbound() {
        let m = model();
        assert!(m.resolve("city_name_2").is_none());
        assert!(m.resolve("city_name_99").is_none());
        assert!(m.resolve("city_name_1").is_some());
    }

    #[test]
    fn unknown_names_are_unbound() {
        let m = model();
        assert!(m.resolve("phone").is_none());
        assert!(m.resolve("city_zip_0").is_none());
        assert!(m.resolve("email_0").is_none());
    }

    #[test]
    fn typed_accessors_reject_kind_mismatch() {
        let m = model();
        assert!(m.float("email").is_none());
        assert!(m.int("city_pop_0").is_some());
        assert!(m.text("city_pop_0").is_none());
        assert_eq!(m.resolve("climate").unwrap().type_name(), "int");
    }

    #[test]
    fn row_field_survives_sequence_shrinking() {
        let m = model();
        let name = m.text("city_name_1").unwrap();
        m.data().borrow_mut().cities.truncate(1);
        assert_eq!(name.get(), None);
        assert!(!name.set("Bergen".into()));
    }

    #[test]
    fn busy_data_does_not_resolve() {
        let m = model();
        let guard = m.data().borrow();
        assert!(m.resolve("email").is_none());
        drop(guard);
        assert!(m.resolve("email").is_some());
    }

    #[test]
    fn field_names_are_listed() {
        let m = model();
        assert_eq!(
            m.schema().field_names(),
            vec!["climate", "email", "rust", "city_lat_N", "city_name_N", "city_pop_N"]
        );
    }
}
