//! The row shape shared by every searchable table.

/// Text columns that a search may match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Country,
}

impl TextField {
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Country => "country",
        }
    }
}

/// A snapshot of one city or starport as read from storage.
///
/// Coordinates are decimal degrees. Rows are never written back; the store
/// hands out fresh copies for every query.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Row {
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: None,
            latitude,
            longitude,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Value of a text field, `None` when the row has no value for it.
    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Country => self.country.as_deref(),
        }
    }

    /// Looks a column up by name. Only the string columns are addressable.
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            "id" => Some(&self.id),
            "name" => self.text(TextField::Name),
            "country" => self.text(TextField::Country),
            _ => None,
        }
    }
}
