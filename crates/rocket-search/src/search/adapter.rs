use rocket_search_data::{CITIES_TABLE, Row, STARPORTS_TABLE, TextField};

/// Binds the generic pipeline to one entity table.
///
/// Adapters carry no logic of their own: a table name, the text fields the
/// query is matched against, and how a hit is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityAdapter {
    pub table: &'static str,
    pub text_fields: &'static [TextField],
    pub display: DisplayTemplate,
}

/// Cities match on name or country and display as `"{name}, {country}"`.
pub const CITY: EntityAdapter = EntityAdapter {
    table: CITIES_TABLE,
    text_fields: &[TextField::Name, TextField::Country],
    display: DisplayTemplate::new("{name}, {country}"),
};

/// Starports match on name only and display as `"{name}"`.
pub const STARPORT: EntityAdapter = EntityAdapter {
    table: STARPORTS_TABLE,
    text_fields: &[TextField::Name],
    display: DisplayTemplate::new("{name}"),
};

/// Display-name pattern with `{id}`, `{name}` and `{country}` placeholders.
///
/// A placeholder the row has no value for renders empty, and the separator
/// it leaves dangling at the end is dropped, so a city without a country
/// displays as just its name. Unknown placeholders are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTemplate(&'static str);

impl DisplayTemplate {
    pub const fn new(pattern: &'static str) -> Self {
        Self(pattern)
    }

    pub fn render(&self, row: &Row) -> String {
        let mut out = String::with_capacity(self.0.len() + row.name.len());
        let mut rest = self.0;
        let mut missing_value = false;
        // Trimming never reaches into a rendered value.
        let mut value_end = 0;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                rest = "";
                break;
            };
            let key = &after[..close];
            match key {
                "id" | "name" | "country" => match row.field(key) {
                    Some(value) => {
                        out.push_str(value);
                        value_end = out.len();
                    }
                    None => missing_value = true,
                },
                _ => out.push_str(&rest[open..=open + 1 + close]),
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);

        if missing_value {
            let trimmed_len = out.trim_end_matches([',', ' ', '-', '/']).len();
            out.truncate(trimmed_len.max(value_end));
        }
        out
    }
}
