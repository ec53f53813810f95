//! Query parameter builders

/// A query parameter of a Graph API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// `limit`; sent even when 0
    Limit(u64),
    /// `offset`; omitted when 0
    Offset(u64),
    /// `fields`, comma-joined; omitted when empty
    Fields(Vec<String>),
    /// `access_token`; omitted when empty
    AccessToken(String),
    /// `date_format`; omitted when empty
    DateFormat(String),
}

impl Param {
    /// Date format producing RFC 3339 timestamps
    pub const DATE_FORMAT_RFC3339: &'static str = r"Y-m-d\TH:i:s\Z";

    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Param::Fields(fields.into_iter().map(Into::into).collect())
    }

    /// `date_format` set to [`Param::DATE_FORMAT_RFC3339`]
    pub fn rfc3339_dates() -> Self {
        Param::DateFormat(Self::DATE_FORMAT_RFC3339.to_string())
    }

    /// Name of the query parameter
    pub fn key(&self) -> &'static str {
        match self {
            Param::Limit(_) => "limit",
            Param::Offset(_) => "offset",
            Param::Fields(_) => "fields",
            Param::AccessToken(_) => "access_token",
            Param::DateFormat(_) => "date_format",
        }
    }

    fn apply(&self, values: &mut Vec<(String, String)>) {
        match self {
            Param::Limit(limit) => add(values, self.key(), limit.to_string()),
            Param::Offset(offset) if *offset != 0 => add(values, self.key(), offset.to_string()),
            Param::Fields(fields) if !fields.is_empty() => {
                set(values, self.key(), fields.join(","))
            }
            Param::AccessToken(token) if !token.is_empty() => {
                set(values, self.key(), token.clone())
            }
            Param::DateFormat(format) if !format.is_empty() => {
                add(values, self.key(), format.clone())
            }
            _ => {}
        }
    }
}

fn add(values: &mut Vec<(String, String)>, key: &str, value: String) {
    values.push((key.to_string(), value));
}

fn set(values: &mut Vec<(String, String)>, key: &str, value: String) {
    values.retain(|(k, _)| k != key);
    add(values, key, value);
}

/// Query pairs for `params`, applied in order
pub fn param_values(params: &[Param]) -> Vec<(String, String)> {
    let mut values = Vec::with_capacity(params.len());
    for param in params {
        param.apply(&mut values);
    }
    values
}
