//! Parsing of the seed CSV exports.
//!
//! The exports are loose: quoted fields may span several physical lines,
//! `NULL` is written literally, and numeric columns are only recognised by
//! their header name. Rows without a usable `id` are dropped here so that
//! nothing downstream has to care about them.

use std::collections::BTreeMap;

const INT_FIELDS: [&str; 6] = ["id", "width", "height", "stock", "genreId", "posterId"];
const FLOAT_FIELDS: [&str; 1] = ["price"];

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

/// One parsed data row, keyed by header name. A `None` value is a null cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: BTreeMap<String, Option<Value>>,
}

impl Row {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).and_then(Option::as_ref)
    }

    /// Integer view of a cell. Text cells are parsed on demand, which is how
    /// the cart line and rating exports (whose headers are not in the typed
    /// list) get their numbers.
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Int(v) => Some(*v),
            Value::Float(v) => Some(v.trunc() as i64),
            Value::Text(s) => parse_int(s),
        }
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(s) => parse_float(s),
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self.get("id")? {
            Value::Int(id) if *id > 0 => Some(*id),
            _ => None,
        }
    }
}

pub fn parse(content: &str) -> Vec<Row> {
    let content = content.trim_start_matches('\u{feff}').trim();
    let mut lines = content.split('\n');

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = parse_header(header_line);

    let mut rows = Vec::new();
    while let Some(line) = lines.next() {
        let mut record = line.to_string();
        let mut quotes = count_quotes(line);

        while quotes % 2 != 0 {
            let Some(next) = lines.next() else {
                break;
            };
            record.push('\n');
            record.push_str(next);
            quotes += count_quotes(next);
        }

        let values = split_record(&record);
        let row = build_row(&headers, &values);
        if row.id().is_some() {
            rows.push(row);
        }
    }

    rows
}

fn parse_header(line: &str) -> Vec<String> {
    let mut headers = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => headers.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    headers.push(current.trim().to_string());
    headers
}

fn split_record(record: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            },
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    values.push(current.trim().to_string());
    values
}

fn build_row(headers: &[String], values: &[String]) -> Row {
    let mut fields = BTreeMap::new();

    for (index, header) in headers.iter().enumerate() {
        let raw = values.get(index).map(String::as_str).unwrap_or("");
        let raw = raw.strip_prefix('"').unwrap_or(raw);
        let raw = raw.strip_suffix('"').unwrap_or(raw).trim();

        let value = if raw.is_empty() || raw == "NULL" {
            None
        } else if INT_FIELDS.contains(&header.as_str()) {
            parse_int(raw).map(Value::Int)
        } else if FLOAT_FIELDS.contains(&header.as_str()) {
            parse_float(raw).map(Value::Float)
        } else {
            Some(Value::Text(raw.to_string()))
        };

        fields.insert(header.clone(), value);
    }

    Row { fields }
}

fn count_quotes(s: &str) -> usize {
    s.bytes().filter(|b| *b == b'"').count()
}

/// Parses the leading decimal integer of `s`, ignoring anything after it
/// (`"12cm"` is 12). Returns `None` when there is no leading digit.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Float counterpart of [`parse_int`]: the longest leading prefix that reads
/// as a decimal number, with an optional exponent.
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['+', '-']));

    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_columns_by_header_name() {
        let rows = parse("id,name,width,price,stock\n1,Dune,50,129.95,NULL\n");

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.text("name"), Some("Dune"));
        assert_eq!(row.get("width"), Some(&Value::Int(50)));
        assert_eq!(row.get("price"), Some(&Value::Float(129.95)));
        assert_eq!(row.get("stock"), None);
    }

    #[test]
    fn integer_columns_take_leading_digits_or_null() {
        let rows = parse("id,width,height\n3,70cm,wide\n");

        assert_eq!(rows[0].int("width"), Some(70));
        assert_eq!(rows[0].get("height"), None);
    }

    #[test]
    fn drops_rows_without_usable_id() {
        let rows = parse("id,title,slug\n,Action,action\n5,Action,action\nabc,Drama,drama\n0,Zero,zero\n");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), Some(5));
    }

    #[test]
    fn quoted_field_may_span_lines() {
        let multi = parse("id,description\n1,\"first line\nsecond line\"\n2,plain\n");
        let single = parse("id,description\n1,\"first line second line\"\n2,plain\n");

        assert_eq!(multi.len(), 2);
        assert_eq!(multi[0].text("description"), Some("first line\nsecond line"));
        assert_eq!(single[0].text("description"), Some("first line second line"));
        assert_eq!(multi[1], single[1]);
    }

    #[test]
    fn doubled_quotes_unescape_and_commas_stay_literal() {
        let rows = parse("id,name\n1,\"The \"\"Big\"\" One, Part 2\"\n");

        assert_eq!(rows[0].text("name"), Some("The \"Big\" One, Part 2"));
    }

    #[test]
    fn header_quotes_are_stripped() {
        let rows = parse("\"id\",\"genre, title\"\n4,Horror\n");

        assert_eq!(rows[0].text("genre, title"), Some("Horror"));
    }

    #[test]
    fn unterminated_quote_consumes_rest_of_input() {
        let rows = parse("id,name\n1,\"open\n2,never closed\n");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("name"), Some("open\n2,never closed"));
    }

    #[test]
    fn missing_trailing_cells_are_null() {
        let rows = parse("id,title,slug\r\n7,Sci-fi\r\n");

        assert_eq!(rows[0].text("title"), Some("Sci-fi"));
        assert_eq!(rows[0].get("slug"), None);
    }

    #[test]
    fn text_cells_convert_on_demand() {
        let rows = parse("id,UserID,PosterID,Quantity\n1,101,22,3\n");

        assert_eq!(rows[0].int("UserID"), Some(101));
        assert_eq!(rows[0].int("Quantity"), Some(3));
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse("").is_empty());
        assert!(parse("id,title\n").is_empty());
    }

    #[test]
    fn float_prefix_parsing() {
        assert_eq!(parse_float("49.5 kr"), Some(49.5));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("1e3x"), Some(1000.0));
        assert_eq!(parse_float("2e"), Some(2.0));
        assert_eq!(parse_float("-"), None);
        assert_eq!(parse_float("kr 10"), None);
    }
}
